//! Cross-field validation of [`ScaffoldOptions`].
//!
//! Checks run in a fixed order and stop at the first failure, so a record
//! with several problems always reports the same one.

use pkg_constants::scaffold::{AUTOSCALER_HPA, AUTOSCALER_KEDA};
use tracing::debug;

use crate::error::{Error, Result};
use crate::options::ScaffoldOptions;
use crate::reference::ImageReference;

/// Replica bounds and utilization targets shared by both autoscaler backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalingTargets {
    pub min_replicas: i32,
    pub max_replicas: i32,
    pub cpu_percent: i32,
    pub memory_percent: i32,
}

/// How the workload scales; exactly one backend is ever selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoscalingPolicy {
    Hpa(ScalingTargets),
    Keda(ScalingTargets),
}

impl AutoscalingPolicy {
    pub fn targets(&self) -> &ScalingTargets {
        match self {
            AutoscalingPolicy::Hpa(t) | AutoscalingPolicy::Keda(t) => t,
        }
    }
}

/// Options that passed validation, plus what validation derived from them.
/// Only this type is accepted by the composer.
#[derive(Debug, Clone)]
pub struct ValidatedOptions<'a> {
    pub options: &'a ScaffoldOptions,
    pub image: ImageReference,
    pub autoscaling: Option<AutoscalingPolicy>,
}

impl ValidatedOptions<'_> {
    /// Name of the generated workload.
    pub fn name(&self) -> &str {
        self.image.name()
    }
}

pub fn validate(opts: &ScaffoldOptions) -> Result<ValidatedOptions<'_>> {
    check(opts).inspect_err(|e| debug!("Rejected scaffold options: {}", e))
}

fn check(opts: &ScaffoldOptions) -> Result<ValidatedOptions<'_>> {
    let image = ImageReference::parse(&opts.from)?;

    // Zero is accepted; the wording is kept as users know it.
    if opts.replicas < 0 {
        return Err(Error::validation(format!(
            "the minimum replica count ({}) must be greater than 0",
            opts.replicas
        )));
    }

    let autoscaling = match opts.autoscaler() {
        None => None,
        Some(AUTOSCALER_HPA) => Some(AutoscalingPolicy::Hpa(scaling_targets(opts)?)),
        Some(AUTOSCALER_KEDA) => Some(AutoscalingPolicy::Keda(scaling_targets(opts)?)),
        Some(other) => {
            return Err(Error::validation(format!(
                "invalid autoscaler type '{}'; the autoscaler type must be either '{}' or '{}'",
                other, AUTOSCALER_HPA, AUTOSCALER_KEDA
            )));
        }
    };

    Ok(ValidatedOptions {
        options: opts,
        image,
        autoscaling,
    })
}

fn scaling_targets(opts: &ScaffoldOptions) -> Result<ScalingTargets> {
    if opts.max_replicas < 0 {
        return Err(Error::validation(format!(
            "the maximum replica count ({}) must be equal to or greater than 0",
            opts.max_replicas
        )));
    }
    if opts.replicas > opts.max_replicas {
        return Err(Error::validation(format!(
            "the minimum replica count ({}) must be less than or equal to the maximum replica count ({})",
            opts.replicas, opts.max_replicas
        )));
    }
    if opts.cpu_limit().is_none() {
        return Err(Error::validation(
            "cpu limits must be set when autoscaling is enabled",
        ));
    }
    if opts.memory_limit().is_none() {
        return Err(Error::validation(
            "memory limits must be set when autoscaling is enabled",
        ));
    }
    check_percentage("cpu", opts.target_cpu_utilization_percentage)?;
    check_percentage("memory", opts.target_memory_utilization_percentage)?;

    Ok(ScalingTargets {
        min_replicas: opts.replicas,
        max_replicas: opts.max_replicas,
        cpu_percent: opts.target_cpu_utilization_percentage,
        memory_percent: opts.target_memory_utilization_percentage,
    })
}

fn check_percentage(resource: &str, value: i32) -> Result<()> {
    if !(1..=100).contains(&value) {
        return Err(Error::validation(format!(
            "target {} utilization percentage ({}) must be between 1 and 100",
            resource, value
        )));
    }
    Ok(())
}
