//! Image reference parsing and workload-name derivation.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

const PATH_COMPONENT: &str = r"[a-z0-9]+(?:(?:[._]|__|-+)[a-z0-9]+)*";
const DOMAIN_COMPONENT: &str = r"(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9])";
const TAG: &str = r"[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}";
const DIGEST: &str = r"[A-Za-z][A-Za-z0-9]*(?:[-_+.][A-Za-z][A-Za-z0-9]*)*:[0-9a-fA-F]{32,}";

/// Longest repository name (registry + path) a registry accepts.
const NAME_TOTAL_LENGTH_MAX: usize = 255;

/// `[domain[:port]/]path[/path...][:tag][@digest]`, anchored.
static REFERENCE_REGEXP: LazyLock<Regex> = LazyLock::new(|| {
    let domain = format!(r"{DOMAIN_COMPONENT}(?:\.{DOMAIN_COMPONENT})*(?::[0-9]+)?");
    let name = format!(r"(?:{domain}/)?{PATH_COMPONENT}(?:/{PATH_COMPONENT})*");
    let pattern = format!(r"^(?P<name>{name})(?::{TAG})?(?:@{DIGEST})?$");
    Regex::new(&pattern).expect("image reference pattern is a valid regex")
});

/// A syntactically valid image reference and the workload name derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    raw: String,
    name: String,
}

impl ImageReference {
    /// Check the reference against the grammar, then derive the name.
    pub fn parse(reference: &str) -> Result<Self> {
        if !validate_image_reference(reference) {
            return Err(Error::invalid_reference(reference));
        }
        let name = name_from_reference(reference)?;
        Ok(Self {
            raw: reference.to_string(),
            name,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Last path segment without tag or digest, e.g. `hello-rust`.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Whether `reference` matches the image reference grammar.
pub fn validate_image_reference(reference: &str) -> bool {
    match REFERENCE_REGEXP.captures(reference) {
        Some(caps) => caps
            .name("name")
            .is_some_and(|name| name.as_str().len() <= NAME_TOTAL_LENGTH_MAX),
        None => false,
    }
}

/// Derive the workload name: drop any `@digest`, keep the last `/` segment,
/// then drop any `:tag`.
pub fn name_from_reference(reference: &str) -> Result<String> {
    let without_digest = reference.split('@').next().unwrap_or_default();
    let last_segment = without_digest.rsplit('/').next().unwrap_or_default();
    let name = last_segment.split(':').next().unwrap_or_default();

    if name.is_empty() {
        return Err(Error::invalid_reference(reference));
    }
    Ok(name.to_string())
}
