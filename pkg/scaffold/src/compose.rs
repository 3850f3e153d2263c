//! Manifest composition.
//!
//! The workload is built first, then each optional [`Section`] is consulted
//! in a fixed order. A section either decorates the workload or appends a
//! dependent document after it.

use std::collections::BTreeMap;

use pkg_constants::api::{DEPLOYMENT_API_VERSION, DEPLOYMENT_KIND};
use pkg_constants::scaffold::{
    AUTOSCALER_SUFFIX, AZURE_WORKLOAD_IDENTITY_LABEL, AZURE_WORKLOAD_IDENTITY_VALUE,
    RUNTIME_CONFIG_KEY, RUNTIME_CONFIG_SECRET_SUFFIX,
};
use pkg_types::hpa::{CrossVersionObjectReference, HPASpec, HorizontalPodAutoscaler, MetricSpec};
use pkg_types::keda::{ScaleTargetRef, ScaleTrigger, ScaledObject, ScaledObjectSpec};
use pkg_types::manifest::{Document, Manifest};
use pkg_types::meta::{LocalObjectReference, ObjectMeta};
use pkg_types::secret::Secret;
use pkg_types::spinapp::{
    ResourceLimits, Resources, RuntimeConfig, SpinApp, SpinAppSpec, SpinVar,
};

use crate::validate::{AutoscalingPolicy, ValidatedOptions};

/// An optional part of the manifest.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<'a> {
    /// Runtime config Secret, referenced from the workload.
    RuntimeConfig { contents: &'a str },
    /// Azure Workload Identity label on the workload's pods.
    WorkloadIdentity,
    ServiceAccount { name: &'a str },
    Autoscaling(AutoscalingPolicy),
}

/// Sections that apply to `opts`, in render order.
pub fn sections<'a>(
    opts: &'a ValidatedOptions<'_>,
    runtime_config: Option<&'a str>,
) -> Vec<Section<'a>> {
    let mut sections = Vec::new();
    if let Some(contents) = runtime_config {
        sections.push(Section::RuntimeConfig { contents });
    }
    if opts.options.azure_workload_identity {
        sections.push(Section::WorkloadIdentity);
    }
    if let Some(name) = opts.options.service_account_name() {
        sections.push(Section::ServiceAccount { name });
    }
    if let Some(policy) = opts.autoscaling {
        sections.push(Section::Autoscaling(policy));
    }
    sections
}

/// Compose the manifest for validated options.
///
/// `runtime_config` is the already-read contents of `config_file`, if any.
pub fn compose(opts: &ValidatedOptions<'_>, runtime_config: Option<&str>) -> Manifest {
    let mut app = workload(opts);
    let mut dependents = Vec::new();

    for section in sections(opts, runtime_config) {
        section.apply(opts, &mut app, &mut dependents);
    }

    let mut manifest = Manifest::default();
    manifest.push(Document::SpinApp(app));
    for document in dependents {
        manifest.push(document);
    }
    manifest
}

impl Section<'_> {
    fn apply(&self, opts: &ValidatedOptions<'_>, app: &mut SpinApp, dependents: &mut Vec<Document>) {
        let name = opts.name();
        match self {
            Section::RuntimeConfig { contents } => {
                let secret_name = format!("{}{}", name, RUNTIME_CONFIG_SECRET_SUFFIX);
                app.spec.runtime_config = Some(RuntimeConfig {
                    load_from_secret: secret_name.clone(),
                });
                let data = BTreeMap::from([(RUNTIME_CONFIG_KEY.to_string(), contents.to_string())]);
                dependents.push(Document::Secret(Secret::opaque(
                    metadata(opts, secret_name),
                    data,
                )));
            }
            Section::WorkloadIdentity => {
                app.spec.pod_labels.insert(
                    AZURE_WORKLOAD_IDENTITY_LABEL.to_string(),
                    AZURE_WORKLOAD_IDENTITY_VALUE.to_string(),
                );
            }
            Section::ServiceAccount { name } => {
                app.spec.service_account_name = Some(name.to_string());
            }
            Section::Autoscaling(policy) => {
                dependents.push(autoscaler(opts, policy));
            }
        }
    }
}

fn metadata(opts: &ValidatedOptions<'_>, name: String) -> ObjectMeta {
    ObjectMeta::named(name, opts.options.namespace.as_deref())
}

fn workload(opts: &ValidatedOptions<'_>) -> SpinApp {
    let o = opts.options;

    let mut variables: Vec<SpinVar> = o
        .variables
        .iter()
        .map(|(name, value)| SpinVar {
            name: name.clone(),
            value: value.clone(),
        })
        .collect();
    variables.sort_by(|a, b| a.name.cmp(&b.name));

    let resources = (o.cpu_limit().is_some() || o.memory_limit().is_some()).then(|| Resources {
        limits: ResourceLimits {
            cpu: o.cpu_limit().map(str::to_string),
            memory: o.memory_limit().map(str::to_string),
        },
    });

    let autoscaled = opts.autoscaling.is_some();
    let spec = SpinAppSpec {
        image: opts.image.as_str().to_string(),
        executor: o.executor.clone(),
        replicas: (!autoscaled).then_some(o.replicas),
        enable_autoscaling: autoscaled,
        components: o.components.clone(),
        variables,
        service_account_name: None,
        pod_labels: BTreeMap::new(),
        resources,
        image_pull_secrets: o
            .image_pull_secrets
            .iter()
            .map(|name| LocalObjectReference { name: name.clone() })
            .collect(),
        runtime_config: None,
    };

    SpinApp::new(metadata(opts, opts.name().to_string()), spec)
}

fn autoscaler(opts: &ValidatedOptions<'_>, policy: &AutoscalingPolicy) -> Document {
    let name = opts.name();
    let meta = metadata(opts, format!("{}{}", name, AUTOSCALER_SUFFIX));
    let targets = policy.targets();

    match policy {
        AutoscalingPolicy::Hpa(_) => Document::HorizontalPodAutoscaler(HorizontalPodAutoscaler::new(
            meta,
            HPASpec {
                scale_target_ref: CrossVersionObjectReference {
                    api_version: DEPLOYMENT_API_VERSION.to_string(),
                    kind: DEPLOYMENT_KIND.to_string(),
                    name: name.to_string(),
                },
                min_replicas: targets.min_replicas,
                max_replicas: targets.max_replicas,
                metrics: vec![
                    MetricSpec::utilization("cpu", targets.cpu_percent),
                    MetricSpec::utilization("memory", targets.memory_percent),
                ],
            },
        )),
        AutoscalingPolicy::Keda(_) => Document::ScaledObject(ScaledObject::new(
            meta,
            ScaledObjectSpec {
                scale_target_ref: ScaleTargetRef {
                    name: name.to_string(),
                },
                min_replica_count: targets.min_replicas,
                max_replica_count: targets.max_replicas,
                triggers: vec![
                    ScaleTrigger::utilization("cpu", targets.cpu_percent),
                    ScaleTrigger::utilization("memory", targets.memory_percent),
                ],
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ScaffoldOptions;
    use crate::validate::validate;

    fn base() -> ScaffoldOptions {
        ScaffoldOptions {
            from: "ghcr.io/foo/example-app:v0.1.0".to_string(),
            replicas: 2,
            executor: "containerd-shim-spin".to_string(),
            ..Default::default()
        }
    }

    fn hpa() -> ScaffoldOptions {
        ScaffoldOptions {
            autoscaler: Some("hpa".to_string()),
            cpu_limit: Some("100m".to_string()),
            memory_limit: Some("128Mi".to_string()),
            max_replicas: 3,
            target_cpu_utilization_percentage: 60,
            target_memory_utilization_percentage: 60,
            ..base()
        }
    }

    fn spinapp(manifest: &Manifest) -> &SpinApp {
        match &manifest.documents[0] {
            Document::SpinApp(app) => app,
            other => panic!("expected SpinApp first, got {}", other.kind()),
        }
    }

    #[test]
    fn only_image_yields_single_workload() {
        let opts = base();
        let validated = validate(&opts).unwrap();
        assert!(sections(&validated, None).is_empty());

        let manifest = compose(&validated, None);
        assert_eq!(manifest.documents.len(), 1);

        let app = spinapp(&manifest);
        assert_eq!(app.metadata.name, "example-app");
        assert_eq!(app.spec.image, "ghcr.io/foo/example-app:v0.1.0");
        assert_eq!(app.spec.executor, "containerd-shim-spin");
        assert_eq!(app.spec.replicas, Some(2));
        assert!(!app.spec.enable_autoscaling);
        assert!(app.spec.resources.is_none());
        assert!(app.metadata.labels.is_empty());
        assert!(app.spec.pod_labels.is_empty());
    }

    #[test]
    fn sections_follow_fixed_order() {
        let opts = ScaffoldOptions {
            azure_workload_identity: true,
            service_account_name: Some("my-service-account".to_string()),
            ..hpa()
        };
        let validated = validate(&opts).unwrap();
        let found = sections(&validated, Some("x = 1"));
        assert_eq!(found.len(), 4);
        assert_eq!(found[0], Section::RuntimeConfig { contents: "x = 1" });
        assert_eq!(found[1], Section::WorkloadIdentity);
        assert_eq!(
            found[2],
            Section::ServiceAccount {
                name: "my-service-account"
            }
        );
        assert!(matches!(found[3], Section::Autoscaling(AutoscalingPolicy::Hpa(_))));

        let kinds: Vec<String> = compose(&validated, Some("x = 1"))
            .documents
            .iter()
            .map(|d| d.kind().to_string())
            .collect();
        assert_eq!(kinds, ["SpinApp", "Secret", "HorizontalPodAutoscaler"]);
    }

    #[test]
    fn runtime_config_links_secret() {
        let opts = base();
        let validated = validate(&opts).unwrap();
        let manifest = compose(&validated, Some("[server]\n"));

        let app = spinapp(&manifest);
        assert_eq!(
            app.spec.runtime_config.as_ref().unwrap().load_from_secret,
            "example-app-runtime-config"
        );
        let Document::Secret(secret) = &manifest.documents[1] else {
            panic!("expected Secret");
        };
        assert_eq!(secret.metadata.name, "example-app-runtime-config");
        assert_eq!(secret.type_, "Opaque");
        assert_eq!(secret.string_data["runtime-config.toml"], "[server]\n");
    }

    #[test]
    fn workload_identity_labels_pods() {
        let opts = ScaffoldOptions {
            azure_workload_identity: true,
            ..base()
        };
        let validated = validate(&opts).unwrap();
        let manifest = compose(&validated, None);
        let app = spinapp(&manifest);
        assert_eq!(app.spec.pod_labels["azure.workload.identity/use"], "true");
        assert!(app.metadata.labels.is_empty());
        assert_eq!(manifest.documents.len(), 1);
    }

    #[test]
    fn empty_service_account_is_omitted() {
        let opts = ScaffoldOptions {
            service_account_name: Some(String::new()),
            ..base()
        };
        let validated = validate(&opts).unwrap();
        assert!(sections(&validated, None).is_empty());
        assert!(spinapp(&compose(&validated, None)).spec.service_account_name.is_none());
    }

    #[test]
    fn hpa_replaces_fixed_replicas() {
        let opts = hpa();
        let validated = validate(&opts).unwrap();
        let manifest = compose(&validated, None);

        let app = spinapp(&manifest);
        assert_eq!(app.spec.replicas, None);
        assert!(app.spec.enable_autoscaling);
        let limits = &app.spec.resources.as_ref().unwrap().limits;
        assert_eq!(limits.cpu.as_deref(), Some("100m"));
        assert_eq!(limits.memory.as_deref(), Some("128Mi"));

        let Document::HorizontalPodAutoscaler(hpa) = &manifest.documents[1] else {
            panic!("expected HorizontalPodAutoscaler");
        };
        assert_eq!(hpa.metadata.name, "example-app-autoscaler");
        assert_eq!(hpa.spec.scale_target_ref.kind, "Deployment");
        assert_eq!(hpa.spec.scale_target_ref.name, "example-app");
        assert_eq!(hpa.spec.min_replicas, 2);
        assert_eq!(hpa.spec.max_replicas, 3);
        assert_eq!(hpa.spec.metrics[0].resource.name, "cpu");
        assert_eq!(hpa.spec.metrics[1].resource.name, "memory");
        assert!(
            hpa.spec
                .metrics
                .iter()
                .all(|m| m.resource.target.average_utilization == 60)
        );
    }

    #[test]
    fn keda_emits_scaled_object_only() {
        let opts = ScaffoldOptions {
            autoscaler: Some("keda".to_string()),
            target_memory_utilization_percentage: 75,
            ..hpa()
        };
        let validated = validate(&opts).unwrap();
        let manifest = compose(&validated, None);
        assert_eq!(manifest.documents.len(), 2);

        let Document::ScaledObject(so) = &manifest.documents[1] else {
            panic!("expected ScaledObject");
        };
        assert_eq!(so.spec.scale_target_ref.name, "example-app");
        assert_eq!(so.spec.min_replica_count, 2);
        assert_eq!(so.spec.max_replica_count, 3);
        assert_eq!(so.spec.triggers[0].type_, "cpu");
        assert_eq!(so.spec.triggers[0].metadata["value"], "60");
        assert_eq!(so.spec.triggers[1].type_, "memory");
        assert_eq!(so.spec.triggers[1].metadata["value"], "75");
    }

    #[test]
    fn limits_pass_through_without_autoscaler() {
        let opts = ScaffoldOptions {
            memory_limit: Some("64Mi".to_string()),
            ..base()
        };
        let validated = validate(&opts).unwrap();
        let manifest = compose(&validated, None);
        let limits = &spinapp(&manifest).spec.resources.as_ref().unwrap().limits;
        assert_eq!(limits.cpu, None);
        assert_eq!(limits.memory.as_deref(), Some("64Mi"));
        assert_eq!(manifest.documents.len(), 1);
    }

    #[test]
    fn namespace_is_applied_to_every_document() {
        let opts = ScaffoldOptions {
            namespace: Some("apps".to_string()),
            ..hpa()
        };
        let validated = validate(&opts).unwrap();
        let manifest = compose(&validated, Some("x = 1"));
        assert_eq!(manifest.documents.len(), 3);
        assert!(
            manifest
                .documents
                .iter()
                .all(|d| d.metadata().namespace.as_deref() == Some("apps"))
        );
    }

    #[test]
    fn variables_are_sorted_and_lists_keep_order() {
        let opts = ScaffoldOptions {
            variables: [("foo", "yoo"), ("bar", "yee"), ("baz", "")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            components: vec!["world".to_string(), "hello".to_string()],
            image_pull_secrets: vec!["secret-name".to_string(), "secret-name-2".to_string()],
            ..base()
        };
        let validated = validate(&opts).unwrap();
        let manifest = compose(&validated, None);
        let app = spinapp(&manifest);

        let names: Vec<&str> = app.spec.variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["bar", "baz", "foo"]);
        assert_eq!(app.spec.variables[0].value, "yee");
        assert_eq!(app.spec.components, ["world", "hello"]);
        let secrets: Vec<&str> = app
            .spec
            .image_pull_secrets
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(secrets, ["secret-name", "secret-name-2"]);
    }
}
