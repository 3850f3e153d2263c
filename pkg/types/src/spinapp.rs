use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::meta::{LocalObjectReference, ObjectMeta};
use pkg_constants::api::{SPINAPP_API_VERSION, SPINAPP_KIND};

// --- Variables ---

/// A single application variable, rendered as `{name, value}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinVar {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

// --- Resources ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default)]
    pub limits: ResourceLimits,
}

// --- Runtime config ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// Name of the Secret holding `runtime-config.toml`.
    pub load_from_secret: String,
}

// --- SpinApp spec ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinAppSpec {
    pub image: String,
    pub executor: String,
    /// Fixed replica count; absent when autoscaling owns the count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub enable_autoscaling: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<SpinVar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,
    /// Labels the operator copies onto every pod of the app.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pod_labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_pull_secrets: Vec<LocalObjectReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_config: Option<RuntimeConfig>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

// --- SpinApp status ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinAppStatus {
    #[serde(default)]
    pub ready_replicas: i32,
}

// --- SpinApp ---

/// The `core.spinoperator.dev/v1alpha1` `SpinApp` custom resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinApp {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: SpinAppSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SpinAppStatus>,
}

impl SpinApp {
    pub fn new(metadata: ObjectMeta, spec: SpinAppSpec) -> Self {
        Self {
            api_version: SPINAPP_API_VERSION.to_string(),
            kind: SPINAPP_KIND.to_string(),
            metadata,
            spec,
            status: None,
        }
    }

    /// Desired replica count as reported by `get`/`list`.
    /// Autoscaled apps have no fixed count and report 0.
    pub fn desired_replicas(&self) -> i32 {
        self.spec.replicas.unwrap_or_default()
    }

    pub fn ready_replicas(&self) -> i32 {
        self.status.as_ref().map(|s| s.ready_replicas).unwrap_or_default()
    }
}
