use std::collections::HashMap;
use std::path::PathBuf;

/// Everything needed to scaffold one Spin application.
///
/// Built once per invocation (normally from CLI flags), validated, then
/// consumed by the composer. Numeric fields are signed so that bad input
/// reaches the validator instead of failing in the flag parser.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    /// OCI reference of the application image.
    pub from: String,
    pub replicas: i32,
    pub max_replicas: i32,
    pub executor: String,
    /// Runtime config file embedded into a Secret.
    pub config_file: Option<PathBuf>,
    pub azure_workload_identity: bool,
    pub image_pull_secrets: Vec<String>,
    pub service_account_name: Option<String>,
    /// Raw autoscaler type; `None` or empty disables autoscaling.
    pub autoscaler: Option<String>,
    pub cpu_limit: Option<String>,
    pub memory_limit: Option<String>,
    pub target_cpu_utilization_percentage: i32,
    pub target_memory_utilization_percentage: i32,
    pub variables: HashMap<String, String>,
    pub components: Vec<String>,
    pub namespace: Option<String>,
}

impl ScaffoldOptions {
    /// The autoscaler type, with an empty string treated as unset.
    pub fn autoscaler(&self) -> Option<&str> {
        self.autoscaler.as_deref().filter(|a| !a.is_empty())
    }

    pub fn service_account_name(&self) -> Option<&str> {
        self.service_account_name.as_deref().filter(|s| !s.is_empty())
    }

    pub fn cpu_limit(&self) -> Option<&str> {
        self.cpu_limit.as_deref().filter(|s| !s.is_empty())
    }

    pub fn memory_limit(&self) -> Option<&str> {
        self.memory_limit.as_deref().filter(|s| !s.is_empty())
    }
}
