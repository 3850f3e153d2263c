use clap::Args;
use pkg_constants::scaffold::{
    DEFAULT_EXECUTOR, DEFAULT_MAX_REPLICAS, DEFAULT_REPLICAS, DEFAULT_TARGET_UTILIZATION_PERCENT,
};
use pkg_scaffold::ScaffoldOptions;
use std::path::PathBuf;

/// Flags shared by `scaffold` and `deploy`.
#[derive(Args, Debug, Clone)]
pub struct ScaffoldArgs {
    /// Reference in the registry of the application
    #[arg(long, short = 'f')]
    pub from: String,

    /// Number of replicas (minimum replicas when autoscaling)
    #[arg(long, short = 'r', default_value_t = DEFAULT_REPLICAS, allow_negative_numbers = true)]
    pub replicas: i32,

    /// Executor used to run the application
    #[arg(long, default_value = DEFAULT_EXECUTOR)]
    pub executor: String,

    /// Path to the runtime config file
    #[arg(long, short = 'c')]
    pub runtime_config_file: Option<PathBuf>,

    /// Secret used to pull the image (repeatable)
    #[arg(long = "image-pull-secret", short = 's')]
    pub image_pull_secrets: Vec<String>,

    /// Label the app for Azure Workload Identity
    #[arg(long)]
    pub enable_azure_workload_identity: bool,

    /// Service account the app runs as
    #[arg(long)]
    pub service_account_name: Option<String>,

    /// Autoscaler to use: hpa or keda
    #[arg(long)]
    pub autoscaler: Option<String>,

    /// CPU limit, e.g. 100m (required with --autoscaler)
    #[arg(long)]
    pub cpu_limit: Option<String>,

    /// Memory limit, e.g. 128Mi (required with --autoscaler)
    #[arg(long)]
    pub memory_limit: Option<String>,

    /// Maximum replica count when autoscaling
    #[arg(long, default_value_t = DEFAULT_MAX_REPLICAS, allow_negative_numbers = true)]
    pub max_replicas: i32,

    /// Target average CPU utilization in percent when autoscaling
    #[arg(long = "autoscaler-target-cpu-utilization", default_value_t = DEFAULT_TARGET_UTILIZATION_PERCENT, allow_negative_numbers = true)]
    pub target_cpu_utilization: i32,

    /// Target average memory utilization in percent when autoscaling
    #[arg(long = "autoscaler-target-memory-utilization", default_value_t = DEFAULT_TARGET_UTILIZATION_PERCENT, allow_negative_numbers = true)]
    pub target_memory_utilization: i32,

    /// Application variable as key=value (repeatable)
    #[arg(long = "variable", short = 'v', value_parser = parse_key_val)]
    pub variables: Vec<(String, String)>,

    /// Component to run (repeatable); all components when omitted
    #[arg(long = "component")]
    pub components: Vec<String>,
}

impl ScaffoldArgs {
    pub fn into_options(self, namespace: Option<String>) -> ScaffoldOptions {
        ScaffoldOptions {
            from: self.from,
            replicas: self.replicas,
            max_replicas: self.max_replicas,
            executor: self.executor,
            config_file: self.runtime_config_file,
            azure_workload_identity: self.enable_azure_workload_identity,
            image_pull_secrets: self.image_pull_secrets,
            service_account_name: self.service_account_name,
            autoscaler: self.autoscaler,
            cpu_limit: self.cpu_limit,
            memory_limit: self.memory_limit,
            target_cpu_utilization_percentage: self.target_cpu_utilization,
            target_memory_utilization_percentage: self.target_memory_utilization,
            // Later flags win for repeated keys.
            variables: self.variables.into_iter().collect(),
            components: self.components,
            namespace,
        }
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid variable '{}': expected key=value", s)),
    }
}
