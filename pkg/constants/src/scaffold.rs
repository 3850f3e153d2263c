//! Defaults and fixed names used when scaffolding manifests.

/// Default Spin executor.
pub const DEFAULT_EXECUTOR: &str = "containerd-shim-spin";

/// Default replica count (minimum replicas when autoscaling).
pub const DEFAULT_REPLICAS: i32 = 2;

/// Default maximum replica count for autoscaling.
pub const DEFAULT_MAX_REPLICAS: i32 = 3;

/// Default target CPU/memory utilization for autoscaling, in percent.
pub const DEFAULT_TARGET_UTILIZATION_PERCENT: i32 = 60;

/// Accepted values of the `--autoscaler` flag.
pub const AUTOSCALER_HPA: &str = "hpa";
pub const AUTOSCALER_KEDA: &str = "keda";

/// Suffix of the runtime-config Secret name (`<app>-runtime-config`).
pub const RUNTIME_CONFIG_SECRET_SUFFIX: &str = "-runtime-config";

/// Key under which the runtime config is stored in the Secret.
pub const RUNTIME_CONFIG_KEY: &str = "runtime-config.toml";

/// Suffix of the autoscaler resource name (`<app>-autoscaler`).
pub const AUTOSCALER_SUFFIX: &str = "-autoscaler";

/// Label that opts a workload into Azure Workload Identity.
pub const AZURE_WORKLOAD_IDENTITY_LABEL: &str = "azure.workload.identity/use";
pub const AZURE_WORKLOAD_IDENTITY_VALUE: &str = "true";
