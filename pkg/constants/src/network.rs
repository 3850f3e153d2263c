//! Network-related constants.

/// Default Kubernetes API server address (e.g. `kubectl proxy`).
pub const DEFAULT_API_ADDR: &str = "http://127.0.0.1:8001";

/// Namespace used when neither the flag nor the config file sets one.
pub const DEFAULT_NAMESPACE: &str = "default";
