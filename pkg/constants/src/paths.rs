//! Filesystem path constants.

/// Client config file, relative to the user's home directory.
pub const DEFAULT_CLIENT_CONFIG: &str = ".spin-kube/config.yaml";

/// Spin application manifest looked up in the working directory.
pub const SPIN_MANIFEST: &str = "spin.toml";
