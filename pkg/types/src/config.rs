use serde::{Deserialize, Serialize};
use std::path::Path;

/// Client configuration file (YAML).
///
/// Example `~/.spin-kube/config.yaml`:
/// ```yaml
/// server: https://10.0.0.1:6443
/// token: my-service-account-token
/// namespace: apps
/// insecure-skip-tls-verify: true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfigFile {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default, alias = "insecure-skip-tls-verify")]
    pub insecure_skip_tls_verify: Option<bool>,
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T: serde::de::DeserializeOwned + Default>(
    path: &Path,
) -> anyhow::Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };
    // An empty file deserializes to `null`, which a struct rejects.
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    let config: T = serde_yaml::from_str(&content)?;
    Ok(config)
}
