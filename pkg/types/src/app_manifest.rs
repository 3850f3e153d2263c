//! The parts of a Spin application manifest (`spin.toml`) the CLI reads.

use anyhow::Context;
use pkg_constants::paths::SPIN_MANIFEST;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct AppManifest {
    /// Version 1 manifests keep the name at the top level.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub application: Option<Application>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Application {
    #[serde(default)]
    pub name: Option<String>,
}

impl AppManifest {
    pub fn app_name(&self) -> Option<&str> {
        self.application
            .as_ref()
            .and_then(|app| app.name.as_deref())
            .or(self.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

/// Name of the Spin app whose manifest lives in `dir`, if there is one.
pub fn app_name_from_dir(dir: &Path) -> anyhow::Result<Option<String>> {
    let path = dir.join(SPIN_MANIFEST);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
    };
    let manifest: AppManifest = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(manifest.app_name().map(str::to_string))
}
