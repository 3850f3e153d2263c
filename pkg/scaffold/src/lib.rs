//! Offline manifest scaffolding for Spin applications.
//!
//! [`scaffold`] runs the whole pipeline: the image reference is resolved to a
//! workload name, the options are validated, and the manifest is composed and
//! rendered. The same input always produces the same bytes.

pub mod compose;
pub mod error;
pub mod options;
pub mod reference;
pub mod validate;

use std::path::Path;

use pkg_types::manifest::Manifest;
use tracing::debug;

pub use error::{Error, Result};
pub use options::ScaffoldOptions;
pub use reference::{ImageReference, name_from_reference, validate_image_reference};
pub use validate::{AutoscalingPolicy, ScalingTargets, ValidatedOptions, validate};

/// Validate `opts` and compose its manifest without rendering it.
pub fn build_manifest(opts: &ScaffoldOptions) -> Result<Manifest> {
    let validated = validate(opts)?;
    let runtime_config = opts
        .config_file
        .as_deref()
        .map(read_runtime_config)
        .transpose()?;

    let manifest = compose::compose(&validated, runtime_config.as_deref());
    debug!(
        "Composed {} document(s) for {}",
        manifest.documents.len(),
        validated.name()
    );
    Ok(manifest)
}

/// Validate `opts` and render its manifest as a YAML stream.
pub fn scaffold(opts: &ScaffoldOptions) -> Result<String> {
    let manifest = build_manifest(opts)?;
    Ok(manifest.to_yaml()?)
}

fn read_runtime_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
