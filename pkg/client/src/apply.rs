use async_trait::async_trait;
use pkg_types::manifest::{Document, Manifest};
use tracing::info;

/// Something that can create-or-update a single document in a namespace.
#[async_trait]
pub trait ManifestApplier: Send + Sync {
    async fn apply(&self, namespace: &str, document: &Document) -> anyhow::Result<()>;
}

/// Apply every document of `manifest` in order, stopping at the first failure.
/// Returns the kubectl-style reference of each applied document.
pub async fn apply_manifest(
    applier: &dyn ManifestApplier,
    namespace: &str,
    manifest: &Manifest,
) -> anyhow::Result<Vec<String>> {
    let mut applied = Vec::with_capacity(manifest.documents.len());
    for document in &manifest.documents {
        applier.apply(namespace, document).await?;
        let reference = document.display_ref();
        info!("Applied {} in namespace {}", reference, namespace);
        applied.push(reference);
    }
    Ok(applied)
}
