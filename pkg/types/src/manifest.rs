use serde::Serialize;

use crate::hpa::HorizontalPodAutoscaler;
use crate::keda::ScaledObject;
use crate::meta::ObjectMeta;
use crate::secret::Secret;
use crate::spinapp::SpinApp;

/// One document of a multi-document manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    SpinApp(SpinApp),
    Secret(Secret),
    HorizontalPodAutoscaler(HorizontalPodAutoscaler),
    ScaledObject(ScaledObject),
}

impl Document {
    pub fn api_version(&self) -> &str {
        match self {
            Document::SpinApp(d) => &d.api_version,
            Document::Secret(d) => &d.api_version,
            Document::HorizontalPodAutoscaler(d) => &d.api_version,
            Document::ScaledObject(d) => &d.api_version,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Document::SpinApp(d) => &d.kind,
            Document::Secret(d) => &d.kind,
            Document::HorizontalPodAutoscaler(d) => &d.kind,
            Document::ScaledObject(d) => &d.kind,
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Document::SpinApp(d) => &d.metadata,
            Document::Secret(d) => &d.metadata,
            Document::HorizontalPodAutoscaler(d) => &d.metadata,
            Document::ScaledObject(d) => &d.metadata,
        }
    }

    pub fn metadata_mut(&mut self) -> &mut ObjectMeta {
        match self {
            Document::SpinApp(d) => &mut d.metadata,
            Document::Secret(d) => &mut d.metadata,
            Document::HorizontalPodAutoscaler(d) => &mut d.metadata,
            Document::ScaledObject(d) => &mut d.metadata,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata().name
    }

    /// kubectl-style reference, e.g. `spinapp.core.spinoperator.dev/hello`.
    pub fn display_ref(&self) -> String {
        let kind = self.kind().to_lowercase();
        match self.api_version().rsplit_once('/') {
            Some((group, _)) => format!("{}.{}/{}", kind, group, self.name()),
            None => format!("{}/{}", kind, self.name()),
        }
    }
}

/// An ordered set of documents rendered as one YAML stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    pub documents: Vec<Document>,
}

impl Manifest {
    pub fn push(&mut self, document: Document) {
        self.documents.push(document);
    }

    /// Render every document and join them with `---` separators.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        let rendered = self
            .documents
            .iter()
            .map(serde_yaml::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rendered.join("---\n"))
    }
}
