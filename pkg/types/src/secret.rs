use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::meta::ObjectMeta;
use pkg_constants::api::{SECRET_API_VERSION, SECRET_KIND};

/// A core `v1` Secret.
///
/// Scaffolded secrets carry plain text in `stringData`; the API server
/// encodes it into `data` on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub string_data: BTreeMap<String, String>,
}

impl Secret {
    pub fn opaque(metadata: ObjectMeta, string_data: BTreeMap<String, String>) -> Self {
        Self {
            api_version: SECRET_API_VERSION.to_string(),
            kind: SECRET_KIND.to_string(),
            metadata,
            type_: "Opaque".to_string(),
            string_data,
        }
    }
}
