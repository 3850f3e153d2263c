use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::meta::ObjectMeta;
use pkg_constants::api::{SCALED_OBJECT_API_VERSION, SCALED_OBJECT_KIND};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleTargetRef {
    pub name: String,
}

/// A KEDA scaler trigger.
///
/// Trigger metadata values are always strings in KEDA's schema, so a
/// 60% target renders as `value: "60"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleTrigger {
    #[serde(rename = "type")]
    pub type_: String,
    pub metric_type: String,
    pub metadata: BTreeMap<String, String>,
}

impl ScaleTrigger {
    pub fn utilization(resource: &str, percent: i32) -> Self {
        Self {
            type_: resource.to_string(),
            metric_type: "Utilization".to_string(),
            metadata: BTreeMap::from([("value".to_string(), percent.to_string())]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledObjectSpec {
    pub scale_target_ref: ScaleTargetRef,
    pub min_replica_count: i32,
    pub max_replica_count: i32,
    pub triggers: Vec<ScaleTrigger>,
}

/// A `keda.sh/v1alpha1` ScaledObject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledObject {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: ScaledObjectSpec,
}

impl ScaledObject {
    pub fn new(metadata: ObjectMeta, spec: ScaledObjectSpec) -> Self {
        Self {
            api_version: SCALED_OBJECT_API_VERSION.to_string(),
            kind: SCALED_OBJECT_KIND.to_string(),
            metadata,
            spec,
        }
    }
}
