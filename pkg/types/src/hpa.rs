use serde::{Deserialize, Serialize};

use crate::meta::ObjectMeta;
use pkg_constants::api::{HPA_API_VERSION, HPA_KIND};

// --- Scale target ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossVersionObjectReference {
    pub api_version: String,
    pub kind: String,
    pub name: String,
}

// --- Metric targets ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTarget {
    /// Always `Utilization` for scaffolded autoscalers.
    #[serde(rename = "type")]
    pub type_: String,
    /// Target average utilization (percentage, e.g. 80 = 80%)
    pub average_utilization: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetricSource {
    /// `cpu` or `memory`
    pub name: String,
    pub target: MetricTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSpec {
    #[serde(rename = "type")]
    pub type_: String,
    pub resource: ResourceMetricSource,
}

impl MetricSpec {
    /// A `Resource` metric targeting average utilization of `resource`.
    pub fn utilization(resource: &str, percent: i32) -> Self {
        Self {
            type_: "Resource".to_string(),
            resource: ResourceMetricSource {
                name: resource.to_string(),
                target: MetricTarget {
                    type_: "Utilization".to_string(),
                    average_utilization: percent,
                },
            },
        }
    }
}

// --- HPA spec ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HPASpec {
    pub scale_target_ref: CrossVersionObjectReference,
    pub min_replicas: i32,
    pub max_replicas: i32,
    pub metrics: Vec<MetricSpec>,
}

// --- HPA ---

/// An `autoscaling/v2` HorizontalPodAutoscaler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalPodAutoscaler {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: HPASpec,
}

impl HorizontalPodAutoscaler {
    pub fn new(metadata: ObjectMeta, spec: HPASpec) -> Self {
        Self {
            api_version: HPA_API_VERSION.to_string(),
            kind: HPA_KIND.to_string(),
            metadata,
            spec,
        }
    }
}
