//! Kubernetes resource types produced and consumed by spin-kube.
//!
//! Field names follow the API server's camelCase wire format so the same
//! structs serve both for rendering manifests and for decoding live objects.

pub mod app_manifest;
pub mod config;
pub mod hpa;
pub mod keda;
pub mod manifest;
pub mod meta;
pub mod pod;
pub mod secret;
pub mod spinapp;
pub mod validate;
