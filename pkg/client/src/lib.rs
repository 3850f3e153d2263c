//! Thin Kubernetes API client for the live-cluster verbs.
//!
//! Only the handful of calls `deploy`, `get`, `list` and `logs` need are
//! implemented, directly over `reqwest`.

pub mod apply;
pub mod client;
pub mod printer;

pub use apply::{ManifestApplier, apply_manifest};
pub use client::{ClientConfig, ClusterClient, LogOptions, resource_path};
pub use printer::print_apps;
