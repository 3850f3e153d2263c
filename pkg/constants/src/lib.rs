//! Centralized constants for the spin-kube project.
//!
//! All project-wide constant values live here.
//! Change a value in one place and it applies everywhere.

pub mod api;
pub mod network;
pub mod paths;
pub mod scaffold;
