//! Fleet node configuration CRD definitions
//!
//! Declared-state types for node configurations, usable both as a
//! Kubernetes custom resource and as plain values handed to the reconciler.

pub mod node_configuration;
pub mod provider;

pub use node_configuration::*;
pub use provider::*;
