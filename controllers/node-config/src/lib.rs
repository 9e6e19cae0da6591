//! Declarative node configuration reconciler
//!
//! Converts a declared `NodeConfigurationSpec` into calls against the
//! fleet-management API and maps the responses back:
//! - `codec`: provider variant (EKS, AKS, KOPS, GKE) encoding and decoding
//! - `translator`: full declared shape to and from request/response bodies
//! - `reconciler`: create, read, update, delete and import
//! - `import`: resolves `<clusterId>/<nameOrId>` import keys

pub mod backoff;
pub mod changes;
pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod host;
pub mod import;
pub mod reconciler;
pub mod translator;
pub mod validation;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod translator_test;

pub use context::OperationContext;
pub use error::{ControllerError, ReconcileError};
pub use reconciler::{
    Applied, DeleteOutcome, ImportedConfiguration, ReadOutcome, Reconciler, UpdateOutcome,
};
