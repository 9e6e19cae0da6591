//! Error types for node configuration reconciliation.
//!
//! `ReconcileError` is the taxonomy surfaced by the reconciler itself;
//! `ControllerError` wraps it for the Kubernetes host binary.

use fleet_client::FleetError;
use kube::Error as KubeError;
use thiserror::Error;

/// Errors produced by a reconciler operation.
///
/// `Validation` and `ConfigParse` are detected before any network call.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Declared input has the wrong shape or is out of range
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// An embedded JSON document could not be parsed into an object
    #[error("Invalid JSON in {field}: {message}")]
    ConfigParse { field: &'static str, message: String },

    /// The fleet API answered with a non-success status
    #[error("Fleet API error: {status} - {body}")]
    RemoteApi { status: u16, body: String },

    /// The server disagrees with a write it just acknowledged
    #[error("Consistency error: {0}")]
    Consistency(String),

    /// The server returned something its contract rules out
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Import could not resolve a name to a configuration
    #[error("Node configuration not found: {0}")]
    NotFound(String),

    /// The request never produced an HTTP response, or the response was unreadable
    #[error("Transport error: {0}")]
    Transport(#[source] FleetError),

    /// The caller's deadline passed before the remote call finished
    #[error("{operation} exceeded its deadline")]
    DeadlineExceeded { operation: &'static str },
}

impl ReconcileError {
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ReconcileError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for errors raised before anything was sent to the fleet API.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ReconcileError::Validation { .. } | ReconcileError::ConfigParse { .. }
        )
    }

    /// True when the fleet API answered 404.
    pub fn is_remote_not_found(&self) -> bool {
        matches!(self, ReconcileError::RemoteApi { status: 404, .. })
    }
}

impl From<FleetError> for ReconcileError {
    fn from(e: FleetError) -> Self {
        match e {
            FleetError::Api { status, body } => ReconcileError::RemoteApi { status, body },
            FleetError::NotFound { body } => ReconcileError::RemoteApi { status: 404, body },
            FleetError::InvalidRequest(message) => ReconcileError::validation("request", message),
            other => ReconcileError::Transport(other),
        }
    }
}

/// Errors that can occur in the node configuration controller binary.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// Fleet client could not be constructed
    #[error("Fleet client error: {0}")]
    Fleet(#[from] FleetError),

    /// Reconciliation failed
    #[error("Reconciliation failed: {0}")]
    Reconcile(#[from] ReconcileError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Resource watch failed
    #[error("Resource watch failed: {0}")]
    Watch(String),
}
