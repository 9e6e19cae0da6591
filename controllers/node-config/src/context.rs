//! Per-invocation operation context.
//!
//! The caller decides how long an operation may take; the reconciler wraps
//! every remote call in the same deadline and never retries. Dropping the
//! operation future cancels whatever call is in flight.

use crate::error::ReconcileError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Deadline shared by all remote calls of one reconciler operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationContext {
    deadline: Option<Instant>,
}

impl OperationContext {
    /// Calls must finish within `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Calls must finish before `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    /// No deadline; only the HTTP client's own timeout applies.
    pub fn unbounded() -> Self {
        Self { deadline: None }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Run one remote call under this context's deadline.
    pub async fn guard<F>(&self, operation: &'static str, call: F) -> Result<F::Output, ReconcileError>
    where
        F: Future,
    {
        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, call)
                .await
                .map_err(|_elapsed| ReconcileError::DeadlineExceeded { operation }),
            None => Ok(call.await),
        }
    }
}
