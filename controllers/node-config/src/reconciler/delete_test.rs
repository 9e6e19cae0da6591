//! Unit tests for Reconciler::delete

#[cfg(test)]
mod tests {
    use crate::context::OperationContext;
    use crate::error::ReconcileError;
    use crate::reconciler::DeleteOutcome;
    use crate::test_utils::*;
    use fleet_client::{Endpoint, sample_configuration};
    use std::time::Duration;

    #[tokio::test]
    async fn test_delete_existing() {
        let (mock, reconciler) = mock_reconciler();
        let id = mock.add_configuration("c1", sample_configuration("pool-a"));

        let outcome = reconciler.delete(&test_ctx(), "c1", &id).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert!(mock.configuration("c1", &id).is_none());

        let calls = mock.calls();
        assert_eq!((calls.get, calls.delete), (1, 1));
    }

    #[tokio::test]
    async fn test_delete_missing_is_silent_success() {
        let (mock, reconciler) = mock_reconciler();

        let outcome = reconciler.delete(&test_ctx(), "c1", "gone").await.unwrap();
        assert_eq!(outcome, DeleteOutcome::AlreadyAbsent);
        assert_eq!(mock.calls().delete, 0);
    }

    #[tokio::test]
    async fn test_delete_skips_protected_default() {
        let (mock, reconciler) = mock_reconciler();
        let mut stored = sample_configuration("default");
        stored.default = Some(true);
        let id = mock.add_configuration("c1", stored);

        let outcome = reconciler.delete(&test_ctx(), "c1", &id).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::ProtectedDefault);
        assert_eq!(mock.calls().delete, 0);
        assert!(mock.configuration("c1", &id).is_some());
    }

    #[tokio::test]
    async fn test_delete_failure_is_hard_error() {
        let (mock, reconciler) = mock_reconciler();
        let id = mock.add_configuration("c1", sample_configuration("pool-a"));
        mock.fail_endpoint(Endpoint::Delete, 500, "internal");

        let err = reconciler.delete(&test_ctx(), "c1", &id).await.unwrap_err();
        assert!(matches!(err, ReconcileError::RemoteApi { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_delete_lookup_failure_is_hard_error() {
        let (mock, reconciler) = mock_reconciler();
        mock.fail_endpoint(Endpoint::Get, 403, "forbidden");

        let err = reconciler.delete(&test_ctx(), "c1", "id-1").await.unwrap_err();
        assert!(matches!(err, ReconcileError::RemoteApi { status: 403, .. }));
        assert_eq!(mock.calls().delete, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_deadline_on_lookup_skips_delete() {
        let (mock, reconciler) = mock_reconciler();
        let id = mock.add_configuration("c1", sample_configuration("pool-a"));
        mock.delay_endpoint(Endpoint::Get, Duration::from_secs(30));
        let ctx = OperationContext::with_timeout(Duration::from_secs(5));

        let err = reconciler.delete(&ctx, "c1", &id).await.unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::DeadlineExceeded { operation: "delete" }
        ));
        assert_eq!(mock.calls().delete, 0);
        assert!(mock.configuration("c1", &id).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_deadline_on_delete_call() {
        let (mock, reconciler) = mock_reconciler();
        let id = mock.add_configuration("c1", sample_configuration("pool-a"));
        mock.delay_endpoint(Endpoint::Delete, Duration::from_secs(30));
        let ctx = OperationContext::with_timeout(Duration::from_secs(5));

        let err = reconciler.delete(&ctx, "c1", &id).await.unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::DeadlineExceeded { operation: "delete" }
        ));
        let calls = mock.calls();
        assert_eq!((calls.get, calls.delete), (1, 1));
        // The call was abandoned before the server applied it
        assert!(mock.configuration("c1", &id).is_some());
    }
}
