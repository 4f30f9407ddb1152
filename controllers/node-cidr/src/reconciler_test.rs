//! Unit tests for the node reconciler

#[cfg(test)]
mod tests {
    use crate::error::{ControllerError, FailureBucket, LookupContext, ResolutionError};
    use crate::reconciler::ReconcileOutcome;
    use crate::test_utils::*;
    use netbox_client::MockNetBoxClient;
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn netbox_with_device_node() -> MockNetBoxClient {
        let mock = MockNetBoxClient::new("http://test-netbox");
        let eth0 = mock.create_device_interface(42, "eth0");
        mock.create_ip_on_interface("10.0.0.5/24", &eth0, "node-a");
        let cbr0 = mock.create_device_interface(42, "cbr0");
        mock.create_ip_on_interface("10.0.1.5/24", &cbr0, "");
        mock
    }

    #[tokio::test]
    async fn test_node_with_pod_cidr_is_left_alone() {
        let netbox = netbox_with_device_node();
        let nodes = InMemoryNodeClient::with_nodes(&[("node-a", "10.99.0.0/24")]);
        let sink = RecordingSink::default();
        let reconciler = create_test_reconciler(&netbox, &nodes, &sink, TIMEOUT);

        let outcome = reconciler.reconcile_node("node-a").await.unwrap();

        assert_eq!(outcome, ReconcileOutcome::AlreadySet);
        assert!(netbox.calls().is_empty(), "guard must skip every registry call");
        assert!(nodes.patches().is_empty());
        assert_eq!(nodes.current("node-a").as_deref(), Some("10.99.0.0/24"));
        assert!(sink.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_empty_pod_cidr_is_assigned() {
        let netbox = netbox_with_device_node();
        let nodes = InMemoryNodeClient::with_nodes(&[("node-a", "")]);
        let sink = RecordingSink::default();
        let reconciler = create_test_reconciler(&netbox, &nodes, &sink, TIMEOUT);

        let outcome = reconciler.reconcile_node("node-a").await.unwrap();

        match outcome {
            ReconcileOutcome::Assigned(cidr) => assert_eq!(cidr.to_string(), "10.0.1.0/24"),
            other => panic!("expected Assigned, got {other:?}"),
        }
        assert_eq!(nodes.patches(), vec![("node-a".to_string(), "10.0.1.0/24".to_string())]);
        assert!(sink.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_second_pass_is_a_no_op() {
        let netbox = netbox_with_device_node();
        let nodes = InMemoryNodeClient::with_nodes(&[("node-a", "")]);
        let sink = RecordingSink::default();
        let reconciler = create_test_reconciler(&netbox, &nodes, &sink, TIMEOUT);

        reconciler.reconcile_node("node-a").await.unwrap();
        netbox.clear_calls();
        let outcome = reconciler.reconcile_node("node-a").await.unwrap();

        assert_eq!(outcome, ReconcileOutcome::AlreadySet);
        assert!(netbox.calls().is_empty());
        assert_eq!(nodes.patches().len(), 1);
    }

    #[tokio::test]
    async fn test_cardinality_failure_counts_as_result_failure() {
        let netbox = netbox_with_device_node();
        let nodes = InMemoryNodeClient::with_nodes(&[("node-z", "")]);
        let sink = RecordingSink::default();
        let reconciler = create_test_reconciler(&netbox, &nodes, &sink, TIMEOUT);

        let result = reconciler.reconcile_node("node-z").await;

        assert!(matches!(
            result,
            Err(ControllerError::Resolution(ResolutionError::AddressCardinality {
                context: LookupContext::Hostname,
                got: 0,
                ..
            }))
        ));
        assert_eq!(sink.recorded(), vec![FailureBucket::RegistryResult]);
        assert!(nodes.patches().is_empty());
    }

    #[tokio::test]
    async fn test_registry_outage_counts_as_transport_failure() {
        let netbox = netbox_with_device_node();
        netbox.fail_with("connection refused");
        let nodes = InMemoryNodeClient::with_nodes(&[("node-a", "")]);
        let sink = RecordingSink::default();
        let reconciler = create_test_reconciler(&netbox, &nodes, &sink, TIMEOUT);

        let result = reconciler.reconcile_node("node-a").await;

        assert!(matches!(
            result,
            Err(ControllerError::Resolution(ResolutionError::RegistryUnavailable(_)))
        ));
        assert_eq!(sink.recorded(), vec![FailureBucket::RegistryTransport]);
    }

    #[tokio::test]
    async fn test_deadline_counts_as_transport_failure() {
        let netbox = netbox_with_device_node();
        netbox.hang_requests();
        let nodes = InMemoryNodeClient::with_nodes(&[("node-a", "")]);
        let sink = RecordingSink::default();
        let reconciler = create_test_reconciler(&netbox, &nodes, &sink, Duration::from_millis(20));

        let result = reconciler.reconcile_node("node-a").await;

        assert!(matches!(result, Err(ControllerError::Resolution(ResolutionError::Cancelled))));
        assert_eq!(sink.recorded(), vec![FailureBucket::RegistryTransport]);
        assert!(nodes.patches().is_empty());
    }

    #[tokio::test]
    async fn test_missing_node_counts_as_node_failure() {
        let netbox = netbox_with_device_node();
        let nodes = InMemoryNodeClient::default();
        let sink = RecordingSink::default();
        let reconciler = create_test_reconciler(&netbox, &nodes, &sink, TIMEOUT);

        let result = reconciler.reconcile_node("node-a").await;

        assert!(matches!(result, Err(ControllerError::Kube(_))));
        assert_eq!(sink.recorded(), vec![FailureBucket::NodeUpdate]);
        assert!(netbox.calls().is_empty());
    }

    #[tokio::test]
    async fn test_patch_failure_counts_as_node_failure() {
        let netbox = netbox_with_device_node();
        let nodes = InMemoryNodeClient::with_nodes(&[("node-a", "")]);
        nodes.fail_patches();
        let sink = RecordingSink::default();
        let reconciler = create_test_reconciler(&netbox, &nodes, &sink, TIMEOUT);

        let result = reconciler.reconcile_node("node-a").await;

        assert!(matches!(result, Err(ControllerError::Kube(_))));
        assert_eq!(sink.recorded(), vec![FailureBucket::NodeUpdate]);
        assert_eq!(nodes.current("node-a").as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_retry_delay_resets_after_success() {
        let netbox = MockNetBoxClient::new("http://test-netbox");
        let nodes = InMemoryNodeClient::with_nodes(&[("node-a", "")]);
        let sink = RecordingSink::default();
        let reconciler = create_test_reconciler(&netbox, &nodes, &sink, TIMEOUT);

        assert!(reconciler.reconcile_node("node-a").await.is_err());
        assert_eq!(reconciler.retry_delay("node-a"), Duration::from_secs(60));
        assert_eq!(reconciler.retry_delay("node-a"), Duration::from_secs(60));
        assert_eq!(reconciler.retry_delay("node-a"), Duration::from_secs(120));

        // NetBox catches up with the node
        let eth0 = netbox.create_device_interface(42, "eth0");
        netbox.create_ip_on_interface("10.0.0.5/24", &eth0, "node-a");
        let cbr0 = netbox.create_device_interface(42, "cbr0");
        netbox.create_ip_on_interface("10.0.1.5/24", &cbr0, "");
        assert!(reconciler.reconcile_node("node-a").await.is_ok());

        assert_eq!(reconciler.retry_delay("node-a"), Duration::from_secs(60));
    }
}
