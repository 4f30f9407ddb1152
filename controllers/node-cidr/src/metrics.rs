//! Prometheus failure counters.
//!
//! Every failed reconciliation increments exactly one counter, selected by
//! the error's `FailureBucket`.

use crate::error::FailureBucket;
use prometheus::{Encoder, IntCounter, Opts, Registry, TextEncoder};

/// Receives one increment per classified failure.
pub trait FailureSink: Send + Sync {
    fn record(&self, bucket: FailureBucket);
}

/// The controller's metrics registry and its three failure counters.
#[derive(Clone)]
pub struct ControllerMetrics {
    registry: Registry,
    netbox_fails: IntCounter,
    netbox_result_fails: IntCounter,
    k8s_fails: IntCounter,
}

impl ControllerMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let netbox_fails = IntCounter::with_opts(Opts::new(
            "netbox_fails",
            "number of failed netbox requests",
        ))?;
        let netbox_result_fails = IntCounter::with_opts(Opts::new(
            "netbox_result_fails",
            "number of times netbox results are too few or too many",
        ))?;
        let k8s_fails = IntCounter::with_opts(Opts::new(
            "k8s_fails",
            "number of times k8s operations failed",
        ))?;

        registry.register(Box::new(netbox_fails.clone()))?;
        registry.register(Box::new(netbox_result_fails.clone()))?;
        registry.register(Box::new(k8s_fails.clone()))?;

        Ok(Self {
            registry,
            netbox_fails,
            netbox_result_fails,
            k8s_fails,
        })
    }

    fn counter(&self, bucket: FailureBucket) -> &IntCounter {
        match bucket {
            FailureBucket::RegistryTransport => &self.netbox_fails,
            FailureBucket::RegistryResult => &self.netbox_result_fails,
            FailureBucket::NodeUpdate => &self.k8s_fails,
        }
    }

    /// Current value of the counter for `bucket`
    pub fn count(&self, bucket: FailureBucket) -> u64 {
        self.counter(bucket).get()
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl FailureSink for ControllerMetrics {
    fn record(&self, bucket: FailureBucket) {
        self.counter(bucket).inc();
    }
}

impl std::fmt::Debug for ControllerMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerMetrics")
            .field("netbox_fails", &self.count(FailureBucket::RegistryTransport))
            .field("netbox_result_fails", &self.count(FailureBucket::RegistryResult))
            .field("k8s_fails", &self.count(FailureBucket::NodeUpdate))
            .finish()
    }
}
