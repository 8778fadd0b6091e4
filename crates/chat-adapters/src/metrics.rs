//! Intake counters exposed on `/metrics`.

use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct RejectionLabels {
    pub reason: String,
}

pub struct Metrics {
    registry: Registry,
    pub accepted: Counter,
    pub rejected: Family<RejectionLabels, Counter>,
    pub status_changes: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let accepted = Counter::default();
        registry.register(
            "hotline_submissions_accepted",
            "Submissions that produced a ticket",
            accepted.clone(),
        );

        let rejected = Family::<RejectionLabels, Counter>::default();
        registry.register(
            "hotline_submissions_rejected",
            "Submissions turned away by policy, by reason",
            rejected.clone(),
        );

        let status_changes = Counter::default();
        registry.register(
            "hotline_status_changes",
            "Applied ticket status transitions",
            status_changes.clone(),
        );

        Self { registry, accepted, rejected, status_changes }
    }

    pub fn record_rejection(&self, reason: &str) {
        self.rejected
            .get_or_create(&RejectionLabels { reason: reason.to_string() })
            .inc();
    }

    /// Renders the registry in the OpenMetrics text format.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        // Encoding into a String cannot fail in practice.
        let _ = encode(&mut out, &self.registry);
        out
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_encoded_output() {
        let metrics = Metrics::new();
        metrics.accepted.inc();
        metrics.record_rejection("rate-limited");

        let text = metrics.encode();
        assert!(text.contains("hotline_submissions_accepted_total 1"));
        assert!(text.contains("reason=\"rate-limited\""));
    }
}
