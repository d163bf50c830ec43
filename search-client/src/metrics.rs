//! Request metrics collected by every search client.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde::Serialize;

/// Point-in-time copy of a client's request counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Requests sent, successful or not.
    pub requests: u64,
    /// Requests that failed before a response was received.
    pub failures: u64,
    /// Responses received, keyed by HTTP status code.
    pub responses: BTreeMap<u16, u64>,
}

#[derive(Debug, Default)]
pub(crate) struct Metrics {
    requests: AtomicU64,
    failures: AtomicU64,
    responses: Mutex<BTreeMap<u16, u64>>,
}

impl Metrics {
    pub(crate) fn record_response(&self, status: u16) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        // A poisoned map still holds valid counts.
        let mut responses = self
            .responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *responses.entry(status).or_insert(0) += 1;
    }

    pub(crate) fn record_failure(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> MetricsSnapshot {
        let responses = self
            .responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            responses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_counts_responses_and_failures() {
        let metrics = Metrics::default();
        metrics.record_response(200);
        metrics.record_response(200);
        metrics.record_response(404);
        metrics.record_failure();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests, 4);
        assert_eq!(snapshot.failures, 1);
        assert_eq!(snapshot.responses.get(&200), Some(&2));
        assert_eq!(snapshot.responses.get(&404), Some(&1));
    }

    #[test]
    fn test_snapshot_serializes() {
        let metrics = Metrics::default();
        metrics.record_response(201);

        let value = serde_json::to_value(metrics.snapshot()).unwrap();
        assert_eq!(
            value,
            json!({ "requests": 1, "failures": 0, "responses": { "201": 1 } })
        );
    }
}
