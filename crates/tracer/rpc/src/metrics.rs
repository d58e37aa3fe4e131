use std::time::Duration;

/// Metrics of the query API.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Requests served, labelled by `method` and `outcome`.
    pub const RPC_REQUESTS_TOTAL: &'static str = "mevtrace_rpc_requests_total";
    /// Request latency, labelled by `method`.
    pub const RPC_REQUEST_DURATION_SECONDS: &'static str = "mevtrace_rpc_request_duration_seconds";

    pub(crate) const METHODS: [&'static str; 2] = ["mev_rpc_block", "mev_rpc_tx"];
    pub(crate) const OUTCOMES: [&'static str; 4] = ["found", "not_found", "invalid", "error"];

    /// Describes and zeroes every metric.
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    fn describe() {
        metrics::describe_counter!(
            Self::RPC_REQUESTS_TOTAL,
            metrics::Unit::Count,
            "Total number of query API requests",
        );

        metrics::describe_histogram!(
            Self::RPC_REQUEST_DURATION_SECONDS,
            metrics::Unit::Seconds,
            "Latency of query API requests",
        );
    }

    fn zero() {
        for method in Self::METHODS {
            for outcome in Self::OUTCOMES {
                metrics::counter!(
                    Self::RPC_REQUESTS_TOTAL,
                    "method" => method,
                    "outcome" => outcome,
                )
                .increment(0);
            }
        }
    }

    pub(crate) fn record_request(method: &'static str, outcome: &'static str, elapsed: Duration) {
        metrics::counter!(Self::RPC_REQUESTS_TOTAL, "method" => method, "outcome" => outcome)
            .increment(1);
        metrics::histogram!(Self::RPC_REQUEST_DURATION_SECONDS, "method" => method)
            .record(elapsed.as_secs_f64());
    }
}
