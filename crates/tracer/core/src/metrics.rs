/// Metrics of the catch-up pipeline.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Blocks committed to the ledger.
    pub const BLOCKS_COMMITTED_TOTAL: &'static str = "mevtrace_blocks_committed_total";
    /// Blocks processed without any transfer to their proposer.
    pub const BLOCKS_WITHOUT_TRANSFERS_TOTAL: &'static str =
        "mevtrace_blocks_without_transfers_total";
    /// Blocks skipped because a step failed, labelled by `reason`.
    pub const BLOCKS_SKIPPED_TOTAL: &'static str = "mevtrace_blocks_skipped_total";
    /// Matching trace entries dropped as malformed or overflowing.
    pub const TRACE_ENTRIES_DROPPED_TOTAL: &'static str = "mevtrace_trace_entries_dropped_total";
    /// Skipped blocks given up after exhausting their retries.
    pub const BLOCKS_DEAD_LETTERED_TOTAL: &'static str = "mevtrace_blocks_dead_lettered_total";
    /// Last observed chain head.
    pub const CHAIN_HEAD: &'static str = "mevtrace_chain_head";
    /// Last observed ledger high-water mark.
    pub const HIGH_WATER_MARK: &'static str = "mevtrace_high_water_mark";

    /// Describes and zeroes every metric.
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    fn describe() {
        metrics::describe_counter!(
            Self::BLOCKS_COMMITTED_TOTAL,
            metrics::Unit::Count,
            "Total number of blocks committed to the ledger",
        );

        metrics::describe_counter!(
            Self::BLOCKS_WITHOUT_TRANSFERS_TOTAL,
            metrics::Unit::Count,
            "Total number of blocks without transfers to their proposer",
        );

        metrics::describe_counter!(
            Self::BLOCKS_SKIPPED_TOTAL,
            metrics::Unit::Count,
            "Total number of blocks skipped because of a failure",
        );

        metrics::describe_counter!(
            Self::TRACE_ENTRIES_DROPPED_TOTAL,
            metrics::Unit::Count,
            "Total number of malformed transfers to a proposer",
        );

        metrics::describe_counter!(
            Self::BLOCKS_DEAD_LETTERED_TOTAL,
            metrics::Unit::Count,
            "Total number of skipped blocks that ran out of retries",
        );

        metrics::describe_gauge!(Self::CHAIN_HEAD, "Last observed chain head block number");

        metrics::describe_gauge!(Self::HIGH_WATER_MARK, "Highest block number held by the ledger");
    }

    fn zero() {
        metrics::counter!(Self::BLOCKS_COMMITTED_TOTAL).increment(0);
        metrics::counter!(Self::BLOCKS_WITHOUT_TRANSFERS_TOTAL).increment(0);
        for reason in ["trace", "header", "commit"] {
            metrics::counter!(Self::BLOCKS_SKIPPED_TOTAL, "reason" => reason).increment(0);
        }
        metrics::counter!(Self::TRACE_ENTRIES_DROPPED_TOTAL).increment(0);
        metrics::counter!(Self::BLOCKS_DEAD_LETTERED_TOTAL).increment(0);
        metrics::gauge!(Self::CHAIN_HEAD).set(0.0);
        metrics::gauge!(Self::HIGH_WATER_MARK).set(0.0);
    }

    pub(crate) fn record_committed_block() {
        metrics::counter!(Self::BLOCKS_COMMITTED_TOTAL).increment(1);
    }

    pub(crate) fn record_block_without_transfers() {
        metrics::counter!(Self::BLOCKS_WITHOUT_TRANSFERS_TOTAL).increment(1);
    }

    pub(crate) fn record_skipped_block(reason: &'static str) {
        metrics::counter!(Self::BLOCKS_SKIPPED_TOTAL, "reason" => reason).increment(1);
    }

    pub(crate) fn record_dropped_entry() {
        metrics::counter!(Self::TRACE_ENTRIES_DROPPED_TOTAL).increment(1);
    }

    pub(crate) fn record_dead_lettered_block() {
        metrics::counter!(Self::BLOCKS_DEAD_LETTERED_TOTAL).increment(1);
    }

    pub(crate) fn record_positions(head: u64, high_water_mark: u64) {
        metrics::gauge!(Self::CHAIN_HEAD).set(head as f64);
        metrics::gauge!(Self::HIGH_WATER_MARK).set(high_water_mark as f64);
    }
}
