//! Tunables of the catch-up pipeline.

use alloy_primitives::{Address, address};
use std::time::Duration;

/// Address of the Flashbots relay coinbase.
pub const FLASHBOTS_RELAY_ADDRESS: Address = address!("dafea492d9c6733ae3d56b7ed1adb60692c98bc5");

/// Configuration of the tracer pipeline.
///
/// Passed by value at construction time; nothing in the pipeline reads global
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracerConfig {
    /// Upper bound for every single chain RPC call.
    pub call_timeout: Duration,
    /// Idle time between two catch-up passes.
    pub poll_interval: Duration,
    /// Lowest block number catch-up ever starts from.
    pub floor_block: u64,
    /// Proposer address flagged as a known relay.
    pub relay_address: Address,
    /// How often a skipped block is retried before it is given up.
    /// `0` disables retries.
    pub max_block_retries: u32,
}

impl TracerConfig {
    /// Default timeout of a chain RPC call.
    pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default interval between catch-up passes.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(6);
    /// Default floor block.
    pub const DEFAULT_FLOOR_BLOCK: u64 = 21_000_000;
    /// Default number of retries per skipped block.
    pub const DEFAULT_MAX_BLOCK_RETRIES: u32 = 3;
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            call_timeout: Self::DEFAULT_CALL_TIMEOUT,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            floor_block: Self::DEFAULT_FLOOR_BLOCK,
            relay_address: FLASHBOTS_RELAY_ADDRESS,
            max_block_retries: Self::DEFAULT_MAX_BLOCK_RETRIES,
        }
    }
}
