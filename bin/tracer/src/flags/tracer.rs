use alloy_primitives::Address;
use clap::Args;
use mevtrace_core::{FLASHBOTS_RELAY_ADDRESS, TracerConfig};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    time::Duration,
};
use url::Url;

/// Tracer configuration arguments.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct TracerArgs {
    /// HTTP endpoint of a node serving `trace_block`.
    #[arg(long = "rpc-endpoint", env = "RPC_ENDPOINT")]
    pub(crate) rpc_endpoint: Url,

    /// Directory of the ledger database.
    #[arg(long, env = "DATADIR", default_value = "mevtrace-data")]
    pub(crate) datadir: PathBuf,

    /// IP address the query API listens on.
    #[arg(long = "rpc.addr", env = "RPC_ADDR", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub(crate) rpc_address: IpAddr,

    /// Port the query API listens on.
    #[arg(long = "rpc.port", env = "RPC_PORT", default_value_t = 8080)]
    pub(crate) rpc_port: u16,

    /// Seconds between two catch-up passes.
    #[arg(
        long = "poll-interval",
        env = "POLL_INTERVAL",
        default_value_t = TracerConfig::DEFAULT_POLL_INTERVAL.as_secs()
    )]
    pub(crate) poll_interval: u64,

    /// Timeout of a single chain RPC call, in seconds.
    #[arg(
        long = "call-timeout",
        env = "CALL_TIMEOUT",
        default_value_t = TracerConfig::DEFAULT_CALL_TIMEOUT.as_secs()
    )]
    pub(crate) call_timeout: u64,

    /// Lowest block number the tracer starts from.
    #[arg(
        long = "floor-block",
        env = "FLOOR_BLOCK",
        default_value_t = TracerConfig::DEFAULT_FLOOR_BLOCK
    )]
    pub(crate) floor_block: u64,

    /// Proposer address flagged as a known relay.
    #[arg(long = "relay-address", env = "RELAY_ADDRESS", default_value_t = FLASHBOTS_RELAY_ADDRESS)]
    pub(crate) relay_address: Address,

    /// Retries of a skipped block before it is given up. `0` disables retries.
    #[arg(
        long = "max-block-retries",
        env = "MAX_BLOCK_RETRIES",
        default_value_t = TracerConfig::DEFAULT_MAX_BLOCK_RETRIES
    )]
    pub(crate) max_block_retries: u32,
}

impl TracerArgs {
    /// Builds the [`TracerConfig`] of the pipeline.
    pub(crate) const fn tracer_config(&self) -> TracerConfig {
        TracerConfig {
            call_timeout: Duration::from_secs(self.call_timeout),
            poll_interval: Duration::from_secs(self.poll_interval),
            floor_block: self.floor_block,
            relay_address: self.relay_address,
            max_block_retries: self.max_block_retries,
        }
    }

    /// Socket address of the query API.
    pub(crate) const fn rpc_socket(&self) -> SocketAddr {
        SocketAddr::new(self.rpc_address, self.rpc_port)
    }
}
