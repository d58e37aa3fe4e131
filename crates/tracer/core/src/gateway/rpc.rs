use crate::{ChainGateway, GatewayError};
use alloy_primitives::B256;
use alloy_rpc_client::RpcClient;
use alloy_transport::TransportResult;
use async_trait::async_trait;
use mevtrace_types::{BlockHeader, TraceEntry, parse_hex_u64};
use std::{future::IntoFuture, time::Duration};
use tracing::{debug, trace};

/// [`ChainGateway`] backed by an alloy [`RpcClient`].
#[derive(Debug, Clone)]
pub struct RpcGateway {
    /// The Alloy RPC client for the traced chain.
    rpc_client: RpcClient,
    /// Upper bound for every call.
    call_timeout: Duration,
}

impl RpcGateway {
    /// Creates a new [`RpcGateway`] instance.
    pub const fn new(rpc_client: RpcClient, call_timeout: Duration) -> Self {
        Self { rpc_client, call_timeout }
    }

    /// Awaits an RPC call, bounded by the configured timeout.
    async fn call<T>(
        &self,
        method: &'static str,
        call: impl IntoFuture<Output = TransportResult<T>>,
    ) -> Result<T, GatewayError> {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| GatewayError::Timeout { method, timeout: self.call_timeout })?
            .map_err(|source| GatewayError::Transport { method, source })
    }
}

#[async_trait]
impl ChainGateway for RpcGateway {
    async fn head_block_number(&self) -> Result<u64, GatewayError> {
        const METHOD: &str = "eth_blockNumber";

        let raw: String =
            self.call(METHOD, self.rpc_client.request_noparams::<String>(METHOD)).await?;
        let head = parse_hex_u64(&raw)
            .map_err(|source| GatewayError::InvalidQuantity { method: METHOD, source })?;

        trace!(target: "tracer::gateway", head, "Fetched chain head");
        Ok(head)
    }

    async fn trace_block(&self, block_number: u64) -> Result<Vec<TraceEntry>, GatewayError> {
        const METHOD: &str = "trace_block";

        let entries: Option<Vec<TraceEntry>> = self
            .call(
                METHOD,
                self.rpc_client
                    .request::<_, Option<Vec<TraceEntry>>>(METHOD, (format!("{block_number:#x}"),)),
            )
            .await?;

        let entries = entries.unwrap_or_default();
        if entries.is_empty() {
            return Err(GatewayError::EmptyBlock(block_number));
        }

        debug!(
            target: "tracer::gateway",
            block_number,
            entries = entries.len(),
            "Fetched block trace"
        );
        Ok(entries)
    }

    async fn block_header(&self, block_hash: B256) -> Result<BlockHeader, GatewayError> {
        const METHOD: &str = "eth_getBlockByHash";

        let header: Option<BlockHeader> = self
            .call(
                METHOD,
                self.rpc_client.request::<_, Option<BlockHeader>>(METHOD, (block_hash, false)),
            )
            .await?;

        header.ok_or(GatewayError::BlockNotFound(block_hash))
    }
}
