//! Server-side implementation of the [`MevApiServer`].

use crate::{BlockLookup, MevApiServer, Metrics};
use alloy_primitives::B256;
use async_trait::async_trait;
use jsonrpsee::{
    core::RpcResult,
    server::{ServerBuilder, ServerHandle},
    types::{ErrorObject, error::ErrorCode},
};
use mevtrace_storage::{LedgerReader, StorageError};
use mevtrace_types::{MevBlock, MevTransaction};
use std::{net::SocketAddr, sync::Arc, time::Instant};
use tracing::{debug, error, info, trace};

/// Answers [`MevApiServer`] requests from a [`LedgerReader`].
#[derive(Debug)]
pub struct MevRpc<R> {
    reader: Arc<R>,
}

impl<R> Clone for MevRpc<R> {
    fn clone(&self) -> Self {
        Self { reader: self.reader.clone() }
    }
}

impl<R> MevRpc<R>
where
    R: LedgerReader + Send + Sync + 'static,
{
    /// Creates a new [`MevRpc`] instance.
    pub fn new(reader: Arc<R>) -> Self {
        Metrics::init();
        trace!(target: "tracer::rpc", "Creating new MevRpc handler");
        Self { reader }
    }

    /// Binds the query API to `socket` and starts serving it.
    ///
    /// Returns the bound address, which differs from `socket` when port `0` is
    /// requested, and the handle used to stop the server.
    pub async fn launch(self, socket: SocketAddr) -> std::io::Result<(SocketAddr, ServerHandle)> {
        let server = ServerBuilder::default().build(socket).await?;
        let local_addr = server.local_addr()?;
        let handle = server.start(self.into_rpc());

        info!(target: "tracer::rpc", %local_addr, "Query API listening");
        Ok((local_addr, handle))
    }

    /// Turns a ledger lookup into a response, treating a missing entry as `null`.
    fn respond<T>(
        method: &'static str,
        started: Instant,
        result: Result<T, StorageError>,
    ) -> RpcResult<Option<T>> {
        let (outcome, response) = match result {
            Ok(found) => ("found", Ok(Some(found))),
            Err(StorageError::EntryNotFound(_)) => ("not_found", Ok(None)),
            Err(err) => {
                error!(target: "tracer::rpc", method, %err, "Ledger lookup failed");
                ("error", Err(ErrorObject::from(ErrorCode::InternalError)))
            }
        };

        Metrics::record_request(method, outcome, started.elapsed());
        response
    }
}

#[async_trait]
impl<R> MevApiServer for MevRpc<R>
where
    R: LedgerReader + Send + Sync + 'static,
{
    async fn block(&self, block: String) -> RpcResult<Option<MevBlock>> {
        const METHOD: &str = "mev_rpc_block";
        let started = Instant::now();
        trace!(target: "tracer::rpc", %block, "Received block request");

        let lookup = match block.parse::<BlockLookup>() {
            Ok(lookup) => lookup,
            Err(err) => {
                debug!(target: "tracer::rpc", %err, "Rejected block request");
                Metrics::record_request(METHOD, "invalid", started.elapsed());
                return Err(ErrorObject::owned(
                    ErrorCode::InvalidParams.code(),
                    err.to_string(),
                    None::<()>,
                ));
            }
        };

        let result = match lookup {
            BlockLookup::Number(block_number) => self.reader.get_block(block_number),
            BlockLookup::Hash(block_hash) => self.reader.get_block_by_hash(block_hash),
        };
        Self::respond(METHOD, started, result)
    }

    async fn transaction(&self, tx_hash: B256) -> RpcResult<Option<MevTransaction>> {
        let started = Instant::now();
        trace!(target: "tracer::rpc", %tx_hash, "Received transaction request");

        Self::respond("mev_rpc_tx", started, self.reader.get_transaction(tx_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MevApiClient;
    use alloy_primitives::{Address, U256};
    use jsonrpsee::{
        core::client::{ClientT, Error as ClientError},
        http_client::{HttpClient, HttpClientBuilder},
        rpc_params,
        types::error::{INTERNAL_ERROR_CODE, INVALID_PARAMS_CODE},
    };
    use std::collections::BTreeMap;

    const MINER: Address = Address::repeat_byte(0xaa);

    /// Reader over a fixed set of blocks.
    #[derive(Debug, Default)]
    struct StaticLedger {
        blocks: BTreeMap<u64, MevBlock>,
        broken: bool,
    }

    impl StaticLedger {
        fn check(&self) -> Result<(), StorageError> {
            if self.broken {
                return Err(StorageError::InvalidBlock("broken ledger".to_string()));
            }
            Ok(())
        }
    }

    impl LedgerReader for StaticLedger {
        fn get_block(&self, block_number: u64) -> Result<MevBlock, StorageError> {
            self.check()?;
            self.blocks
                .get(&block_number)
                .cloned()
                .ok_or_else(|| StorageError::EntryNotFound(format!("block {block_number}")))
        }

        fn get_block_by_hash(&self, block_hash: B256) -> Result<MevBlock, StorageError> {
            self.check()?;
            self.blocks
                .values()
                .find(|block| block.block_hash == block_hash)
                .cloned()
                .ok_or_else(|| StorageError::EntryNotFound(format!("block {block_hash}")))
        }

        fn get_transaction(&self, tx_hash: B256) -> Result<MevTransaction, StorageError> {
            self.check()?;
            self.blocks
                .values()
                .flat_map(|block| block.transactions.iter())
                .find(|tx| tx.tx_hash == tx_hash)
                .cloned()
                .ok_or_else(|| StorageError::EntryNotFound(format!("transaction {tx_hash}")))
        }
    }

    fn block(block_number: u64) -> MevBlock {
        let transaction = MevTransaction {
            block_number,
            tx_hash: B256::repeat_byte(0x11),
            from: Address::repeat_byte(0x01),
            to: MINER,
            value: U256::from(42),
        };
        MevBlock {
            block_number,
            block_hash: B256::repeat_byte(0xbb),
            miner: MINER,
            is_known_relay: false,
            total_value: U256::from(42),
            transactions: vec![transaction],
        }
    }

    async fn serve(ledger: StaticLedger) -> (HttpClient, ServerHandle) {
        let rpc = MevRpc::new(Arc::new(ledger));
        let (addr, handle) = rpc.launch(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
        let client = HttpClientBuilder::default().build(format!("http://{addr}")).unwrap();
        (client, handle)
    }

    fn stored() -> StaticLedger {
        StaticLedger { blocks: BTreeMap::from([(101, block(101))]), broken: false }
    }

    #[tokio::test]
    async fn test_block_by_number_and_hash() {
        let (client, handle) = serve(stored()).await;

        assert_eq!(client.block("101".to_string()).await.unwrap(), Some(block(101)));
        assert_eq!(
            client.block(B256::repeat_byte(0xbb).to_string()).await.unwrap(),
            Some(block(101))
        );
        assert_eq!(client.block("102".to_string()).await.unwrap(), None);
        assert_eq!(client.block(B256::repeat_byte(0xcc).to_string()).await.unwrap(), None);

        handle.stop().unwrap();
    }

    #[tokio::test]
    async fn test_transaction() {
        let (client, handle) = serve(stored()).await;

        let transaction = client.transaction(B256::repeat_byte(0x11)).await.unwrap().unwrap();
        assert_eq!(transaction.block_number, 101);
        assert_eq!(transaction.value, U256::from(42));
        assert_eq!(client.transaction(B256::repeat_byte(0x22)).await.unwrap(), None);

        handle.stop().unwrap();
    }

    #[tokio::test]
    async fn test_malformed_block_argument_is_invalid_params() {
        let (client, handle) = serve(stored()).await;

        for argument in ["abc", "0x1234", ""] {
            match client.block(argument.to_string()).await {
                Err(ClientError::Call(err)) => assert_eq!(err.code(), INVALID_PARAMS_CODE),
                other => panic!("unexpected response for {argument:?}: {other:?}"),
            }
        }

        handle.stop().unwrap();
    }

    #[tokio::test]
    async fn test_storage_error_is_internal_error() {
        let (client, handle) =
            serve(StaticLedger { blocks: BTreeMap::new(), broken: true }).await;

        match client.transaction(B256::repeat_byte(0x11)).await {
            Err(ClientError::Call(err)) => assert_eq!(err.code(), INTERNAL_ERROR_CODE),
            other => panic!("unexpected response: {other:?}"),
        }

        handle.stop().unwrap();
    }

    #[tokio::test]
    async fn test_wire_format() {
        let (client, handle) = serve(stored()).await;

        let response: serde_json::Value =
            client.request("mev_rpc_block", rpc_params!["101"]).await.unwrap();

        assert_eq!(response["blockNumber"], 101);
        assert_eq!(response["flashbot"], false);
        assert_eq!(response["totalMinerValue"], "42");
        assert_eq!(response["transactions"][0]["value"], "42");
        assert_eq!(response["transactions"][0]["txHash"], B256::repeat_byte(0x11).to_string());

        let missing: serde_json::Value =
            client.request("mev_rpc_block", rpc_params!["102"]).await.unwrap();
        assert!(missing.is_null());

        handle.stop().unwrap();
    }
}
