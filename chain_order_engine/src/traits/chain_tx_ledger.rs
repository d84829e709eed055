use crate::{
    db_types::{ChainTx, NewChainTx},
    traits::StoreError,
};

#[allow(async_fn_in_trait)]
pub trait ChainTxLedger {
    /// Records a confirmed chain transaction. In production the chain ingester owns this table.
    async fn record_chain_tx(&self, tx: NewChainTx) -> Result<ChainTx, StoreError>;

    /// All chain records for `txid`, oldest first.
    async fn fetch_chain_txs(&self, txid: &str) -> Result<Vec<ChainTx>, StoreError>;
}
