use crate::{db_types::ConfirmOutcome, traits::StoreError};

#[allow(async_fn_in_trait)]
pub trait OrderReconciliation {
    /// Applies the chain confirmation for `txid` to the order table. Every read and write happens inside one
    /// transaction, and nothing is persisted if any step fails.
    ///
    /// * Pending orders for `txid` receive the confirmation time and block height of the chain transaction.
    /// * If there are no pending orders, but a confirmed order for `txid` exists, nothing changes.
    /// * If there is no order at all, a confirmed order is inserted for every chain record of `txid` where the sender
    ///   or the recipient is a registered wallet.
    ///
    /// Returns [`StoreError::ChainTxNotFound`] if the chain has no record of `txid`.
    async fn confirm_order(&self, txid: &str) -> Result<ConfirmOutcome, StoreError>;
}
