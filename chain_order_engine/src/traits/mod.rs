//! # Backend contracts
//!
//! The traits in this module define what a storage backend must provide for the chain order engine. The engine APIs
//! in [`crate::api`] are generic over these traits, so a backend only has to implement the ones an API needs.
//!
//! * [`OrderReconciliation`] applies a chain confirmation to the order table in a single atomic transaction.
//! * [`OrderManagement`] creates pending orders and answers order queries.
//! * [`WalletManagement`] maintains the set of registered wallet addresses.
//! * [`ChainTxLedger`] gives access to the confirmed chain transactions written by the ingester.
mod chain_tx_ledger;
mod order_management;
mod order_reconciliation;
mod store_error;
mod wallet_management;

pub use chain_tx_ledger::ChainTxLedger;
pub use order_management::OrderManagement;
pub use order_reconciliation::OrderReconciliation;
pub use store_error::StoreError;
pub use wallet_management::WalletManagement;
