//! Chain Order Engine
//!
//! The chain order engine keeps a table of user-facing orders in step with the transfers that have been confirmed
//! on chain. It is transport-agnostic: whatever delivers the confirmation events (a message queue, an HTTP call, a
//! test harness) hands the transaction id to [`ConfirmationApi::confirm`], and the engine does the rest.
//!
//! The library is divided into these sections:
//! 1. Storage ([`traits`]). A backend implements the traits in this module to act as the store for the engine.
//!    SQLite is the supported backend ([`SqliteDatabase`]). The data types that cross the storage boundary live in
//!    [`db_types`].
//! 2. The public API ([`api`]). Confirmation handling, order lookups and wallet registration.
//! 3. Events ([`events`]). Subscribers are told when a confirmation changed the order table. This is how the
//!    notification pipeline hooks in.
pub mod api;
pub mod db_types;
pub mod events;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use api::{
    confirmation_api::ConfirmationApi,
    errors::{ApiError, ConfirmationError},
    order_api::OrderApi,
    wallet_api::WalletApi,
};
#[cfg(feature = "sqlite")]
pub use sqlite::{db::db_url, SqliteDatabase};
pub use traits::{ChainTxLedger, OrderManagement, OrderReconciliation, StoreError, WalletManagement};
