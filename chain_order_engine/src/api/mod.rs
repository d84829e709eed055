//! # Chain order engine public API
//!
//! The API is modular, so that clients can pick the functionality they need:
//!
//! * [`confirmation_api`] applies chain confirmation events to the order table and notifies subscribers.
//! * [`order_api`] creates pending orders and answers order queries.
//! * [`wallet_api`] registers and removes user wallets.
//!
//! Every API is created by supplying a backend that implements the traits it requires:
//!
//! ```rust,ignore
//! use chain_order_engine::{OrderApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/chain_orders.db", 5).await?;
//! let api = OrderApi::new(db);
//! let confirmed = api.order_status("0x1234").await?;
//! ```
pub mod confirmation_api;
pub mod errors;
pub mod order_api;
pub mod wallet_api;
