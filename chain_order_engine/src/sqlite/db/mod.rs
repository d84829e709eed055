//! # SQLite Database methods
//!
//! This module contains "low-level" SQLite database interactions.
//!
//! All these interactions are simple functions (rather than stateful structs) that accept a `&mut SqliteConnection`
//! argument. Callers can obtain a connection from a pool, or open an atomic transaction as the need arises and call
//! through to the functions without any other changes.
use std::env;

use log::info;
use sqlx::{sqlite::SqlitePoolOptions, Error as SqlxError, SqlitePool};

pub mod chain_txs;
pub mod orders;
pub mod wallets;

const SQLITE_DB_URL: &str = "sqlite://data/chain_orders.db";

pub fn db_url() -> String {
    let result = env::var("COS_DATABASE_URL").unwrap_or_else(|_| {
        info!("COS_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}

/// Maps a unique-constraint violation to the given error, and any other driver error to [`StoreError::DriverError`].
pub(crate) fn map_unique_violation<F>(e: SqlxError, f: F) -> crate::traits::StoreError
where F: FnOnce() -> crate::traits::StoreError {
    match e {
        SqlxError::Database(err) if err.is_unique_violation() => f(),
        _ => crate::traits::StoreError::from(e),
    }
}
