//! `SqliteDatabase` is a concrete implementation of a chain order engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`crate::traits`]
//! module.
use std::fmt::Debug;

use log::*;
use sqlx::{migrate, SqlitePool};

use super::db::{chain_txs, db_url, new_pool, orders, wallets};
use crate::{
    db_types::{ChainTx, ConfirmOutcome, NewChainTx, NewOrder, NewWallet, Order, Pagination, Wallet},
    traits::{ChainTxLedger, OrderManagement, OrderReconciliation, StoreError, WalletManagement},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl OrderReconciliation for SqliteDatabase {
    async fn confirm_order(&self, txid: &str) -> Result<ConfirmOutcome, StoreError> {
        // Dropping `tx` without committing rolls back, so every early return below leaves the store untouched.
        let mut tx = self.pool.begin().await?;
        // The update is the first statement so that the write lock is taken before anything is read.
        let updated = orders::confirm_pending_from_chain(txid, &mut tx).await?;
        if updated > 0 {
            tx.commit().await?;
            debug!("🗃️ [{txid}] {updated} pending order(s) confirmed");
            return Ok(ConfirmOutcome::Updated(updated));
        }
        let records = chain_txs::fetch_chain_txs(txid, &mut tx).await?;
        if records.is_empty() {
            return Err(StoreError::ChainTxNotFound(txid.to_string()));
        }
        if orders::fetch_order_by_tx(txid, &mut tx).await?.is_some() {
            debug!("🗃️ [{txid}] The order is already confirmed. Nothing to do");
            tx.commit().await?;
            return Ok(ConfirmOutcome::AlreadyConfirmed);
        }
        trace!("🗃️ [{txid}] No order on record. Checking {} chain record(s) for registered wallets", records.len());
        let mut inserted = 0u64;
        for record in &records {
            let [from, to] = record.endpoints();
            if !wallets::is_either_registered(from, to, &mut tx).await? {
                trace!("🗃️ [{txid}] Neither {from} nor {to} is a registered wallet. Skipping chain record #{}", record.id);
                continue;
            }
            if orders::insert_confirmed(record, &mut tx).await? {
                inserted += 1;
            }
        }
        tx.commit().await?;
        if inserted > 0 {
            debug!("🗃️ [{txid}] {inserted} order(s) backfilled");
            Ok(ConfirmOutcome::Backfilled(inserted))
        } else {
            debug!("🗃️ [{txid}] No registered wallet is involved in this transfer");
            Ok(ConfirmOutcome::Irrelevant)
        }
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_pending_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::insert_pending(order, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Pending order #{} created for [{}]", order.id, order.tx);
        Ok(order)
    }

    async fn fetch_order_by_tx(&self, txid: &str) -> Result<Option<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_tx(txid, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_orders_for_address(
        &self,
        address: &str,
        asset: &str,
        page: Pagination,
    ) -> Result<Vec<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let orders = orders::fetch_orders_for_address(address, asset, page, &mut conn).await?;
        Ok(orders)
    }
}

impl WalletManagement for SqliteDatabase {
    async fn register_wallet(&self, wallet: NewWallet) -> Result<Wallet, StoreError> {
        let mut tx = self.pool.begin().await?;
        let wallet = wallets::register_wallet(wallet, &mut tx).await?;
        tx.commit().await?;
        Ok(wallet)
    }

    async fn deregister_wallet(&self, address: &str, user_id: &str) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;
        let deleted = wallets::deregister_wallet(address, user_id, &mut tx).await?;
        tx.commit().await?;
        Ok(deleted)
    }

    async fn fetch_wallet(&self, address: &str) -> Result<Option<Wallet>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let wallet = wallets::fetch_wallet(address, &mut conn).await?;
        Ok(wallet)
    }
}

impl ChainTxLedger for SqliteDatabase {
    async fn record_chain_tx(&self, tx: NewChainTx) -> Result<ChainTx, StoreError> {
        let mut db_tx = self.pool.begin().await?;
        let record = chain_txs::insert_chain_tx(tx, &mut db_tx).await?;
        db_tx.commit().await?;
        trace!("🗃️ Chain record #{} stored for [{}]", record.id, record.tx);
        Ok(record)
    }

    async fn fetch_chain_txs(&self, txid: &str) -> Result<Vec<ChainTx>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let records = chain_txs::fetch_chain_txs(txid, &mut conn).await?;
        Ok(records)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL in `COS_DATABASE_URL`.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date. Migrations that have already been applied are skipped.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
