use log::{debug, trace};
use sqlx::SqliteConnection;

use super::map_unique_violation;
use crate::{
    db_types::{ChainTx, NewOrder, Order, Pagination},
    traits::StoreError,
};

/// Inserts a pending order. Fails with [`StoreError::OrderAlreadyExists`] if the transaction already has an order.
pub async fn insert_pending(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, StoreError> {
    let tx = order.tx.clone();
    let order = sqlx::query_as(
        r#"
            INSERT INTO orders (tx, from_address, to_address, asset, value, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *;
        "#,
    )
    .bind(order.tx)
    .bind(order.from)
    .bind(order.to)
    .bind(order.asset)
    .bind(order.value)
    .bind(order.created_at)
    .fetch_one(conn)
    .await
    .map_err(|e| map_unique_violation(e, || StoreError::OrderAlreadyExists(tx)))?;
    Ok(order)
}

/// Inserts a confirmed order copied from the chain record. The order is created and confirmed at the time the chain
/// transaction was created.
///
/// Returns `false` if an order for the transaction already exists, in which case nothing is written.
pub async fn insert_confirmed(chain_tx: &ChainTx, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
            INSERT INTO orders (tx, from_address, to_address, asset, value, created_at, confirm_time, block)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (tx) DO NOTHING;
        "#,
    )
    .bind(&chain_tx.tx)
    .bind(&chain_tx.from)
    .bind(&chain_tx.to)
    .bind(&chain_tx.asset)
    .bind(&chain_tx.value)
    .bind(chain_tx.created_at)
    .bind(chain_tx.created_at)
    .bind(chain_tx.block)
    .execute(conn)
    .await?;
    let inserted = result.rows_affected() > 0;
    if inserted {
        debug!("📝️ Order for [{}] backfilled from chain record #{}", chain_tx.tx, chain_tx.id);
    }
    Ok(inserted)
}

/// Confirms the pending orders for `txid`, taking the confirmation time and block height from the first chain record
/// for the transaction. Orders that are already confirmed, or that have no chain record yet, are left untouched.
/// Returns the number of orders that were updated.
pub async fn confirm_pending_from_chain(txid: &str, conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
            UPDATE orders SET
                confirm_time = (SELECT created_at FROM chain_txs WHERE tx = $1 ORDER BY id ASC LIMIT 1),
                block = (SELECT block FROM chain_txs WHERE tx = $1 ORDER BY id ASC LIMIT 1)
            WHERE tx = $1
              AND confirm_time IS NULL
              AND EXISTS (SELECT 1 FROM chain_txs WHERE tx = $1);
        "#,
    )
    .bind(txid)
    .execute(conn)
    .await?;
    trace!("📝️ {} pending order(s) confirmed for [{txid}]", result.rows_affected());
    Ok(result.rows_affected())
}

pub async fn fetch_order_by_tx(txid: &str, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE tx = $1").bind(txid).fetch_optional(conn).await?;
    Ok(order)
}

/// Fetches the orders for `asset` where `address` is the sender or the recipient, newest first.
pub async fn fetch_orders_for_address(
    address: &str,
    asset: &str,
    page: Pagination,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, sqlx::Error> {
    let orders = sqlx::query_as(
        r#"
            SELECT * FROM orders
            WHERE (from_address = $1 OR to_address = $1) AND asset = $2
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
        "#,
    )
    .bind(address)
    .bind(asset)
    .bind(page.limit())
    .bind(page.skip())
    .fetch_all(conn)
    .await?;
    trace!("📝️ {} orders fetched for {address} ({asset})", orders.len());
    Ok(orders)
}
