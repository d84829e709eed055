use sqlx::SqliteConnection;

use crate::db_types::{ChainTx, NewChainTx};

pub async fn insert_chain_tx(tx: NewChainTx, conn: &mut SqliteConnection) -> Result<ChainTx, sqlx::Error> {
    let record = sqlx::query_as(
        r#"
            INSERT INTO chain_txs (tx, from_address, to_address, asset, value, block, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(tx.tx)
    .bind(tx.from)
    .bind(tx.to)
    .bind(tx.asset)
    .bind(tx.value)
    .bind(tx.block)
    .bind(tx.created_at)
    .fetch_one(conn)
    .await?;
    Ok(record)
}

/// Returns every chain record for `txid`, in the order they were ingested.
pub async fn fetch_chain_txs(txid: &str, conn: &mut SqliteConnection) -> Result<Vec<ChainTx>, sqlx::Error> {
    let records = sqlx::query_as("SELECT * FROM chain_txs WHERE tx = $1 ORDER BY id ASC").bind(txid).fetch_all(conn).await?;
    Ok(records)
}
