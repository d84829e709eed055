use log::debug;
use sqlx::SqliteConnection;

use super::map_unique_violation;
use crate::{
    db_types::{NewWallet, Wallet},
    traits::StoreError,
};

pub async fn register_wallet(wallet: NewWallet, conn: &mut SqliteConnection) -> Result<Wallet, StoreError> {
    let address = wallet.address.clone();
    let wallet: Wallet = sqlx::query_as("INSERT INTO wallets (address, user_id) VALUES ($1, $2) RETURNING *")
        .bind(wallet.address)
        .bind(wallet.user_id)
        .fetch_one(conn)
        .await
        .map_err(|e| map_unique_violation(e, || StoreError::WalletAlreadyExists(address)))?;
    debug!("👛️ Wallet {} registered for user {}", wallet.address, wallet.user_id);
    Ok(wallet)
}

/// Deletes the wallet if it is registered to `user_id`. Returns true if a row was deleted.
pub async fn deregister_wallet(address: &str, user_id: &str, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM wallets WHERE address = $1 AND user_id = $2")
        .bind(address)
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn fetch_wallet(address: &str, conn: &mut SqliteConnection) -> Result<Option<Wallet>, sqlx::Error> {
    let wallet = sqlx::query_as("SELECT * FROM wallets WHERE address = $1").bind(address).fetch_optional(conn).await?;
    Ok(wallet)
}

/// True if at least one of the two addresses is a registered wallet.
pub async fn is_either_registered(a: &str, b: &str, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wallets WHERE address = $1 OR address = $2")
        .bind(a)
        .bind(b)
        .fetch_one(conn)
        .await?;
    Ok(count > 0)
}
