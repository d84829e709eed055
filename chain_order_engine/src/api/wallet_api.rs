use std::fmt::Debug;

use log::*;

use crate::{
    api::errors::{require_non_empty, ApiError},
    db_types::{NewWallet, Wallet},
    traits::WalletManagement,
};

/// `WalletApi` manages the set of wallets whose chain activity is tracked.
pub struct WalletApi<B> {
    db: B,
}

impl<B: Debug> Debug for WalletApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WalletApi ({:?})", self.db)
    }
}

impl<B> WalletApi<B>
where B: WalletManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn register_wallet(&self, wallet: NewWallet) -> Result<Wallet, ApiError> {
        require_non_empty("address", &wallet.address)?;
        require_non_empty("userid", &wallet.user_id)?;
        let wallet = self.db.register_wallet(wallet).await?;
        info!("👛️ Wallet {} registered for user {}", wallet.address, wallet.user_id);
        Ok(wallet)
    }

    /// Removes the wallet registration. Returns `false` if `address` was not registered to `user_id`.
    pub async fn deregister_wallet(&self, address: &str, user_id: &str) -> Result<bool, ApiError> {
        require_non_empty("address", address)?;
        require_non_empty("userid", user_id)?;
        let deleted = self.db.deregister_wallet(address, user_id).await?;
        if deleted {
            info!("👛️ Wallet {address} deregistered for user {user_id}");
        } else {
            debug!("👛️ Wallet {address} is not registered to user {user_id}. Nothing deleted");
        }
        Ok(deleted)
    }

    pub async fn fetch_wallet(&self, address: &str) -> Result<Option<Wallet>, ApiError> {
        require_non_empty("address", address)?;
        let wallet = self.db.fetch_wallet(address).await?;
        Ok(wallet)
    }
}
