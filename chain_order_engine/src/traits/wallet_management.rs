use crate::{
    db_types::{NewWallet, Wallet},
    traits::StoreError,
};

#[allow(async_fn_in_trait)]
pub trait WalletManagement {
    /// Registers the address for the user. Returns [`StoreError::WalletAlreadyExists`] if the address is taken.
    async fn register_wallet(&self, wallet: NewWallet) -> Result<Wallet, StoreError>;

    /// Removes the registration. Returns false if the address was not registered to this user.
    async fn deregister_wallet(&self, address: &str, user_id: &str) -> Result<bool, StoreError>;

    async fn fetch_wallet(&self, address: &str) -> Result<Option<Wallet>, StoreError>;
}
