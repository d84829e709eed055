use chain_order_engine::{
    db_types::{NewOrder, NewWallet, Order, Pagination, Wallet},
    OrderManagement,
    StoreError,
    WalletManagement,
};
use mockall::mock;

mock! {
    pub OrderStore {}
    impl OrderManagement for OrderStore {
        async fn insert_pending_order(&self, order: NewOrder) -> Result<Order, StoreError>;
        async fn fetch_order_by_tx(&self, txid: &str) -> Result<Option<Order>, StoreError>;
        async fn fetch_orders_for_address(&self, address: &str, asset: &str, page: Pagination) -> Result<Vec<Order>, StoreError>;
    }
}

mock! {
    pub WalletStore {}
    impl WalletManagement for WalletStore {
        async fn register_wallet(&self, wallet: NewWallet) -> Result<Wallet, StoreError>;
        async fn deregister_wallet(&self, address: &str, user_id: &str) -> Result<bool, StoreError>;
        async fn fetch_wallet(&self, address: &str) -> Result<Option<Wallet>, StoreError>;
    }
}
