use crate::{
    db_types::{NewOrder, Order, Pagination},
    traits::StoreError,
};

#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Stores a new pending order. Returns [`StoreError::OrderAlreadyExists`] if an order for the same transaction is
    /// already on record.
    async fn insert_pending_order(&self, order: NewOrder) -> Result<Order, StoreError>;

    async fn fetch_order_by_tx(&self, txid: &str) -> Result<Option<Order>, StoreError>;

    /// Orders of `asset` sent from or to `address`, newest first.
    async fn fetch_orders_for_address(
        &self,
        address: &str,
        asset: &str,
        page: Pagination,
    ) -> Result<Vec<Order>, StoreError>;
}
