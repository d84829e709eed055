//! Creation and lookup of orders.

use std::fmt::Debug;

use log::*;

use crate::{
    api::errors::{require_non_empty, ApiError},
    db_types::{NewOrder, Order, Pagination, MAX_PAGE_SIZE},
    traits::OrderManagement,
};

/// `OrderApi` lets users register pending orders and query the order history of an address.
pub struct OrderApi<B> {
    db: B,
}

impl<B: Debug> Debug for OrderApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderApi ({:?})", self.db)
    }
}

impl<B> OrderApi<B>
where B: OrderManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    /// Registers a pending order. The order is confirmed when the matching chain confirmation arrives.
    ///
    /// Every field is required. If an order for the same transaction already exists,
    /// [`crate::traits::StoreError::OrderAlreadyExists`] is returned.
    pub async fn create_order(&self, order: NewOrder) -> Result<Order, ApiError> {
        let missing = order.missing_fields();
        if !missing.is_empty() {
            return Err(ApiError::InvalidArgument(format!("missing fields: {}", missing.join(", "))));
        }
        let order = self.db.insert_pending_order(order).await?;
        info!("🧾️ Pending order for [{}] created. {} {} from {} to {}", order.tx, order.value, order.asset, order.from, order.to);
        Ok(order)
    }

    pub async fn fetch_order(&self, txid: &str) -> Result<Option<Order>, ApiError> {
        require_non_empty("tx", txid)?;
        let order = self.db.fetch_order_by_tx(txid).await?;
        Ok(order)
    }

    /// Returns whether the order for `txid` has been confirmed, or `None` if there is no such order.
    pub async fn order_status(&self, txid: &str) -> Result<Option<bool>, ApiError> {
        let order = self.fetch_order(txid).await?;
        Ok(order.map(|o| o.is_confirmed()))
    }

    /// Fetches a page of orders for `asset` where `address` is either the sender or the receiver. The newest orders
    /// come first.
    pub async fn orders_for_address(
        &self,
        address: &str,
        asset: &str,
        page: Pagination,
    ) -> Result<Vec<Order>, ApiError> {
        require_non_empty("address", address)?;
        require_non_empty("asset", asset)?;
        if !page.is_valid() {
            return Err(ApiError::InvalidArgument(format!("page size must be between 1 and {MAX_PAGE_SIZE}")));
        }
        trace!("🧾️ Fetching orders for {address} ({asset}), page {} of size {}", page.offset, page.size);
        let orders = self.db.fetch_orders_for_address(address, asset, page).await?;
        Ok(orders)
    }
}
