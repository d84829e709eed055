use std::fmt::Debug;

use log::*;

use crate::{
    api::errors::ConfirmationError,
    db_types::ConfirmOutcome,
    events::{EventProducers, OrderConfirmedEvent},
    traits::OrderReconciliation,
};

/// `ConfirmationApi` reconciles chain confirmation events with the order table.
///
/// A confirmation either completes an order that a user registered beforehand, or backfills a confirmed order for a
/// transfer that involves a registered wallet. Subscribers to the order-confirmed hook are told about every
/// confirmation that changed the order table.
pub struct ConfirmationApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for ConfirmationApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConfirmationApi")
    }
}

impl<B> ConfirmationApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> ConfirmationApi<B>
where B: OrderReconciliation
{
    /// Applies the confirmation of `txid`.
    ///
    /// Confirming the same transaction again is harmless: the second call reports
    /// [`ConfirmOutcome::AlreadyConfirmed`] and does not notify the subscribers a second time.
    ///
    /// Errors:
    /// * [`ConfirmationError::InvalidArgument`] if `txid` is empty. The backend is not consulted.
    /// * [`ConfirmationError::NotFound`] if the chain has no record of `txid`.
    /// * [`ConfirmationError::StoreFailure`] for any backend failure. Nothing is persisted in that case.
    pub async fn confirm(&self, txid: &str) -> Result<ConfirmOutcome, ConfirmationError> {
        if txid.trim().is_empty() {
            return Err(ConfirmationError::InvalidArgument("tx param can't be empty string".into()));
        }
        trace!("🔄️✅️ Handling confirmation for [{txid}]");
        let outcome = self.db.confirm_order(txid).await?;
        debug!("🔄️✅️ [{txid}] {outcome}");
        if outcome.is_mutation() {
            self.call_order_confirmed_hook(txid, outcome).await;
        }
        Ok(outcome)
    }

    async fn call_order_confirmed_hook(&self, txid: &str, outcome: ConfirmOutcome) {
        trace!("🔄️✅️ Notifying order confirmed hook subscribers");
        self.producers.publish_order_confirmed(OrderConfirmedEvent::new(txid, outcome)).await;
    }
}
