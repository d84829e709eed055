//! Turns confirmed orders into push notifications for the owners of the wallets involved.
use std::sync::Arc;

use chain_order_engine::{
    db_types::{Order, Wallet},
    OrderManagement,
    WalletManagement,
};
use cos_common::AssetNames;
use log::*;

use crate::push::{PushMessage, PushProducer};

pub struct Notifier<B> {
    db: B,
    assets: Arc<AssetNames>,
    queue: PushProducer,
}

impl<B> Notifier<B>
where B: OrderManagement + WalletManagement
{
    pub fn new(db: B, assets: Arc<AssetNames>, queue: PushProducer) -> Self {
        Self { db, assets, queue }
    }

    /// Queues a notification for each registered owner of the two endpoints of the order for `txid`.
    ///
    /// This never fails. Every problem is logged and the remaining work is skipped.
    pub async fn notify(&self, txid: &str) {
        let order = match self.db.fetch_order_by_tx(txid).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                warn!("🔔️ No order found for [{txid}]. Nothing to notify");
                return;
            },
            Err(e) => {
                error!("🔔️ Could not fetch the order for [{txid}]. {e}");
                return;
            },
        };
        let sender = self.wallet(&order.from).await;
        let recipient = self.wallet(&order.to).await;
        let messages = compose_messages(&order, sender.as_ref(), recipient.as_ref(), &self.assets);
        debug!("🔔️ {} notification(s) for [{txid}]", messages.len());
        for message in messages {
            if let Err(e) = self.queue.enqueue(message).await {
                error!("🔔️ Could not queue notification for [{txid}]. {e}");
                return;
            }
        }
    }

    async fn wallet(&self, address: &str) -> Option<Wallet> {
        match self.db.fetch_wallet(address).await {
            Ok(wallet) => wallet,
            Err(e) => {
                error!("🔔️ Could not fetch wallet {address}. {e}");
                None
            },
        }
    }
}

/// The outbound message goes to the owner of the sending wallet, the inbound message to the owner of the receiving
/// wallet. Endpoints that are not registered get no message.
pub fn compose_messages(
    order: &Order,
    sender: Option<&Wallet>,
    recipient: Option<&Wallet>,
    assets: &AssetNames,
) -> Vec<PushMessage> {
    let asset = assets.name_for(&order.asset);
    let outbound = sender.map(|w| {
        PushMessage::new(&w.user_id, format!("Transferred out {} {asset} to {}", order.value, order.to))
    });
    let inbound = recipient.map(|w| {
        PushMessage::new(&w.user_id, format!("Transferred in {} {asset} from {}", order.value, order.from))
    });
    outbound.into_iter().chain(inbound).collect()
}
