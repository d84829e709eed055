//! The confirmation consumer loop.
//!
//! Events are handled strictly one at a time, in delivery order. Every event is committed once the engine has dealt
//! with it, whether or not the confirmation succeeded. Failed confirmations are not retried.
use chain_order_engine::{ConfirmationApi, OrderReconciliation};
use log::*;

use crate::source::{ConfirmationSource, SourceItem};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatcherSummary {
    /// Events that were handled, successfully or not
    pub processed: u64,
    pub failed: u64,
    pub source_errors: u64,
}

pub struct TxWatcher<S, B> {
    source: S,
    api: ConfirmationApi<B>,
}

impl<S, B> TxWatcher<S, B>
where
    S: ConfirmationSource,
    B: OrderReconciliation,
{
    pub fn new(source: S, api: ConfirmationApi<B>) -> Self {
        Self { source, api }
    }

    /// Runs until the source is exhausted.
    pub async fn run(mut self) -> WatcherSummary {
        let mut summary = WatcherSummary::default();
        info!("👀️ Transaction watcher started");
        while let Some(item) = self.source.next_item().await {
            match item {
                SourceItem::Event(event) => {
                    let txid = event.txid().into_owned();
                    trace!("👀️ Handling confirmation #{} for [{txid}]", event.offset());
                    match self.api.confirm(&txid).await {
                        Ok(outcome) => debug!("👀️ [{txid}] {outcome}"),
                        Err(e) if e.is_benign() => warn!("👀️ [{txid}] could not be confirmed. {e}"),
                        Err(e) => {
                            error!("👀️ [{txid}] could not be confirmed. {e}");
                            summary.failed += 1;
                        },
                    }
                    summary.processed += 1;
                    if let Err(e) = self.source.commit(event).await {
                        error!("👀️ Could not commit the confirmation for [{txid}]. {e}");
                    }
                },
                SourceItem::Error(e) => {
                    error!("👀️ Confirmation source error. {e}");
                    summary.source_errors += 1;
                },
            }
        }
        info!(
            "👀️ Confirmation source is exhausted. {} events processed, {} failed, {} source errors",
            summary.processed, summary.failed, summary.source_errors
        );
        summary
    }
}
