//! Engine events.
//!
//! Callers register hooks in an [`EventHooks`] registry, turn it into [`EventHandlers`], and hand the
//! [`EventProducers`] to the engine APIs. Every hook gets its own handler and channel, so a slow subscriber only
//! backs up its own queue.
use std::{future::Future, pin::Pin, sync::Arc};

use log::*;
use tokio::task::{JoinHandle, JoinSet};

mod channel;
mod event_types;

pub use channel::{EventHandler, EventProducer, Handler};
pub use event_types::*;

/// The hooks to run for each kind of engine event. Any number of hooks may subscribe to the same event.
#[derive(Default, Clone)]
pub struct EventHooks {
    order_confirmed: Vec<Handler<OrderConfirmedEvent>>,
}

impl EventHooks {
    pub fn on_order_confirmed<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(OrderConfirmedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.order_confirmed.push(Arc::new(f));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.order_confirmed.is_empty()
    }
}

/// The running side of [`EventHooks`].
pub struct EventHandlers {
    order_confirmed: Vec<EventHandler<OrderConfirmedEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let order_confirmed = hooks.order_confirmed.into_iter().map(|f| EventHandler::new(buffer_size, f)).collect();
        Self { order_confirmed }
    }

    pub fn producers(&self) -> EventProducers {
        EventProducers { order_confirmed: self.order_confirmed.iter().map(EventHandler::subscribe).collect() }
    }

    /// Runs every handler until all of their producers have been dropped and the outstanding events are handled.
    pub async fn run(self) {
        let mut handlers = JoinSet::new();
        for handler in self.order_confirmed {
            handlers.spawn(handler.start_handler());
        }
        debug!("📬️ {} event handler(s) running", handlers.len());
        while let Some(res) = handlers.join_next().await {
            if let Err(e) = res {
                error!("📬️ An event handler stopped unexpectedly: {e}");
            }
        }
    }

    pub fn start_handlers(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

/// Publishes engine events to every subscribed hook. The default value has no subscribers and discards events.
#[derive(Default, Clone)]
pub struct EventProducers {
    order_confirmed: Vec<EventProducer<OrderConfirmedEvent>>,
}

impl EventProducers {
    pub async fn publish_order_confirmed(&self, event: OrderConfirmedEvent) {
        trace!("📬️ Publishing order confirmed event for [{}] to {} hook(s)", event.txid, self.order_confirmed.len());
        for producer in &self.order_confirmed {
            producer.publish_event(event.clone()).await;
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use super::*;
    use crate::db_types::ConfirmOutcome;

    fn recording_hook(hooks: &mut EventHooks, name: &'static str, seen: Arc<Mutex<Vec<(&'static str, String)>>>) {
        hooks.on_order_confirmed(move |ev| {
            let seen = seen.clone();
            Box::pin(async move {
                seen.lock().unwrap().push((name, ev.txid));
            })
        });
    }

    #[tokio::test]
    async fn every_hook_sees_every_event() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = EventHooks::default();
        recording_hook(&mut hooks, "first", seen.clone());
        recording_hook(&mut hooks, "second", seen.clone());
        let handlers = EventHandlers::new(4, hooks);
        let producers = handlers.producers();
        producers.publish_order_confirmed(OrderConfirmedEvent::new("T1", ConfirmOutcome::Updated(1))).await;
        producers.publish_order_confirmed(OrderConfirmedEvent::new("T2", ConfirmOutcome::Backfilled(1))).await;
        drop(producers);
        handlers.run().await;

        let mut seen = seen.lock().unwrap().clone();
        seen.sort();
        assert_eq!(seen, vec![
            ("first", "T1".to_string()),
            ("first", "T2".to_string()),
            ("second", "T1".to_string()),
            ("second", "T2".to_string()),
        ]);
    }

    #[tokio::test]
    async fn events_without_subscribers_are_discarded() {
        let hooks = EventHooks::default();
        assert!(hooks.is_empty());
        let handlers = EventHandlers::new(1, hooks);
        let producers = handlers.producers();
        for _ in 0..3 {
            producers.publish_order_confirmed(OrderConfirmedEvent::new("T1", ConfirmOutcome::Updated(1))).await;
        }
        handlers.start_handlers().await.unwrap();
    }
}
