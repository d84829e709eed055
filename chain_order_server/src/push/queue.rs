use std::time::Duration;

use log::*;
use tokio::{
    sync::{mpsc, mpsc::error::TryRecvError},
    task::JoinHandle,
    time::MissedTickBehavior,
};

use crate::push::{PushError, PushGateway, PushMessage};

/// Creates a bounded notification queue that holds up to `capacity` messages.
pub fn push_queue(capacity: usize) -> (PushProducer, PushQueue) {
    let (sender, receiver) = mpsc::channel(capacity);
    (PushProducer { sender }, PushQueue { receiver })
}

#[derive(Clone)]
pub struct PushProducer {
    sender: mpsc::Sender<PushMessage>,
}

impl PushProducer {
    /// Adds the message to the queue, waiting for space if the queue is full.
    pub async fn enqueue(&self, message: PushMessage) -> Result<(), PushError> {
        self.sender.send(message).await.map_err(|_| PushError::QueueClosed)
    }
}

pub struct PushQueue {
    receiver: mpsc::Receiver<PushMessage>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub delivered: u64,
    pub failed: u64,
}

/// Starts the dispatch worker. The worker stops once every [`PushProducer`] has been dropped and the queue is empty.
pub fn start_push_worker<G>(queue: PushQueue, gateway: G, interval: Duration) -> JoinHandle<DispatchSummary>
where G: PushGateway + Send + Sync + 'static {
    tokio::spawn(run_push_worker(queue, gateway, interval))
}

/// Takes at most one message off the queue per `interval` and hands it to the gateway. Failed deliveries are logged
/// and dropped.
pub async fn run_push_worker<G: PushGateway>(mut queue: PushQueue, gateway: G, interval: Duration) -> DispatchSummary {
    let mut timer = tokio::time::interval(interval);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut summary = DispatchSummary::default();
    info!("📣️ Push worker started. One message every {interval:?}");
    loop {
        timer.tick().await;
        let message = match queue.receiver.try_recv() {
            Ok(message) => message,
            Err(TryRecvError::Empty) => continue,
            Err(TryRecvError::Disconnected) => break,
        };
        match gateway.push(&message).await {
            Ok(()) => {
                debug!("📣️ Push to {} delivered", message.target_user_id);
                summary.delivered += 1;
            },
            Err(e) => {
                error!("📣️ Push to {} failed. {e}. Message: {}", message.target_user_id, message.text);
                summary.failed += 1;
            },
        }
    }
    info!("📣️ Push worker stopped. {} delivered, {} failed", summary.delivered, summary.failed);
    summary
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use tokio::time::{sleep, timeout};

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingGateway {
        sent: Arc<Mutex<Vec<PushMessage>>>,
        fail_for: Option<String>,
    }

    impl RecordingGateway {
        fn sent(&self) -> Vec<PushMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl PushGateway for RecordingGateway {
        async fn push(&self, message: &PushMessage) -> Result<(), PushError> {
            if self.fail_for.as_deref() == Some(message.target_user_id.as_str()) {
                return Err(PushError::Rejected { status: 500, message: "boom".into() });
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn msg(i: usize) -> PushMessage {
        PushMessage::new(format!("user{i}"), format!("message {i}"))
    }

    #[tokio::test(start_paused = true)]
    async fn one_message_per_tick() {
        let (producer, queue) = push_queue(10);
        for i in 0..5 {
            producer.enqueue(msg(i)).await.unwrap();
        }
        let gateway = RecordingGateway::default();
        let handle = start_push_worker(queue, gateway.clone(), Duration::from_secs(2));
        // Ticks at 0s, 2s and 4s
        sleep(Duration::from_millis(4500)).await;
        assert_eq!(gateway.sent(), vec![msg(0), msg(1), msg(2)]);

        drop(producer);
        let summary = handle.await.unwrap();
        assert_eq!(summary, DispatchSummary { delivered: 5, failed: 0 });
        assert_eq!(gateway.sent().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn enqueue_blocks_while_the_queue_is_full() {
        let (producer, queue) = push_queue(1);
        producer.enqueue(msg(1)).await.unwrap();
        assert!(timeout(Duration::from_secs(5), producer.enqueue(msg(2))).await.is_err(), "queue should be full");

        let gateway = RecordingGateway::default();
        let handle = start_push_worker(queue, gateway.clone(), Duration::from_secs(2));
        // The first tick drains one message, which makes room for the next one
        producer.enqueue(msg(2)).await.unwrap();
        assert_eq!(gateway.sent(), vec![msg(1)]);
        drop(producer);
        assert_eq!(handle.await.unwrap().delivered, 2);
        assert_eq!(gateway.sent(), vec![msg(1), msg(2)]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_pushes_are_dropped() {
        let (producer, queue) = push_queue(10);
        for i in 0..3 {
            producer.enqueue(msg(i)).await.unwrap();
        }
        drop(producer);
        let gateway = RecordingGateway { fail_for: Some("user1".into()), ..Default::default() };
        let summary = run_push_worker(queue, gateway.clone(), Duration::from_millis(10)).await;
        assert_eq!(summary, DispatchSummary { delivered: 2, failed: 1 });
        assert_eq!(gateway.sent(), vec![msg(0), msg(2)]);
    }
}
