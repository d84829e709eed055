//! Rate-limited delivery of push notifications
//!
//! Notifications are queued with a [`PushProducer`] and delivered by a single worker that sends at most one message
//! per interval. The queue is bounded: producers wait while it is full, so a burst of confirmations is absorbed up
//! to the queue capacity and then slows the producers down to the delivery rate.
mod gateway;
mod message;
mod queue;

pub use gateway::{HttpPushGateway, LogOnlyGateway, PushError, PushGateway, PushRequest};
pub use message::PushMessage;
pub use queue::{push_queue, run_push_worker, start_push_worker, DispatchSummary, PushProducer, PushQueue};
