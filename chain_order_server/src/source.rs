//! Confirmation sources
//!
//! A confirmation source delivers the ids of transactions that have been confirmed on chain. Delivery is
//! at-least-once: an event stays "in flight" until the consumer commits it, and a source may redeliver events that
//! were never committed. Transport problems are reported on a separate error stream and never end the stream.
//!
//! [`ChannelSource`] is the in-process source. Its producer half, [`ConfirmationPublisher`], is handed to anything
//! that needs to submit confirmations (the REST API, tests, a bridge from a message broker).
use std::{borrow::Cow, future::Future};

use log::*;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("The confirmation source has been closed")]
    Closed,
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Could not commit offset {0}: {1}")]
    CommitFailed(u64, String),
}

/// A single confirmation, as delivered by a [`ConfirmationSource`].
#[derive(Debug)]
pub struct ConfirmationEvent {
    offset: u64,
    key: Vec<u8>,
    ack: Option<oneshot::Sender<u64>>,
}

impl ConfirmationEvent {
    pub fn new<K: Into<Vec<u8>>>(offset: u64, key: K) -> Self {
        Self { offset, key: key.into(), ack: None }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The raw event key. This is the transaction id.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn txid(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.key)
    }
}

#[derive(Debug)]
pub enum SourceItem {
    Event(ConfirmationEvent),
    Error(SourceError),
}

pub trait ConfirmationSource {
    /// Waits for the next event or transport error. Returns `None` once the source is exhausted.
    fn next_item(&mut self) -> impl Future<Output = Option<SourceItem>> + Send;

    /// Acknowledges the event, so that it will not be delivered again.
    fn commit(&mut self, event: ConfirmationEvent) -> impl Future<Output = Result<(), SourceError>> + Send;
}

//----------------------------------------------   ChannelSource  ----------------------------------------------------
/// Creates an in-process confirmation feed. `buffer_size` events can wait for the consumer before publishers block.
pub fn confirmation_feed(buffer_size: usize) -> (ConfirmationPublisher, ChannelSource) {
    let (event_tx, event_rx) = mpsc::channel(buffer_size);
    let (error_tx, error_rx) = mpsc::channel(buffer_size);
    let publisher = ConfirmationPublisher { events: event_tx, errors: error_tx };
    let source = ChannelSource { events: event_rx, errors: error_rx, errors_open: true, next_offset: 0, committed: None };
    (publisher, source)
}

struct PendingEvent {
    key: Vec<u8>,
    ack: oneshot::Sender<u64>,
}

pub struct ChannelSource {
    events: mpsc::Receiver<PendingEvent>,
    errors: mpsc::Receiver<SourceError>,
    errors_open: bool,
    next_offset: u64,
    committed: Option<u64>,
}

impl ChannelSource {
    /// The offset of the most recently committed event, if any.
    pub fn committed_offset(&self) -> Option<u64> {
        self.committed
    }

    fn deliver(&mut self, pending: PendingEvent) -> ConfirmationEvent {
        let offset = self.next_offset;
        self.next_offset += 1;
        ConfirmationEvent { offset, key: pending.key, ack: Some(pending.ack) }
    }
}

impl ConfirmationSource for ChannelSource {
    async fn next_item(&mut self) -> Option<SourceItem> {
        loop {
            tokio::select! {
                pending = self.events.recv() => {
                    return pending.map(|p| SourceItem::Event(self.deliver(p)));
                },
                err = self.errors.recv(), if self.errors_open => match err {
                    Some(e) => return Some(SourceItem::Error(e)),
                    None => {
                        trace!("📡️ Error channel closed");
                        self.errors_open = false;
                    },
                },
            }
        }
    }

    async fn commit(&mut self, mut event: ConfirmationEvent) -> Result<(), SourceError> {
        if let Some(last) = self.committed {
            if event.offset <= last {
                warn!("📡️ Offset {} was committed after offset {last}", event.offset);
            }
        }
        self.committed = Some(self.committed.map_or(event.offset, |last| last.max(event.offset)));
        if let Some(ack) = event.ack.take() {
            // The publisher may have stopped waiting for the receipt
            let _ = ack.send(event.offset);
        }
        trace!("📡️ Committed offset {}", event.offset);
        Ok(())
    }
}

//-------------------------------------------   ConfirmationPublisher  -----------------------------------------------
#[derive(Clone)]
pub struct ConfirmationPublisher {
    events: mpsc::Sender<PendingEvent>,
    errors: mpsc::Sender<SourceError>,
}

/// Resolves when the consumer has committed the published event.
#[derive(Debug)]
pub struct CommitReceipt {
    ack: oneshot::Receiver<u64>,
}

impl CommitReceipt {
    /// Waits for the commit and returns the offset that the event was delivered at.
    pub async fn committed(self) -> Result<u64, SourceError> {
        self.ack.await.map_err(|_| SourceError::Closed)
    }
}

impl ConfirmationPublisher {
    /// Publishes a confirmation for `txid`. Waits for space in the feed if the consumer is behind.
    pub async fn publish(&self, txid: &str) -> Result<CommitReceipt, SourceError> {
        let (ack, receipt) = oneshot::channel();
        let pending = PendingEvent { key: txid.as_bytes().to_vec(), ack };
        self.events.send(pending).await.map_err(|_| SourceError::Closed)?;
        trace!("📡️ Confirmation for [{txid}] published");
        Ok(CommitReceipt { ack: receipt })
    }

    /// Reports a transport problem to the consumer.
    pub async fn report_error(&self, error: SourceError) -> Result<(), SourceError> {
        self.errors.send(error).await.map_err(|_| SourceError::Closed)
    }
}
