use serde::{Deserialize, Serialize};

use crate::db_types::ConfirmOutcome;

/// Emitted after a chain confirmation has been committed to the order table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmedEvent {
    pub txid: String,
    pub outcome: ConfirmOutcome,
}

impl OrderConfirmedEvent {
    pub fn new<S: Into<String>>(txid: S, outcome: ConfirmOutcome) -> Self {
        Self { txid: txid.into(), outcome }
    }
}
