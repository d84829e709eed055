use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Block height stored against orders that have not been confirmed on chain yet.
pub const BLOCK_UNCONFIRMED: i64 = -1;

/// The largest page that can be requested from the order listing queries.
pub const MAX_PAGE_SIZE: u32 = 100;

//--------------------------------------        Wallet         ---------------------------------------------------------
/// A chain address that belongs to a known application user. Activity on registered addresses is tracked.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Wallet {
    pub address: String,
    #[serde(rename = "userid")]
    pub user_id: String,
    #[serde(rename = "createTime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWallet {
    pub address: String,
    pub user_id: String,
}

impl NewWallet {
    pub fn new<S1: Into<String>, S2: Into<String>>(address: S1, user_id: S2) -> Self {
        Self { address: address.into(), user_id: user_id.into() }
    }
}

//--------------------------------------        Order          ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip)]
    pub id: i64,
    pub tx: String,
    #[sqlx(rename = "from_address")]
    pub from: String,
    #[sqlx(rename = "to_address")]
    pub to: String,
    pub asset: String,
    /// Decimal amount, kept as a string so that no precision is lost
    pub value: String,
    #[serde(rename = "createTime")]
    pub created_at: DateTime<Utc>,
    /// `None` while the order is pending
    #[serde(rename = "confirmTime")]
    pub confirm_time: Option<DateTime<Utc>>,
    /// [`BLOCK_UNCONFIRMED`] while the order is pending
    pub block: i64,
}

impl Order {
    pub fn is_confirmed(&self) -> bool {
        self.confirm_time.is_some()
    }

    pub fn is_pending(&self) -> bool {
        !self.is_confirmed()
    }
}

//--------------------------------------       NewOrder        ---------------------------------------------------------
/// A pending order, registered by a user before the transfer is confirmed on chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub tx: String,
    pub from: String,
    pub to: String,
    pub asset: String,
    pub value: String,
    #[serde(rename = "createTime", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    pub fn new<S: Into<String>>(tx: S, from: S, to: S, asset: S, value: S) -> Self {
        Self {
            tx: tx.into(),
            from: from.into(),
            to: to.into(),
            asset: asset.into(),
            value: value.into(),
            created_at: Utc::now(),
        }
    }

    /// Returns the names of the required fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("tx", &self.tx),
            ("from", &self.from),
            ("to", &self.to),
            ("asset", &self.asset),
            ("value", &self.value),
        ]
        .into_iter()
        .filter_map(|(name, v)| v.trim().is_empty().then_some(name))
        .collect()
    }
}

//--------------------------------------        ChainTx        ---------------------------------------------------------
/// The authoritative record of a confirmed transfer, as written by the chain ingester.
///
/// Duplicate ingestion can leave more than one row with the same `tx`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ChainTx {
    pub id: i64,
    pub tx: String,
    #[sqlx(rename = "from_address")]
    pub from: String,
    #[sqlx(rename = "to_address")]
    pub to: String,
    pub asset: String,
    pub value: String,
    pub block: i64,
    pub created_at: DateTime<Utc>,
}

impl ChainTx {
    pub fn endpoints(&self) -> [&str; 2] {
        [self.from.as_str(), self.to.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChainTx {
    pub tx: String,
    pub from: String,
    pub to: String,
    pub asset: String,
    pub value: String,
    pub block: i64,
    pub created_at: DateTime<Utc>,
}

impl NewChainTx {
    pub fn new<S: Into<String>>(tx: S, from: S, to: S, asset: S, value: S, block: i64) -> Self {
        Self {
            tx: tx.into(),
            from: from.into(),
            to: to.into(),
            asset: asset.into(),
            value: value.into(),
            block,
            created_at: Utc::now(),
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

//--------------------------------------     ConfirmOutcome    ---------------------------------------------------------
/// What a successful confirmation did to the order table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmOutcome {
    /// Pending orders for the transaction were marked as confirmed.
    Updated(u64),
    /// An order for the transaction exists and was confirmed earlier. Nothing changed.
    AlreadyConfirmed,
    /// No order existed, and new confirmed orders were inserted for registered wallets.
    Backfilled(u64),
    /// No order existed and neither endpoint of the transfer is a registered wallet. Nothing changed.
    Irrelevant,
}

impl ConfirmOutcome {
    /// True if the confirmation wrote to the order table.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Updated(_) | Self::Backfilled(_))
    }
}

impl Display for ConfirmOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Updated(n) => write!(f, "{n} pending order(s) confirmed"),
            Self::AlreadyConfirmed => write!(f, "already confirmed"),
            Self::Backfilled(n) => write!(f, "{n} order(s) backfilled"),
            Self::Irrelevant => write!(f, "no registered wallet involved"),
        }
    }
}

//--------------------------------------       Pagination      ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Page number, starting at zero
    pub offset: u32,
    /// Number of records per page
    pub size: u32,
}

impl Pagination {
    pub fn new(offset: u32, size: u32) -> Self {
        Self { offset, size }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    pub fn skip(&self) -> i64 {
        i64::from(self.offset) * i64::from(self.size)
    }

    pub fn is_valid(&self) -> bool {
        self.size > 0 && self.size <= MAX_PAGE_SIZE
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_order_fields() {
        let mut order = NewOrder::new("tx1", "A", "B", "NEO", "5");
        assert!(order.missing_fields().is_empty());
        order.from = " ".into();
        order.value = String::new();
        assert_eq!(order.missing_fields(), vec!["from", "value"]);
    }

    #[test]
    fn new_order_json_uses_wire_names() {
        let order: NewOrder = serde_json::from_str(
            r#"{"tx":"t","from":"a","to":"b","asset":"x","value":"1.5","createTime":"2024-05-01T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(order.value, "1.5");
        assert_eq!(order.created_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");
        let order: NewOrder = serde_json::from_str(r#"{"tx":"t","from":"a","to":"b","asset":"x","value":"1"}"#).unwrap();
        assert_eq!(order.tx, "t");
    }

    #[test]
    fn pagination() {
        let page = Pagination::new(3, 20);
        assert_eq!(page.skip(), 60);
        assert_eq!(page.limit(), 20);
        assert!(page.is_valid());
        assert!(!Pagination::new(0, 0).is_valid());
        assert!(!Pagination::new(0, MAX_PAGE_SIZE + 1).is_valid());
    }

    #[test]
    fn outcomes() {
        assert!(ConfirmOutcome::Updated(1).is_mutation());
        assert!(ConfirmOutcome::Backfilled(2).is_mutation());
        assert!(!ConfirmOutcome::AlreadyConfirmed.is_mutation());
        assert!(!ConfirmOutcome::Irrelevant.is_mutation());
        assert_eq!(ConfirmOutcome::Backfilled(2).to_string(), "2 order(s) backfilled");
    }
}
