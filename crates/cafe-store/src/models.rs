//! Records exchanged with the transaction store

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One customer order as persisted by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier
    pub id: String,
    /// Customer name, never blank
    pub customer_name: String,
    /// Order amount, non-negative
    pub amount: Decimal,
    /// Tip, non-negative
    #[serde(default)]
    pub tip: Decimal,
    /// Whether the order has been paid
    pub is_paid: bool,
    /// Calendar date the order belongs to
    pub transaction_date: NaiveDate,
    /// Creation timestamp, used for ordering and time-of-day filters
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Case-insensitive substring match on the customer name
    pub fn name_contains(&self, needle: &str) -> bool {
        self.customer_name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

/// Insert payload; the store assigns id, date and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub customer_name: String,
    pub amount: Decimal,
    pub tip: Decimal,
    pub is_paid: bool,
}

/// Predicates supported by the store: date equality and name pattern.
///
/// Results always come back newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    /// Only records whose `transaction_date` equals this date
    pub transaction_date: Option<NaiveDate>,
    /// Only records whose name contains this text, ignoring case
    pub name_contains: Option<String>,
}

impl TransactionQuery {
    /// All records of one calendar date, newest first
    pub fn on_date(date: NaiveDate) -> Self {
        Self {
            transaction_date: Some(date),
            ..Self::default()
        }
    }

    /// All records whose customer name contains `needle`, newest first
    pub fn name_contains(needle: impl Into<String>) -> Self {
        Self {
            name_contains: Some(needle.into()),
            ..Self::default()
        }
    }

    /// Evaluate the predicates against a record
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(date) = self.transaction_date {
            if tx.transaction_date != date {
                return false;
            }
        }
        if let Some(ref needle) = self.name_contains {
            if !tx.name_contains(needle) {
                return false;
            }
        }
        true
    }

    /// Sort records in place, newest `created_at` first
    pub fn sort(&self, records: &mut [Transaction]) {
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}
