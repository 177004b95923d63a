//! Today's transaction list as loaded from the store

use cafe_store::{Transaction, TransactionQuery, TransactionStore};
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;

use crate::error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};

/// Last successfully loaded list for one calendar date.
///
/// A failed reload keeps the previous list visible.
#[derive(Debug)]
pub struct TransactionFeed {
    transactions: Vec<Transaction>,
    loading: bool,
    loaded_at: Option<DateTime<Utc>>,
}

impl Default for TransactionFeed {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            loading: true,
            loaded_at: None,
        }
    }
}

impl TransactionFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records newest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// True until the first load attempt finishes
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// When the list currently held was fetched
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Replace the list with every record dated `today`, newest first.
    ///
    /// On failure the error is logged and returned, and the old list stays.
    pub async fn reload(&mut self, store: &dyn TransactionStore, today: NaiveDate) -> CoreResult<usize> {
        let result = store.query(&TransactionQuery::on_date(today)).await;
        self.loading = false;

        match result {
            Ok(transactions) => {
                debug!("Loaded {} transactions for {}", transactions.len(), today);
                self.transactions = transactions;
                self.loaded_at = Some(Utc::now());
                Ok(self.transactions.len())
            }
            Err(e) => {
                let error: CoreError = e.into();
                DefaultErrorLogger.log_error(
                    &error,
                    &ErrorContext::new("fetch_today_transactions")
                        .with_data("date", serde_json::json!(today.to_string())),
                );
                Err(error)
            }
        }
    }
}
