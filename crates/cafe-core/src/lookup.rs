//! Customer search across all dates

use cafe_store::{Transaction, TransactionQuery, TransactionStore};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::filter::sum_amounts;

/// Name search with its last results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerLookup {
    /// Text of the last search that ran
    pub query: String,
    /// Unpaid first, then paid, newest first within each group
    pub results: Vec<Transaction>,
    /// Whether a search has been attempted
    pub has_searched: bool,
}

impl CustomerLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search by name substring, ignoring case.
    ///
    /// A blank query leaves everything untouched. A failed search clears
    /// the results but still counts as attempted.
    pub async fn search(&mut self, store: &dyn TransactionStore, query: &str) -> CoreResult<()> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }

        self.query = query.to_string();
        let result = store.query(&TransactionQuery::name_contains(query)).await;
        self.has_searched = true;

        match result {
            Ok(mut records) => {
                unpaid_first(&mut records);
                debug!("Lookup '{}' matched {} transactions", query, records.len());
                self.results = records;
                Ok(())
            }
            Err(e) => {
                self.results.clear();
                let error: CoreError = e.into();
                DefaultErrorLogger.log_error(
                    &error,
                    &ErrorContext::new("search_customer").with_data("query", serde_json::json!(query)),
                );
                Err(error)
            }
        }
    }

    /// Re-run the last search, if any
    pub async fn refresh(&mut self, store: &dyn TransactionStore) -> CoreResult<()> {
        if !self.has_searched {
            return Ok(());
        }
        let query = self.query.clone();
        self.search(store, &query).await
    }

    /// Sum of `amount` over unpaid results
    pub fn outstanding_balance(&self) -> Decimal {
        sum_amounts(self.results.iter().filter(|t| !t.is_paid))
    }

    /// Whether to show "no transactions found"
    pub fn show_empty_state(&self) -> bool {
        self.has_searched && self.results.is_empty()
    }
}

/// Stable partition: unpaid before paid, relative order kept
pub fn unpaid_first(records: &mut [Transaction]) {
    records.sort_by_key(|t| t.is_paid);
}
