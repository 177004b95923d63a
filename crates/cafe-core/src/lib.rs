//! Core register for the café ledger
//!
//! `Register` owns the view state an operator works with: today's feed, the
//! active filter, the entry form, the customer lookup and the delete dialog.
//! Every successful mutation is followed by a full re-fetch of today's
//! records.

use std::sync::Arc;

use cafe_config::Config;
use cafe_store::{StoreRef, Transaction};
use chrono::{Local, NaiveDate, TimeZone};
use log::{info, warn};

pub mod delete;
pub mod entry;
pub mod error;
pub mod feed;
pub mod filter;
pub mod lookup;
pub mod payment;
pub mod reports;
pub mod summary;
pub mod time;

#[cfg(test)]
mod testing;

pub use delete::{DeleteAuthorizer, DeleteFlow, DeleteOutcome, DeleteState, SharedSecret};
pub use entry::{EntryForm, MAX_AMOUNT};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use feed::TransactionFeed;
pub use filter::{AggregateKind, FilterCriteria, FilterParams, FilteredView, StatusFilter};
pub use lookup::CustomerLookup;
pub use reports::{FilteredReport, LookupReport, MoneyFormat, SummaryReport, TransactionRow};
pub use summary::DailySummary;
pub use time::DateTimeRange;

/// Register state shared by every operator view
pub struct Register {
    store: StoreRef,
    authorizer: Arc<dyn DeleteAuthorizer>,
    money: MoneyFormat,
    feed: TransactionFeed,
    criteria: FilterCriteria,
    entry: EntryForm,
    lookup: CustomerLookup,
    delete: DeleteFlow,
}

impl Register {
    /// Create a register over `store`, authorizing deletes with the configured secret
    pub fn new(config: &Config, store: StoreRef) -> Self {
        Self {
            store,
            authorizer: Arc::new(SharedSecret::new(config.security.delete_password.clone())),
            money: MoneyFormat::from(&config.currency),
            feed: TransactionFeed::new(),
            criteria: FilterCriteria::default(),
            entry: EntryForm::default(),
            lookup: CustomerLookup::new(),
            delete: DeleteFlow::new(),
        }
    }

    /// Replace the delete authorizer
    pub fn with_authorizer(mut self, authorizer: Arc<dyn DeleteAuthorizer>) -> Self {
        self.authorizer = authorizer;
        self
    }

    /// Current local calendar date
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn money(&self) -> &MoneyFormat {
        &self.money
    }

    // ==================== Feed ====================

    pub fn feed(&self) -> &TransactionFeed {
        &self.feed
    }

    /// Re-fetch today's records; the filter stays as it was
    pub async fn reload(&mut self) -> CoreResult<usize> {
        self.feed.reload(self.store.as_ref(), Self::today()).await
    }

    async fn refresh_after(&mut self, operation: &str) {
        if self.reload().await.is_err() {
            warn!("Feed left stale after {}", operation);
        }
        if self.lookup.refresh(self.store.as_ref()).await.is_err() {
            warn!("Lookup left stale after {}", operation);
        }
    }

    // ==================== Filter ====================

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Parse operator filter input into the active criteria
    pub fn apply_filter_params(&mut self, params: &FilterParams) -> CoreResult<()> {
        self.criteria = params.apply_to(&self.criteria)?;
        Ok(())
    }

    /// Drop the date/time bounds, keeping the status filter
    pub fn clear_date_range(&mut self) {
        self.criteria.range.clear();
    }

    pub fn filtered_view_in<Tz: TimeZone>(&self, tz: &Tz) -> FilteredView {
        self.criteria.apply_in(self.feed.transactions(), tz)
    }

    /// Today's records under the active filter
    pub fn filtered_view(&self) -> FilteredView {
        self.filtered_view_in(&Local)
    }

    pub fn filtered_report(&self) -> FilteredReport {
        FilteredReport::new_in(&self.criteria, &self.filtered_view(), &self.money, &Local)
    }

    // ==================== Summary ====================

    /// Totals over today's full feed, ignoring the filter
    pub fn summary(&self) -> DailySummary {
        DailySummary::from_transactions(self.feed.transactions())
    }

    pub fn summary_report(&self) -> SummaryReport {
        SummaryReport::new(&self.summary(), &self.money)
    }

    // ==================== Entry ====================

    pub fn entry(&self) -> &EntryForm {
        &self.entry
    }

    pub fn set_entry_form(&mut self, form: EntryForm) {
        self.entry = form;
    }

    /// Submit the current form, then reload
    pub async fn submit_entry(&mut self) -> CoreResult<Transaction> {
        let record = self.entry.submit(self.store.as_ref()).await?;
        self.refresh_after("insert").await;
        Ok(record)
    }

    // ==================== Lookup ====================

    pub fn lookup(&self) -> &CustomerLookup {
        &self.lookup
    }

    pub async fn search(&mut self, query: &str) -> CoreResult<()> {
        self.lookup.search(self.store.as_ref(), query).await
    }

    pub fn lookup_report(&self) -> LookupReport {
        LookupReport::new_in(&self.lookup, &self.money, &Local)
    }

    // ==================== Payment ====================

    /// Flip the paid flag of `id`, then reload
    pub async fn toggle_paid(&mut self, id: &str, current: bool) -> CoreResult<Transaction> {
        let record = payment::toggle_paid(self.store.as_ref(), id, current).await?;
        self.refresh_after("toggle").await;
        Ok(record)
    }

    // ==================== Delete ====================

    pub fn delete_state(&self) -> &DeleteState {
        self.delete.state()
    }

    pub fn request_delete(&mut self, id: &str) {
        self.delete.request(id);
    }

    pub fn set_delete_password(&mut self, password: &str) {
        self.delete.set_password(password);
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    /// Confirm the pending delete; reloads after a successful one
    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        let outcome = self
            .delete
            .confirm(self.store.as_ref(), self.authorizer.as_ref())
            .await;
        if let DeleteOutcome::Deleted { ref id } = outcome {
            info!("Reloading after delete of {}", id);
            self.refresh_after("delete").await;
        }
        outcome
    }
}

// ==================== Tests ====================
