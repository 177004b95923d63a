//! Test fixtures shared by the core modules

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use cafe_store::{
    MemoryStore, NewTransaction, StoreError, StoreResult, Transaction, TransactionQuery,
    TransactionStore,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Build a stored record with a fixed timestamp
pub fn record(id: &str, name: &str, amount: i64, is_paid: bool, created_at: DateTime<Utc>) -> Transaction {
    Transaction {
        id: id.to_string(),
        customer_name: name.to_string(),
        amount: Decimal::from(amount),
        tip: Decimal::ZERO,
        is_paid,
        transaction_date: created_at.date_naive(),
        created_at,
    }
}

/// Memory store that fails every call while `failing` is set
#[derive(Default)]
pub struct FailingStore {
    inner: MemoryStore,
    failing: AtomicBool,
}

impl FailingStore {
    pub fn with_records(records: Vec<Transaction>) -> Self {
        Self {
            inner: MemoryStore::with_records(records),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::RequestError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TransactionStore for FailingStore {
    async fn query(&self, query: &TransactionQuery) -> StoreResult<Vec<Transaction>> {
        self.check()?;
        self.inner.query(query).await
    }

    async fn insert(&self, new: NewTransaction) -> StoreResult<Transaction> {
        self.check()?;
        self.inner.insert(new).await
    }

    async fn set_paid(&self, id: &str, is_paid: bool) -> StoreResult<Transaction> {
        self.check()?;
        self.inner.set_paid(id, is_paid).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.check()?;
        self.inner.delete(id).await
    }
}
