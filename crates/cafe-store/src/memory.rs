//! In-process transaction store

use async_trait::async_trait;
use chrono::{Local, Utc};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::models::{NewTransaction, Transaction, TransactionQuery};
use crate::TransactionStore;

/// Keeps records in memory with the same semantics as the hosted table
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Transaction>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with existing records
    pub fn with_records(records: Vec<Transaction>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn query(&self, query: &TransactionQuery) -> StoreResult<Vec<Transaction>> {
        let records = self.records.read().await;
        let mut matched: Vec<Transaction> = records
            .iter()
            .filter(|t| query.matches(t))
            .cloned()
            .collect();
        query.sort(&mut matched);
        Ok(matched)
    }

    async fn insert(&self, new: NewTransaction) -> StoreResult<Transaction> {
        if new.amount.is_sign_negative() || new.tip.is_sign_negative() {
            return Err(StoreError::BadRequest(
                "amount and tip must be non-negative".to_string(),
            ));
        }

        let created_at = Utc::now();
        let record = Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            customer_name: new.customer_name,
            amount: new.amount,
            tip: new.tip,
            is_paid: new.is_paid,
            transaction_date: created_at.with_timezone(&Local).date_naive(),
            created_at,
        };

        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn set_paid(&self, id: &str, is_paid: bool) -> StoreResult<Transaction> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        record.is_paid = is_paid;
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|t| t.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        Ok(())
    }
}
