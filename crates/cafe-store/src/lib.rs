//! Transaction store client
//!
//! The hosted table is an external collaborator; this crate only speaks to
//! it. `RestStore` talks PostgREST, `MemoryStore` keeps everything in
//! process for tests and offline use.

use async_trait::async_trait;
use cafe_config::{StoreBackend, StoreConfig};
use std::sync::Arc;

pub mod error;
pub mod memory;
pub mod models;
pub mod rest;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use models::{NewTransaction, Transaction, TransactionQuery};
pub use rest::RestStore;

// ==================== Store Trait ====================

/// Store reference type
pub type StoreRef = Arc<dyn TransactionStore>;

/// Table-like store of transactions
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Records matching the query, in the requested order
    async fn query(&self, query: &TransactionQuery) -> StoreResult<Vec<Transaction>>;

    /// Insert one record; the store assigns its id
    async fn insert(&self, new: NewTransaction) -> StoreResult<Transaction>;

    /// Set the paid flag of one record
    async fn set_paid(&self, id: &str, is_paid: bool) -> StoreResult<Transaction>;

    /// Remove one record
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// Build the store selected by `store.backend`
pub fn from_config(config: &StoreConfig) -> StoreResult<StoreRef> {
    match config.backend {
        StoreBackend::Rest => Ok(Arc::new(RestStore::new(config)?)),
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}
