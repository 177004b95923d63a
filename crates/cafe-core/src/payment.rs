//! Paid/unpaid toggle

use cafe_store::{Transaction, TransactionStore};
use log::info;

use crate::error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};

/// Store `!current` as the paid flag of `id`.
///
/// Nothing is changed locally; callers re-fetch on success.
pub async fn toggle_paid(store: &dyn TransactionStore, id: &str, current: bool) -> CoreResult<Transaction> {
    match store.set_paid(id, !current).await {
        Ok(record) => {
            info!("Marked {} ({}) as {}", record.customer_name, id, paid_label(record.is_paid));
            Ok(record)
        }
        Err(e) => {
            let error: CoreError = e.into();
            DefaultErrorLogger.log_error(
                &error,
                &ErrorContext::new("toggle_paid")
                    .with_data("id", serde_json::json!(id))
                    .with_data("is_paid", serde_json::json!(!current)),
            );
            Err(error)
        }
    }
}

fn paid_label(is_paid: bool) -> &'static str {
    if is_paid {
        "paid"
    } else {
        "unpaid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing::{record, FailingStore};
    use cafe_store::{MemoryStore, TransactionQuery};
    use chrono::Utc;

    #[tokio::test]
    async fn test_toggle_flips_flag() {
        let store = MemoryStore::with_records(vec![record("1", "Omar", 30, false, Utc::now())]);

        let updated = toggle_paid(&store, "1", false).await.unwrap();
        assert!(updated.is_paid);

        let updated = toggle_paid(&store, "1", true).await.unwrap();
        assert!(!updated.is_paid);
    }

    #[tokio::test]
    async fn test_toggle_unknown_id() {
        let store = MemoryStore::new();
        let err = toggle_paid(&store, "missing", false).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::TransactionNotFound);
    }

    #[tokio::test]
    async fn test_failed_toggle_changes_nothing() {
        let store = FailingStore::with_records(vec![record("1", "Omar", 30, false, Utc::now())]);
        store.set_failing(true);

        assert!(toggle_paid(&store, "1", false).await.is_err());

        store.set_failing(false);
        let records = store.query(&TransactionQuery::default()).await.unwrap();
        assert!(!records[0].is_paid);
    }
}
