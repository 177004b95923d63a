//! New-order form and submission

use std::str::FromStr;

use cafe_store::{NewTransaction, Transaction, TransactionStore};
use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};

/// Raw operator input, kept as text until submit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryForm {
    pub customer_name: String,
    pub amount: String,
    pub tip: String,
    pub is_paid: bool,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            amount: String::new(),
            tip: String::new(),
            is_paid: true,
        }
    }
}

impl EntryForm {
    /// Check the input and build the insert payload.
    ///
    /// The name is trimmed, a blank tip becomes zero.
    pub fn validate(&self) -> CoreResult<NewTransaction> {
        let customer_name = self.customer_name.trim();
        if customer_name.is_empty() {
            return Err(CoreError::validation("customer_name", "Customer name is required"));
        }

        if self.amount.trim().is_empty() {
            return Err(CoreError::validation("amount", "Amount is required"));
        }
        let amount = parse_money("amount", "Amount", &self.amount)?;

        let tip = if self.tip.trim().is_empty() {
            Decimal::ZERO
        } else {
            parse_money("tip", "Tip", &self.tip)?
        };

        Ok(NewTransaction {
            customer_name: customer_name.to_string(),
            amount,
            tip,
            is_paid: self.is_paid,
        })
    }

    /// Back to an empty form with the paid box checked
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate and insert the current form.
    ///
    /// The form is reset only after the store accepts the record; validation
    /// failures never reach the store.
    pub async fn submit(&mut self, store: &dyn TransactionStore) -> CoreResult<Transaction> {
        let new = self.validate()?;

        match store.insert(new).await {
            Ok(record) => {
                info!(
                    "Recorded {} for {} (paid: {})",
                    record.amount, record.customer_name, record.is_paid
                );
                self.reset();
                Ok(record)
            }
            Err(e) => {
                let error: CoreError = e.into();
                DefaultErrorLogger.log_error(
                    &error,
                    &ErrorContext::new("insert_transaction")
                        .with_data("customer_name", serde_json::json!(self.customer_name.trim())),
                );
                Err(error)
            }
        }
    }
}

/// Largest amount or tip a single order may carry
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

fn parse_money(field: &str, label: &str, value: &str) -> CoreResult<Decimal> {
    let parsed = Decimal::from_str(value.trim())
        .map_err(|_| CoreError::validation(field, &format!("{} must be a number", label)))?;
    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(CoreError::validation(field, &format!("{} cannot be negative", label)));
    }
    if parsed > MAX_AMOUNT {
        return Err(CoreError::validation(
            field,
            &format!("{} cannot exceed {}", label, MAX_AMOUNT),
        ));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing::FailingStore;
    use cafe_store::{MemoryStore, TransactionQuery};

    fn form(name: &str, amount: &str, tip: &str, is_paid: bool) -> EntryForm {
        EntryForm {
            customer_name: name.to_string(),
            amount: amount.to_string(),
            tip: tip.to_string(),
            is_paid,
        }
    }

    #[test]
    fn test_default_form_is_paid() {
        let form = EntryForm::default();
        assert!(form.is_paid);
        assert!(form.customer_name.is_empty());
    }

    #[test]
    fn test_validate_trims_name_and_defaults_tip() {
        let new = form("  Sara ", "50", "", true).validate().unwrap();
        assert_eq!(new.customer_name, "Sara");
        assert_eq!(new.amount, Decimal::from(50));
        assert_eq!(new.tip, Decimal::ZERO);
        assert!(new.is_paid);
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let err = form("   ", "50", "", true).validate().unwrap_err();
        assert_eq!(err.to_string(), "Customer name is required");

        let err = form("Sara", " ", "", true).validate().unwrap_err();
        assert_eq!(err.to_string(), "Amount is required");
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let err = form("Sara", "fifty", "", true).validate().unwrap_err();
        assert_eq!(err.to_string(), "Amount must be a number");

        let err = form("Sara", "-5", "", true).validate().unwrap_err();
        assert_eq!(err.to_string(), "Amount cannot be negative");

        let err = form("Sara", "5", "-1", true).validate().unwrap_err();
        assert_eq!(err.to_string(), "Tip cannot be negative");
    }

    #[test]
    fn test_validate_rejects_amounts_past_ceiling() {
        let err = form("Sara", "79228162514264337593543950335", "", true)
            .validate()
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.to_string(), "Amount cannot exceed 1000000000");

        let err = form("Sara", "5", "1000000000.01", true).validate().unwrap_err();
        assert_eq!(err.to_string(), "Tip cannot exceed 1000000000");

        assert!(form("Sara", "1000000000", "", true).validate().is_ok());
    }

    #[test]
    fn test_validate_keeps_decimal_precision() {
        let new = form("Omar", "30.10", "2.5", false).validate().unwrap();
        assert_eq!(new.amount, Decimal::new(3010, 2));
        assert_eq!(new.tip, Decimal::new(25, 1));
    }

    #[tokio::test]
    async fn test_submit_inserts_and_resets() {
        let store = MemoryStore::new();
        let mut entry = form("Omar", "30", "", false);

        let record = entry.submit(&store).await.unwrap();

        assert_eq!(record.customer_name, "Omar");
        assert_eq!(record.amount, Decimal::from(30));
        assert_eq!(record.tip, Decimal::ZERO);
        assert!(!record.is_paid);
        assert_eq!(entry, EntryForm::default());
    }

    #[tokio::test]
    async fn test_invalid_submit_never_reaches_store() {
        let store = MemoryStore::new();
        let mut entry = form("", "30", "", true);

        assert!(entry.submit(&store).await.is_err());
        assert!(store.is_empty().await);
        assert_eq!(entry.amount, "30");
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_form() {
        let store = FailingStore::with_records(vec![]);
        store.set_failing(true);
        let mut entry = form("Sara", "50", "5", true);

        let err = entry.submit(&store).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::StoreUnavailable);
        assert_eq!(entry.customer_name, "Sara");

        store.set_failing(false);
        assert!(store.query(&TransactionQuery::default()).await.unwrap().is_empty());
    }
}
