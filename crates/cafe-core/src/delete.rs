//! Password-confirmed deletion
//!
//! Deleting goes through a small state machine: a record is selected, a
//! password is typed, and only an authorized confirm reaches the store.

use async_trait::async_trait;
use cafe_store::TransactionStore;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger};

/// Message shown when the password is rejected
pub const INCORRECT_PASSWORD: &str = "Incorrect password";

/// Message shown when the store refuses or fails the delete
pub const DELETE_FAILED: &str = "Failed to delete transaction";

// ==================== Authorization ====================

/// Decides whether a password may delete a record
#[async_trait]
pub trait DeleteAuthorizer: Send + Sync {
    async fn authorize(&self, target_id: &str, password: &str) -> bool;
}

/// Compares against one configured secret.
///
/// The secret is shared by every operator and sent in plain text, so this
/// only guards against accidental deletes.
#[derive(Debug, Clone)]
pub struct SharedSecret {
    secret: String,
}

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

#[async_trait]
impl DeleteAuthorizer for SharedSecret {
    async fn authorize(&self, _target_id: &str, password: &str) -> bool {
        password == self.secret
    }
}

// ==================== State Machine ====================

/// Where the delete dialog stands
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DeleteState {
    #[default]
    Idle,
    Pending {
        target_id: String,
        #[serde(skip_serializing, default)]
        password: String,
        error: Option<String>,
    },
}

/// Result of a confirm attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// Record removed, dialog closed
    Deleted { id: String },
    /// Password rejected, dialog still open
    Rejected,
    /// Store failed, dialog still open
    Failed,
    /// No delete was pending
    Idle,
}

/// Delete dialog state
#[derive(Debug, Clone, Default)]
pub struct DeleteFlow {
    state: DeleteState,
}

impl DeleteFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DeleteState {
        &self.state
    }

    /// Open the dialog for `id` with an empty password
    pub fn request(&mut self, id: &str) {
        self.state = DeleteState::Pending {
            target_id: id.to_string(),
            password: String::new(),
            error: None,
        };
    }

    /// Update the typed password; any shown error goes away
    pub fn set_password(&mut self, value: &str) {
        if let DeleteState::Pending { password, error, .. } = &mut self.state {
            *password = value.to_string();
            *error = None;
        }
    }

    /// Close the dialog without deleting
    pub fn cancel(&mut self) {
        self.state = DeleteState::Idle;
    }

    /// Check the password and delete the target.
    ///
    /// Returns `Deleted` only after the store removed the record; the
    /// caller is expected to reload.
    pub async fn confirm(
        &mut self,
        store: &dyn TransactionStore,
        authorizer: &dyn DeleteAuthorizer,
    ) -> DeleteOutcome {
        let (target_id, password) = match &self.state {
            DeleteState::Idle => return DeleteOutcome::Idle,
            DeleteState::Pending {
                target_id,
                password,
                ..
            } => (target_id.clone(), password.clone()),
        };

        if !authorizer.authorize(&target_id, &password).await {
            warn!("Rejected delete of {}: incorrect password", target_id);
            self.set_error(INCORRECT_PASSWORD);
            return DeleteOutcome::Rejected;
        }

        match store.delete(&target_id).await {
            Ok(()) => {
                info!("Deleted transaction {}", target_id);
                self.state = DeleteState::Idle;
                DeleteOutcome::Deleted { id: target_id }
            }
            Err(e) => {
                DefaultErrorLogger.log_error(
                    &CoreError::from(e),
                    &ErrorContext::new("delete_transaction").with_data("id", serde_json::json!(target_id)),
                );
                self.set_error(DELETE_FAILED);
                DeleteOutcome::Failed
            }
        }
    }

    fn set_error(&mut self, message: &str) {
        if let DeleteState::Pending { error, .. } = &mut self.state {
            *error = Some(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{record, FailingStore};
    use cafe_store::MemoryStore;
    use chrono::Utc;

    fn secret() -> SharedSecret {
        SharedSecret::new("010203")
    }

    fn pending_error(flow: &DeleteFlow) -> Option<String> {
        match flow.state() {
            DeleteState::Pending { error, .. } => error.clone(),
            DeleteState::Idle => None,
        }
    }

    #[tokio::test]
    async fn test_wrong_then_right_password() {
        let store = MemoryStore::with_records(vec![record("1", "Sara", 50, true, Utc::now())]);
        let mut flow = DeleteFlow::new();
        flow.request("1");

        flow.set_password("1234");
        assert_eq!(flow.confirm(&store, &secret()).await, DeleteOutcome::Rejected);
        assert_eq!(pending_error(&flow).as_deref(), Some(INCORRECT_PASSWORD));
        assert_eq!(store.len().await, 1);

        flow.set_password("010203");
        assert_eq!(pending_error(&flow), None);
        assert_eq!(
            flow.confirm(&store, &secret()).await,
            DeleteOutcome::Deleted { id: "1".to_string() }
        );
        assert_eq!(flow.state(), &DeleteState::Idle);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_failure_keeps_dialog_open() {
        let store = FailingStore::with_records(vec![record("1", "Sara", 50, true, Utc::now())]);
        store.set_failing(true);
        let mut flow = DeleteFlow::new();
        flow.request("1");
        flow.set_password("010203");

        assert_eq!(flow.confirm(&store, &secret()).await, DeleteOutcome::Failed);
        assert!(matches!(flow.state(), DeleteState::Pending { .. }));
        assert_eq!(pending_error(&flow).as_deref(), Some(DELETE_FAILED));
    }

    #[tokio::test]
    async fn test_confirm_while_idle_is_noop() {
        let store = MemoryStore::with_records(vec![record("1", "Sara", 50, true, Utc::now())]);
        let mut flow = DeleteFlow::new();

        assert_eq!(flow.confirm(&store, &secret()).await, DeleteOutcome::Idle);
        assert_eq!(store.len().await, 1);
    }

    #[test]
    fn test_cancel_clears_everything() {
        let mut flow = DeleteFlow::new();
        flow.request("1");
        flow.set_password("99");
        flow.cancel();
        assert_eq!(flow.state(), &DeleteState::Idle);

        flow.set_password("010203");
        assert_eq!(flow.state(), &DeleteState::Idle);
    }

    #[test]
    fn test_pending_state_hides_password() {
        let mut flow = DeleteFlow::new();
        flow.request("abc");
        flow.set_password("010203");
        let json = serde_json::to_value(flow.state()).unwrap();
        assert_eq!(json["state"], "pending");
        assert_eq!(json["target_id"], "abc");
        assert!(json.get("password").is_none());
    }
}
