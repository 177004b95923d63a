//! PostgREST client for the hosted transactions table

use std::time::Duration;

use async_trait::async_trait;
use cafe_config::StoreConfig;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::models::{NewTransaction, Transaction, TransactionQuery};
use crate::TransactionStore;

/// Store backed by a hosted table exposed through PostgREST
pub struct RestStore {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
    table: String,
}

#[derive(Serialize)]
struct PaidUpdate {
    is_paid: bool,
}

impl RestStore {
    const REST_PATH: &'static str = "/rest/v1";

    /// Build a client from the `store` config section
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let url = config.url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(StoreError::InvalidConfig("store.url is empty".to_string()));
        }

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
            base_url: format!("{}{}", url, Self::REST_PATH),
            table: config.table.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.base_url, self.table)
    }

    /// Default headers with key and bearer authorization
    fn create_headers(&self) -> StoreResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| StoreError::InvalidConfig(format!("Invalid API key header: {}", e)))?;
        headers.insert("apikey", key);

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| StoreError::InvalidConfig(format!("Failed to create auth header: {}", e)))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    /// Headers for writes that must echo the affected rows
    fn create_write_headers(&self) -> StoreResult<HeaderMap> {
        let mut headers = self.create_headers()?;
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        Ok(headers)
    }

    /// Map a non-success response onto a store error
    async fn handle_error_response(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let body_text = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<serde_json::Value>(&body_text)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or(body_text);

        match status {
            400 | 409 | 422 => StoreError::BadRequest(message),
            401 | 403 => StoreError::Unauthorized(message),
            404 => StoreError::HttpError(status, message),
            500..=599 => {
                warn!("Store server error {}: {}", status, message);
                StoreError::ServerError(status, message)
            }
            _ => StoreError::HttpError(status, message),
        }
    }

    /// Decode a row array, failing on error statuses
    async fn read_rows(response: reqwest::Response) -> StoreResult<Vec<Transaction>> {
        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        response
            .json::<Vec<Transaction>>()
            .await
            .map_err(|e| StoreError::DeserializationError(format!("Failed to parse rows: {}", e)))
    }

    /// Filter parameters for a query
    fn query_params(query: &TransactionQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![("select", "*".to_string())];
        if let Some(date) = query.transaction_date {
            params.push(("transaction_date", format!("eq.{}", date.format("%Y-%m-%d"))));
        }
        if let Some(ref needle) = query.name_contains {
            params.push(("customer_name", format!("ilike.*{}*", escape_like(needle))));
        }
        params.push(("order", "created_at.desc".to_string()));
        params
    }
}

/// Escape LIKE metacharacters so the needle matches literally
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Drop rows the server matched more loosely than a literal substring.
///
/// PostgREST reads `*` in an `ilike` value as a wildcard and offers no escape
/// for it.
fn retain_matches(query: &TransactionQuery, mut rows: Vec<Transaction>) -> Vec<Transaction> {
    rows.retain(|t| query.matches(t));
    rows
}

#[async_trait]
impl TransactionStore for RestStore {
    async fn query(&self, query: &TransactionQuery) -> StoreResult<Vec<Transaction>> {
        let params = Self::query_params(query);
        debug!("GET {} {:?}", self.table_url(), params);

        let response = self
            .http_client
            .get(self.table_url())
            .headers(self.create_headers()?)
            .query(&params)
            .send()
            .await?;

        let rows = Self::read_rows(response).await?;
        Ok(retain_matches(query, rows))
    }

    async fn insert(&self, new: NewTransaction) -> StoreResult<Transaction> {
        let response = self
            .http_client
            .post(self.table_url())
            .headers(self.create_write_headers()?)
            .json(&[&new])
            .send()
            .await?;

        Self::read_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::DeserializationError("Insert returned no row".to_string()))
    }

    async fn set_paid(&self, id: &str, is_paid: bool) -> StoreResult<Transaction> {
        let response = self
            .http_client
            .patch(self.table_url())
            .headers(self.create_write_headers()?)
            .query(&[("id", format!("eq.{}", id))])
            .json(&PaidUpdate { is_paid })
            .send()
            .await?;

        Self::read_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let response = self
            .http_client
            .delete(self.table_url())
            .headers(self.create_write_headers()?)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;

        if Self::read_rows(response).await?.is_empty() {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config() -> StoreConfig {
        StoreConfig {
            url: "https://cafe.example.co/".to_string(),
            api_key: "anon-key".to_string(),
            ..StoreConfig::default()
        }
    }

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let store = RestStore::new(&config()).unwrap();
        assert_eq!(store.table_url(), "https://cafe.example.co/rest/v1/transactions");
    }

    #[test]
    fn test_empty_url_rejected() {
        let config = StoreConfig { url: "  ".to_string(), ..config() };
        assert!(matches!(RestStore::new(&config), Err(StoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_headers_carry_key() {
        let store = RestStore::new(&config()).unwrap();
        let headers = store.create_write_headers().unwrap();
        assert_eq!(headers.get("apikey").unwrap(), "anon-key");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer anon-key");
        assert_eq!(headers.get("Prefer").unwrap(), "return=representation");
    }

    #[test]
    fn test_query_params_for_today() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let params = RestStore::query_params(&TransactionQuery::on_date(date));
        assert!(params.contains(&("transaction_date", "eq.2024-05-01".to_string())));
        assert!(params.contains(&("order", "created_at.desc".to_string())));
    }

    #[test]
    fn test_star_in_needle_matches_literally() {
        let query = TransactionQuery::name_contains("s*a");
        let row = |id: &str, name: &str| Transaction {
            id: id.to_string(),
            customer_name: name.to_string(),
            amount: rust_decimal::Decimal::from(10),
            tip: rust_decimal::Decimal::ZERO,
            is_paid: false,
            transaction_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            created_at: chrono::Utc::now(),
        };

        let kept = retain_matches(&query, vec![row("1", "Sara"), row("2", "Las*ana")]);

        let ids: Vec<_> = kept.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn test_query_params_for_name_search() {
        let params = RestStore::query_params(&TransactionQuery::name_contains("ali_"));
        assert!(params.contains(&("customer_name", "ilike.*ali\\_*".to_string())));
    }
}
