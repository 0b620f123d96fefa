use super::{Filter, RemoteStore};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// PostgREST-compatible client for the hosted store.
///
/// Tables live under `{base_url}/rest/v1/{table}`. The API key is sent both
/// as the `apikey` header and as a bearer token, which is what the hosted
/// gateway expects for anonymous access.
#[derive(Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> StoreResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Build on top of an existing client (shares its connection pool)
    pub fn with_client(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }
}

/// Render filters as PostgREST query parameters
fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|filter| match filter {
            Filter::Eq(column, value) => (column.clone(), format!("eq.{}", value)),
            Filter::In(column, values) => {
                let quoted: Vec<String> = values
                    .iter()
                    .map(|v| format!("\"{}\"", v.replace('"', "\\\"")))
                    .collect();
                (column.clone(), format!("in.({})", quoted.join(",")))
            }
        })
        .collect()
}

/// Turn a response into rows, mapping non-success statuses to errors
async fn read_rows(response: reqwest::Response) -> StoreResult<Vec<Value>> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
        return Err(StoreError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl RemoteStore for RestStore {
    async fn select(&self, table: &str, filters: &[Filter]) -> StoreResult<Vec<Value>> {
        debug!("Store select on {} with {} filter(s)", table, filters.len());
        let response = self
            .request(reqwest::Method::GET, table)
            .query(&[("select", "*")])
            .query(&filter_params(filters))
            .send()
            .await?;
        read_rows(response).await
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> StoreResult<Vec<Value>> {
        debug!("Store insert of {} row(s) into {}", rows.len(), table);
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await?;
        read_rows(response).await
    }

    async fn upsert(
        &self,
        table: &str,
        rows: Vec<Value>,
        on_conflict: &[&str],
    ) -> StoreResult<Vec<Value>> {
        debug!("Store upsert of {} row(s) into {}", rows.len(), table);
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .query(&[("on_conflict", on_conflict.join(","))])
            .json(&rows)
            .send()
            .await?;
        read_rows(response).await
    }

    async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        patch: Value,
    ) -> StoreResult<Vec<Value>> {
        debug!("Store update on {} with {} filter(s)", table, filters.len());
        let response = self
            .request(reqwest::Method::PATCH, table)
            .header("Prefer", "return=representation")
            .query(&filter_params(filters))
            .json(&patch)
            .send()
            .await?;
        read_rows(response).await
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> StoreResult<()> {
        debug!("Store delete on {} with {} filter(s)", table, filters.len());
        let response = self
            .request(reqwest::Method::DELETE, table)
            .query(&filter_params(filters))
            .send()
            .await?;
        read_rows(response).await.map(|_| ())
    }
}
