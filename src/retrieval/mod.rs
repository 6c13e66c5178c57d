use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RetrievalConfig;
use crate::error::RetrievalError;

/// The external approximate-similarity search over ingested text blocks.
///
/// A black box from this crate's point of view: `search` returns up to
/// `k` raw blocks ranked most-similar-first, and may return fewer than
/// `k`, including zero. The similarity metric is the store's own.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<String>, RetrievalError>;
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    k: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<String>,
}

/// Thin JSON client for the similarity-search sidecar.
pub struct HttpRecordStore {
    client: Client,
    endpoint: String,
}

impl HttpRecordStore {
    pub fn new(config: &RetrievalConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build http client: {e}"))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<String>, RetrievalError> {
        debug!(query, k, "record store query");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&SearchRequest { query, k })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RetrievalError::Api { status, body });
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.results)
    }
}
