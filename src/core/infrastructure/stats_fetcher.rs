//! HTTP client side of the exporter: one GET against a node's admin API per scrape.

use crate::core::domain::{
    error::{ExporterError, ExporterResult},
    model::stats_document::StatsDocument,
    value_object::NodeUrl,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::debug;

/// Path of the cluster overview endpoint, relative to the node URL.
pub const STATS_PATH: &str = "/pools/default";

/// Upper bound for a single stats request, so a hung node cannot stall a scrape.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the process-wide HTTP client used for every stats request.
///
/// # Errors
/// Returns `ExporterError::Transport` if the HTTP client cannot be built.
pub fn build_http_client() -> ExporterResult<Client> {
    build_http_client_with_timeout(REQUEST_TIMEOUT)
}

/// Builds an HTTP client whose requests give up after `timeout`.
///
/// # Errors
/// Returns `ExporterError::Transport` if the HTTP client cannot be built.
pub fn build_http_client_with_timeout(timeout: Duration) -> ExporterResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ExporterError::Transport(e.to_string()))
}

/// Anything able to produce a fresh stats document for a node.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Fetches the current statistics of the node at `node_url`.
    async fn fetch(&self, node_url: &NodeUrl) -> ExporterResult<StatsDocument>;
}

/// Fetches `/pools/default` from a Couchbase node.
///
/// The wrapped `reqwest::Client` is built once at startup and shared; cloning
/// a `StatsFetcher` shares the same connection pool.
#[derive(Debug, Clone)]
pub struct StatsFetcher {
    http_client: Client,
}

impl StatsFetcher {
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl StatsSource for StatsFetcher {
    /// Performs the GET request and decodes the body.
    ///
    /// # Errors
    /// - `ExporterError::Transport` if the request cannot be sent or the body read
    /// - `ExporterError::Upstream` if the node answers with anything but 200
    /// - `ExporterError::Decode` if the body is not a stats document
    async fn fetch(&self, node_url: &NodeUrl) -> ExporterResult<StatsDocument> {
        let url = node_url.with_path(STATS_PATH);
        let started = Instant::now();

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ExporterError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ExporterError::Transport(format!("Failed to read response body: {}", e))
        })?;

        if status != StatusCode::OK {
            return Err(ExporterError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let document: StatsDocument = serde_json::from_str(&body)
            .map_err(|e| ExporterError::Decode(format!("Failed to parse node stats: {}", e)))?;

        debug!(
            url = %url,
            nodes = document.nodes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched node stats"
        );

        Ok(document)
    }
}
