use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::NodeRecord,
    protocol::{cluster_route, node_route_prefix},
};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub mod format;
pub mod render;
pub mod view;

pub use format::DisplayZone;
pub use view::{NodeListView, ViewEvent};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid api url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected response status {status}")]
    Status { status: StatusCode },
    #[error("malformed response body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Source of the cluster's node list.
#[async_trait]
pub trait ClusterSource: Send + Sync {
    async fn nodes(&self) -> Result<Vec<NodeRecord>, FetchError>;

    /// Looks up one node; `Ok(None)` when the registry does not know it.
    async fn node(&self, id: &str) -> Result<Option<NodeRecord>, FetchError>;
}

/// Reads the registry admin API over HTTP.
pub struct HttpClusterClient {
    http: Client,
    base_url: Url,
}

impl HttpClusterClient {
    pub fn new(api_url: &str) -> Result<Self, FetchError> {
        Self::with_timeout(api_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(api_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let invalid = |reason: String| FetchError::InvalidBaseUrl {
            url: api_url.to_string(),
            reason,
        };

        let base_url = Url::parse(api_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", base_url.scheme())));
        }
        if base_url.cannot_be_a_base() {
            return Err(invalid("url cannot carry a path".to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Transport)?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, route: &str, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(route.split('/').filter(|s| !s.is_empty()));
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<Option<T>, FetchError> {
        debug!(%url, "admin api request");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(FetchError::Decode)
    }
}

#[async_trait]
impl ClusterSource for HttpClusterClient {
    async fn nodes(&self) -> Result<Vec<NodeRecord>, FetchError> {
        let url = self.endpoint(cluster_route(), None);
        // The cluster listing always exists, so a 404 is a failure here.
        self.get_json(url).await?.ok_or(FetchError::Status {
            status: StatusCode::NOT_FOUND,
        })
    }

    async fn node(&self, id: &str) -> Result<Option<NodeRecord>, FetchError> {
        let url = self.endpoint(node_route_prefix(), Some(id));
        self.get_json(url).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
