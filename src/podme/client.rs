use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use super::{EpisodeDetail, EpisodeSummary, PodcastMetadata, PodcastSource};
use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum PodmeError {
    /// Upstream answered with a non-success status.
    #[error("{path} returned {status}")]
    Status { path: String, status: StatusCode },

    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body was not JSON, or did not have the expected shape.
    #[error("unable to parse response from {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid upstream URL: {0}")]
    Url(String),
}

#[derive(Clone)]
pub struct PodmeClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl PodmeClient {
    pub fn new(config: &AppConfig) -> Result<Self, PodmeError> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| PodmeError::Url(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(PodmeError::Url(format!("{} cannot be a base URL", base_url)));
        }

        // No timeout unless one is configured explicitly.
        let mut builder = Client::builder().user_agent(concat!("podme-rss/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| PodmeError::Transport {
            path: base_url.to_string(),
            source: e,
        })?;

        Ok(Self {
            client,
            base_url,
            token: config.podme_token.clone().unwrap_or_default(),
        })
    }

    /// Resolves path segments against the base URL, percent-encoding each one.
    pub fn url_for(&self, segments: &[&str]) -> Result<Url, PodmeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PodmeError::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `base + /segments..` with the bearer token and decode the JSON body as `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, PodmeError> {
        let url = self.url_for(segments)?;
        let path = url.path().to_string();
        tracing::debug!(path = %path, "Fetching from PodMe");

        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| PodmeError::Transport {
                path: path.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Got non-success response for {}: {}", path, status);
            return Err(PodmeError::Status { path, status });
        }

        let body = response.bytes().await.map_err(|source| PodmeError::Transport {
            path: path.clone(),
            source,
        })?;
        serde_json::from_slice(&body).map_err(|source| PodmeError::Parse { path, source })
    }
}

impl PodcastSource for PodmeClient {
    async fn episodes(&self, slug: &str) -> Result<Vec<EpisodeSummary>, PodmeError> {
        self.fetch(&["episode", "slug", slug]).await
    }

    async fn podcast(&self, slug: &str) -> Result<PodcastMetadata, PodmeError> {
        self.fetch(&["podcast", "slug", slug]).await
    }

    async fn episode_detail(&self, id: i64) -> Result<EpisodeDetail, PodmeError> {
        let id = id.to_string();
        self.fetch(&["episode", &id]).await
    }
}
