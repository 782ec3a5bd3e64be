//! HTTP client for the dictionary service.

use reqwest::Url;
use thiserror::Error;
use tracing::debug;

use crate::config::ServiceConfig;
use crate::protocol::{DictionaryResponse, ProtocolError};

/// Why a lookup produced no usable answer.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid service base URL {url:?}: {reason}")]
    BaseUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(#[from] ProtocolError),
}

/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct DictionaryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DictionaryClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, LookupError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| LookupError::BaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::BaseUrl {
                url: config.base_url.clone(),
                reason: "URL cannot carry a path".to_string(),
            });
        }
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { http, base_url })
    }

    /// URL for `word`: the base URL with the word as one extra,
    /// percent-encoded, path segment.
    pub fn entry_url(&self, word: &str) -> Url {
        let mut url = self.base_url.clone();
        // new() rejected cannot-be-a-base URLs, so this always succeeds
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(word);
        }
        url
    }

    /// One GET for `word`. The HTTP status is not inspected: the service
    /// reports unknown words with a 404 whose body is the not-found shape.
    pub async fn lookup(&self, word: &str) -> Result<DictionaryResponse, LookupError> {
        let url = self.entry_url(word);
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        debug!("dictionary replied {} ({} bytes)", status, body.len());
        Ok(DictionaryResponse::parse(&body)?)
    }
}
