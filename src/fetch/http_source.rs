use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::ImageSource;
use crate::error::FetchError;

/// Default request timeout for source fetches, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Default cap on source body size (32 MiB).
pub const DEFAULT_MAX_SOURCE_BYTES: u64 = 32 * 1024 * 1024;

/// User-Agent sent with every source fetch.
pub const USER_AGENT: &str = concat!("thumbnail-service/", env!("CARGO_PKG_VERSION"));

/// HTTP(S) implementation of [`ImageSource`] backed by reqwest.
///
/// Only `http` and `https` URLs are accepted. Any non-2xx response is a
/// failure, and bodies larger than `max_bytes` are rejected both up front
/// (via `Content-Length`) and while streaming.
#[derive(Clone)]
pub struct HttpImageSource {
    client: Client,
    max_bytes: u64,
}

impl HttpImageSource {
    /// Create a source with the given request timeout and body size cap.
    pub fn new(timeout: Duration, max_bytes: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Connection(e.to_string()))?;

        Ok(Self { client, max_bytes })
    }

    /// Create a source with default timeout and size limit.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(
            Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            DEFAULT_MAX_SOURCE_BYTES,
        )
    }

    /// Maximum accepted body size in bytes.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }
}

/// Parse `url` and check it uses a scheme this source can fetch.
pub(crate) fn parse_source_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let url = parse_source_url(url)?;

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(len) = response.content_length() {
            if len > self.max_bytes {
                return Err(FetchError::TooLarge {
                    limit: self.max_bytes,
                });
            }
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))?
        {
            if (body.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(FetchError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        debug!(url = %url, bytes = body.len(), "Fetched source image");

        Ok(body.freeze())
    }
}
