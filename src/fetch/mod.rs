//! Source image fetching.
//!
//! The thumbnail service only needs the raw bytes behind a URL. That need is
//! captured by the [`ImageSource`] trait so the HTTP implementation can be
//! swapped for an in-memory one in tests.

mod http_source;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::FetchError;

pub use http_source::{
    HttpImageSource, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_SOURCE_BYTES, USER_AGENT,
};

/// Trait for retrieving the encoded bytes of a source image.
///
/// Implementations must be thread-safe; one instance is shared by every
/// request handler.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch the full body behind `url`.
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}
