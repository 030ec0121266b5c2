//! Thumbnail Service for orchestrating thumbnail generation.
//!
//! The ThumbnailService is the main entry point for thumbnail requests. It
//! orchestrates:
//! - Request validation
//! - Fetching the source image
//! - Decoding, fitting and JPEG encoding
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      ThumbnailService                           │
//! │  ┌─────────────────────────────────────────────────────────┐    │
//! │  │                    thumbnail()                          │    │
//! │  │  1. Validate quality   3. Decode → fit → encode         │    │
//! │  │  2. Fetch source          (blocking pool)               │    │
//! │  └─────────────────────────────────────────────────────────┘    │
//! │           │                    │                    │           │
//! │           ▼                    ▼                    ▼           │
//! │    ┌─────────────┐      ┌─────────────┐    ┌──────────────────┐ │
//! │    │ ImageSource │      │    fit()    │    │ ThumbnailEncoder │ │
//! │    └─────────────┘      └─────────────┘    └──────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use bytes::Bytes;
use tokio::task::JoinError;
use tracing::{debug, error};

use crate::error::ThumbnailError;
use crate::fetch::ImageSource;
use crate::fit::{fit_with_fill, FillColor, TargetSpec};

use super::encoder::{is_valid_quality, ThumbnailEncoder, DEFAULT_JPEG_QUALITY};

// =============================================================================
// Thumbnail Request
// =============================================================================

/// A request for a thumbnail.
#[derive(Debug, Clone)]
pub struct ThumbnailRequest {
    /// URL of the source image
    pub url: String,

    /// Exact output dimensions
    pub target: TargetSpec,

    /// JPEG quality (1-100). `None` uses the service default.
    pub quality: Option<u8>,
}

impl ThumbnailRequest {
    /// Create a new request using the service's default quality.
    pub fn new(url: impl Into<String>, target: TargetSpec) -> Self {
        Self {
            url: url.into(),
            target,
            quality: None,
        }
    }

    /// Create a new request with an explicit quality.
    pub fn with_quality(url: impl Into<String>, target: TargetSpec, quality: u8) -> Self {
        Self {
            url: url.into(),
            target,
            quality: Some(quality),
        }
    }
}

// =============================================================================
// Thumbnail Response
// =============================================================================

/// Response from the thumbnail service.
#[derive(Debug, Clone)]
pub struct ThumbnailResponse {
    /// The encoded JPEG data
    pub data: Bytes,

    /// Dimensions of the decoded source image
    pub source_dimensions: (u32, u32),

    /// The JPEG quality used for encoding
    pub quality: u8,
}

// =============================================================================
// Thumbnail Service
// =============================================================================

/// Service for generating thumbnails from remote images.
///
/// Holds no per-request state; a single instance is shared across handlers.
pub struct ThumbnailService<S: ImageSource> {
    source: Arc<S>,
    encoder: ThumbnailEncoder,
    fill: FillColor,
    default_quality: u8,
}

impl<S: ImageSource> ThumbnailService<S> {
    /// Create a new service with black fill and default quality.
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            encoder: ThumbnailEncoder::new(),
            fill: FillColor::default(),
            default_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Set the letterbox fill color.
    pub fn with_fill(mut self, fill: FillColor) -> Self {
        self.fill = fill;
        self
    }

    /// Set the JPEG quality used when a request does not specify one.
    pub fn with_default_quality(mut self, quality: u8) -> Self {
        self.default_quality = quality;
        self
    }

    /// Produce a JPEG thumbnail for `request`.
    ///
    /// The fetch happens on the async runtime; decoding, fitting and
    /// encoding are CPU bound and run on the blocking pool.
    ///
    /// # Errors
    ///
    /// - [`ThumbnailError::InvalidQuality`] for quality outside 1-100
    /// - [`ThumbnailError::Fetch`] if the source cannot be retrieved
    /// - [`ThumbnailError::Decode`] / [`ThumbnailError::Encode`] on codec failure
    pub async fn thumbnail(
        &self,
        request: ThumbnailRequest,
    ) -> Result<ThumbnailResponse, ThumbnailError> {
        let quality = request.quality.unwrap_or(self.default_quality);
        if !is_valid_quality(quality) {
            return Err(ThumbnailError::InvalidQuality { quality });
        }

        let source_bytes = self.source.fetch(&request.url).await?;

        let encoder = self.encoder.clone();
        let fill = self.fill;
        let target = request.target;

        let (data, source_dimensions) = tokio::task::spawn_blocking(move || {
            render(&encoder, &source_bytes, target, fill, quality)
        })
        .await
        .map_err(task_failed)??;

        debug!(
            url = %request.url,
            source_width = source_dimensions.0,
            source_height = source_dimensions.1,
            width = target.width(),
            height = target.height(),
            bytes = data.len(),
            "Rendered thumbnail"
        );

        Ok(ThumbnailResponse {
            data,
            source_dimensions,
            quality,
        })
    }
}

/// Log a failed blocking task and hide its panic payload from callers.
fn task_failed(err: JoinError) -> ThumbnailError {
    error!(error = %err, "Image task failed");
    ThumbnailError::Task
}

/// Decode, fit and encode. Returns the JPEG and the source dimensions.
fn render(
    encoder: &ThumbnailEncoder,
    source_bytes: &[u8],
    target: TargetSpec,
    fill: FillColor,
    quality: u8,
) -> Result<(Bytes, (u32, u32)), ThumbnailError> {
    let image = encoder.decode(source_bytes)?;
    let source_dimensions = image.dimensions();
    let fitted = fit_with_fill(target, image, fill);
    let data = encoder.encode(&fitted, quality)?;
    Ok((data, source_dimensions))
}

// =============================================================================
// Tests
// =============================================================================
