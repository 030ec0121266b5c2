//! HTTP request handlers for the thumbnail API.
//!
//! # Endpoints
//!
//! - `GET /thumbnail?url=<source-url>&x=<width>&y=<height>` - Serve a thumbnail
//! - `GET /health` - Health check endpoint
//! - `GET /` - Welcome banner

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::ThumbnailError;
use crate::fetch::ImageSource;
use crate::fit::TargetSpec;
use crate::thumbnail::{ThumbnailRequest, ThumbnailService};

/// Default Cache-Control max-age in seconds (1 hour).
pub const DEFAULT_CACHE_MAX_AGE: u32 = 3600;

/// Default upper bound for `x` and `y`. A 4096×4096 RGBA canvas is 64 MiB.
pub const DEFAULT_MAX_DIMENSION: u32 = 4096;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the thumbnail service.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<S: ImageSource> {
    /// The thumbnail service for processing requests
    pub thumbnail_service: Arc<ThumbnailService<S>>,

    /// Cache-Control max-age in seconds
    pub cache_max_age: u32,

    /// Largest accepted `x` or `y`
    pub max_dimension: u32,
}

impl<S: ImageSource> AppState<S> {
    /// Create a new application state with the given thumbnail service.
    pub fn new(thumbnail_service: ThumbnailService<S>) -> Self {
        Self::with_cache_max_age(thumbnail_service, DEFAULT_CACHE_MAX_AGE)
    }

    /// Create a new application state with custom cache max-age.
    pub fn with_cache_max_age(thumbnail_service: ThumbnailService<S>, cache_max_age: u32) -> Self {
        Self {
            thumbnail_service: Arc::new(thumbnail_service),
            cache_max_age,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }

    /// Set the largest accepted target dimension.
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }
}

impl<S: ImageSource> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            thumbnail_service: Arc::clone(&self.thumbnail_service),
            cache_max_age: self.cache_max_age,
            max_dimension: self.max_dimension,
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for thumbnail requests.
///
/// Parsed by hand from the raw query map so that missing or malformed
/// values produce our own `400` body instead of the extractor's rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailQueryParams {
    /// Source image URL (empty when absent; the fetch layer rejects it)
    pub url: String,

    /// Output dimensions
    pub target: TargetSpec,

    /// Optional JPEG quality override
    pub quality: Option<u8>,
}

impl ThumbnailQueryParams {
    /// Parse and validate raw query parameters.
    ///
    /// `x` and `y` must each be in `1..=max_dimension`.
    pub fn from_query(
        query: &HashMap<String, String>,
        max_dimension: u32,
    ) -> Result<Self, ThumbnailError> {
        let x = parse_dimension(query, "x", max_dimension)?;
        let y = parse_dimension(query, "y", max_dimension)?;

        let quality = match query.get("quality") {
            None => None,
            Some(raw) => Some(raw.trim().parse::<u8>().map_err(|e| {
                ThumbnailError::InvalidParameter {
                    name: "quality",
                    message: e.to_string(),
                }
            })?),
        };

        Ok(Self {
            url: query.get("url").cloned().unwrap_or_default(),
            target: TargetSpec::from_non_zero(x, y),
            quality,
        })
    }

    /// Convert into a service request.
    pub fn into_request(self) -> ThumbnailRequest {
        ThumbnailRequest {
            url: self.url,
            target: self.target,
            quality: self.quality,
        }
    }
}

/// Parse a dimension in `1..=max` from the query.
fn parse_dimension(
    query: &HashMap<String, String>,
    name: &'static str,
    max: u32,
) -> Result<NonZeroU32, ThumbnailError> {
    let raw = query.get(name).ok_or(ThumbnailError::InvalidParameter {
        name,
        message: "missing".to_string(),
    })?;

    let value = raw
        .trim()
        .parse::<u32>()
        .map_err(|e| ThumbnailError::InvalidParameter {
            name,
            message: e.to_string(),
        })?;

    if value > max {
        return Err(ThumbnailError::InvalidParameter {
            name,
            message: format!("must be at most {}", max),
        });
    }

    NonZeroU32::new(value).ok_or(ThumbnailError::InvalidParameter {
        name,
        message: "must be greater than zero".to_string(),
    })
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable reason
    pub reason: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

impl ThumbnailError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ThumbnailError::InvalidParameter { .. } | ThumbnailError::InvalidQuality { .. } => {
                StatusCode::BAD_REQUEST
            }
            ThumbnailError::Fetch(_) => StatusCode::NOT_FOUND,
            ThumbnailError::Decode { .. }
            | ThumbnailError::Encode { .. }
            | ThumbnailError::Task => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert ThumbnailError to HTTP response.
///
/// - 5xx errors are logged at ERROR level
/// - 404s are logged at DEBUG level (a bad source URL is the caller's problem)
/// - other 4xx errors are logged at WARN level
impl IntoResponse for ThumbnailError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let reason = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), "Server error: {}", reason);
        } else if status == StatusCode::NOT_FOUND {
            debug!(status = status.as_u16(), "Source not found: {}", reason);
        } else {
            warn!(status = status.as_u16(), "Client error: {}", reason);
        }

        (status, Json(ErrorResponse::new(reason))).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle thumbnail requests.
///
/// # Endpoint
///
/// `GET /thumbnail?url=<source-url>&x=<width>&y=<height>`
///
/// # Query Parameters
///
/// - `url`: Source image URL (http or https)
/// - `x`: Output width in pixels (1 to the configured maximum)
/// - `y`: Output height in pixels (1 to the configured maximum)
/// - `quality`: JPEG quality 1-100 (optional)
///
/// # Response
///
/// - `200 OK`: JPEG image, exactly `x`×`y`
/// - `400 Bad Request`: Missing, invalid or oversized `x`/`y`, or invalid `quality`
/// - `404 Not Found`: Source could not be fetched
/// - `500 Internal Server Error`: Decode or encode failure
///
/// # Headers
///
/// - `Content-Type: image/jpeg`
/// - `Content-Length: <n>`
/// - `Cache-Control: public, max-age={cache_max_age}`
/// - `X-Thumbnail-Quality`, `X-Source-Size`
pub async fn thumbnail_handler<S: ImageSource>(
    State(state): State<AppState<S>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, ThumbnailError> {
    let request = ThumbnailQueryParams::from_query(&query, state.max_dimension)?.into_request();

    let response = state.thumbnail_service.thumbnail(request).await?;

    let (source_width, source_height) = response.source_dimensions;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/jpeg".to_string()),
            (header::CONTENT_LENGTH, response.data.len().to_string()),
            (
                header::CACHE_CONTROL,
                format!("public, max-age={}", state.cache_max_age),
            ),
        ],
        [
            ("X-Thumbnail-Quality", response.quality.to_string()),
            (
                "X-Source-Size",
                format!("{}x{}", source_width, source_height),
            ),
        ],
        response.data,
    )
        .into_response())
}

/// Handle health check requests.
///
/// `GET /health` → `{"status": "healthy", "version": "0.1.0"}`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle `GET /` with a plain-text banner.
pub async fn index_handler() -> &'static str {
    info!("Index requested");
    "Welcome to thumbnail service!\n"
}

// =============================================================================
// Tests
// =============================================================================
