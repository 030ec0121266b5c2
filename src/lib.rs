//! # Thumbnail Service
//!
//! An HTTP service that fetches a remote image, fits it into an exact
//! caller-specified size and returns a JPEG thumbnail.
//!
//! ## Fitting
//!
//! The interesting part is [`fit()`]: a pure function that scales a source of
//! any aspect ratio into an exact `x`×`y` canvas without distorting it.
//! Matching aspect ratios are resampled directly; anything else is scaled to
//! fit inside the target and centered on a solid-color canvas (letterboxed).
//! Sources smaller than the target are never upscaled.
//!
//! ## Architecture
//!
//! - [`mod@fit`] - Aspect-ratio decision tree, resampling and canvas composition
//! - [`fetch`] - Source image retrieval over HTTP(S)
//! - [`thumbnail`] - Decode → fit → encode pipeline
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use thumbnail_service::{create_router, HttpImageSource, RouterConfig, ThumbnailService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = HttpImageSource::with_defaults()?;
//!     let service = ThumbnailService::new(source);
//!     let router = create_router(service, RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod fit;
pub mod server;
pub mod thumbnail;

// Re-export commonly used types
pub use config::Config;
pub use error::{FetchError, ThumbnailError};
pub use fetch::{HttpImageSource, ImageSource};
pub use fit::{compose, fit, fit_with_fill, plan, FillColor, FitPlan, TargetSpec};
pub use server::{
    create_router, health_handler, index_handler, thumbnail_handler, AppState, ErrorResponse,
    HealthResponse, RouterConfig, ThumbnailQueryParams,
};
pub use thumbnail::{
    clamp_quality, is_valid_quality, ThumbnailEncoder, ThumbnailRequest, ThumbnailResponse,
    ThumbnailService, DEFAULT_JPEG_QUALITY, MAX_JPEG_QUALITY, MIN_JPEG_QUALITY,
};
