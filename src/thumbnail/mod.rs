//! Thumbnail service layer.
//!
//! Sits between the HTTP layer and the pure fitter:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │            ThumbnailService             │
//! │  ┌──────────────┐  ┌─────────────────┐  │
//! │  │ ImageSource  │  │ThumbnailEncoder │  │
//! │  │ (fetch)      │  │ (decode/encode) │  │
//! │  └──────────────┘  └─────────────────┘  │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │            fit (pure, no I/O)           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`ThumbnailService`]: entry point, runs fetch → decode → fit → encode
//! - [`ThumbnailEncoder`]: content-sniffing decoder and JPEG encoder
//! - [`ThumbnailRequest`] / [`ThumbnailResponse`]: request and result types

mod encoder;
mod service;

pub use encoder::{
    clamp_quality, is_valid_quality, ThumbnailEncoder, DEFAULT_JPEG_QUALITY, MAX_JPEG_QUALITY,
    MIN_JPEG_QUALITY,
};
pub use service::{ThumbnailRequest, ThumbnailResponse, ThumbnailService};
