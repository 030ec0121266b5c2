//! Configuration management for the thumbnail service.
//!
//! Options come from command-line arguments via clap, with environment
//! variable fallbacks and defaults for everything.
//!
//! # Environment Variables
//!
//! - `THUMB_HOST` - Server bind address (default: 0.0.0.0)
//! - `PORT` - Server port (default: 8080)
//! - `THUMB_JPEG_QUALITY` - Default JPEG quality (default: 80)
//! - `THUMB_FILL_COLOR` - Letterbox fill color (default: black)
//! - `THUMB_FETCH_TIMEOUT` - Source fetch timeout in seconds (default: 30)
//! - `THUMB_MAX_SOURCE_BYTES` - Maximum source body size (default: 32 MiB)
//! - `THUMB_CACHE_MAX_AGE` - HTTP cache max-age seconds (default: 3600)
//! - `THUMB_MAX_DIMENSION` - Largest accepted thumbnail width or height (default: 4096)
//! - `THUMB_CORS_ORIGINS` - Allowed CORS origins, comma separated

use std::time::Duration;

use clap::Parser;

use crate::fetch::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_SOURCE_BYTES};
use crate::fit::FillColor;
use crate::server::{DEFAULT_CACHE_MAX_AGE, DEFAULT_MAX_DIMENSION};
use crate::thumbnail::{is_valid_quality, DEFAULT_JPEG_QUALITY};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8080;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Thumbnail service - letterboxed JPEG thumbnails of remote images.
#[derive(Parser, Debug, Clone)]
#[command(name = "thumbnail-service")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "THUMB_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    /// Default JPEG quality for thumbnails (1-100).
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, env = "THUMB_JPEG_QUALITY")]
    pub jpeg_quality: u8,

    /// Letterbox fill color: #RGB, #RGBA, #RRGGBB, #RRGGBBAA, black, white or transparent.
    #[arg(long, default_value = "black", env = "THUMB_FILL_COLOR")]
    pub fill_color: FillColor,

    /// Source fetch timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS, env = "THUMB_FETCH_TIMEOUT")]
    pub fetch_timeout: u64,

    /// Maximum accepted source image size in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_SOURCE_BYTES, env = "THUMB_MAX_SOURCE_BYTES")]
    pub max_source_bytes: u64,

    /// HTTP Cache-Control max-age in seconds.
    #[arg(long, default_value_t = DEFAULT_CACHE_MAX_AGE, env = "THUMB_CACHE_MAX_AGE")]
    pub cache_max_age: u32,

    /// Largest accepted thumbnail width or height in pixels.
    #[arg(long, default_value_t = DEFAULT_MAX_DIMENSION, env = "THUMB_MAX_DIMENSION")]
    pub max_dimension: u32,

    /// Allowed CORS origins (comma-separated). Any origin if unset.
    #[arg(long, env = "THUMB_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !is_valid_quality(self.jpeg_quality) {
            return Err("jpeg_quality must be between 1 and 100".to_string());
        }

        if self.fetch_timeout == 0 {
            return Err("fetch_timeout must be greater than 0".to_string());
        }

        if self.max_source_bytes == 0 {
            return Err("max_source_bytes must be greater than 0".to_string());
        }

        if self.max_dimension == 0 {
            return Err("max_dimension must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Source fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

// =============================================================================
// Tests
// =============================================================================
