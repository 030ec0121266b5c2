//! Thumbnail codec.
//!
//! Decodes source bytes of any format the `image` crate was built with
//! (JPEG, PNG, GIF) and encodes fitted output as baseline JPEG.
//!
//! # Design Decisions
//!
//! - **Sniffed format**: the source format is guessed from content, never from
//!   the URL or a `Content-Type` header.
//!
//! - **RGBA in, RGB out**: the fitter works on RGBA. JPEG has no alpha channel,
//!   so alpha is discarded on encode and transparent fill renders as its
//!   underlying color.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader, RgbaImage};
use std::io::Cursor;

use crate::error::ThumbnailError;

/// Default JPEG quality (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Minimum allowed JPEG quality.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Maximum allowed JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

// =============================================================================
// Encoder
// =============================================================================

/// Decoder/encoder pair used by the thumbnail pipeline.
///
/// # Example
///
/// ```ignore
/// use thumbnail_service::thumbnail::ThumbnailEncoder;
///
/// let encoder = ThumbnailEncoder::new();
/// let image = encoder.decode(&source_bytes)?;
/// let jpeg = encoder.encode(&image, 85)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThumbnailEncoder {}

impl ThumbnailEncoder {
    /// Create a new thumbnail encoder.
    pub fn new() -> Self {
        Self {}
    }

    /// Decode source bytes into an RGBA raster.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbnailError::Decode`] if the format cannot be recognised,
    /// is not compiled in, or the data is corrupt. Zero-sized images are
    /// rejected as well since nothing can be fitted from them.
    pub fn decode(&self, source: &[u8]) -> Result<RgbaImage, ThumbnailError> {
        let reader = ImageReader::new(Cursor::new(source))
            .with_guessed_format()
            .map_err(|e| ThumbnailError::Decode {
                message: e.to_string(),
            })?;

        let img = reader.decode().map_err(|e| ThumbnailError::Decode {
            message: e.to_string(),
        })?;

        if img.width() == 0 || img.height() == 0 {
            return Err(ThumbnailError::Decode {
                message: format!("image has zero size ({}x{})", img.width(), img.height()),
            });
        }

        Ok(img.into_rgba8())
    }

    /// Encode an RGBA raster as JPEG at the given quality.
    ///
    /// Quality is clamped to 1-100.
    pub fn encode(&self, image: &RgbaImage, quality: u8) -> Result<Bytes, ThumbnailError> {
        let quality = clamp_quality(quality);

        // JPEG has no alpha channel
        let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();

        let mut output = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut output, quality);

        encoder
            .encode_image(&rgb)
            .map_err(|e| ThumbnailError::Encode {
                message: e.to_string(),
            })?;

        Ok(Bytes::from(output))
    }
}

// =============================================================================
// Utility Functions
// =============================================================================

/// Returns `true` if quality is in the valid range (1-100).
#[inline]
pub fn is_valid_quality(quality: u8) -> bool {
    (MIN_JPEG_QUALITY..=MAX_JPEG_QUALITY).contains(&quality)
}

/// Clamp quality to 1-100.
#[inline]
pub fn clamp_quality(quality: u8) -> u8 {
    quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY)
}

// =============================================================================
// Tests
// =============================================================================
