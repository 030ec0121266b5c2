//! Fit planning: the aspect-ratio decision tree.
//!
//! Everything here works on dimensions only, so the branch a request will
//! take can be inspected without touching pixels.

use std::num::NonZeroU32;

/// Requested output dimensions. Both are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetSpec {
    width: u32,
    height: u32,
}

impl TargetSpec {
    /// Create a target, or `None` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height })
    }

    /// Create a target from dimensions already known to be non-zero.
    pub fn from_non_zero(width: NonZeroU32, height: NonZeroU32) -> Self {
        Self {
            width: width.get(),
            height: height.get(),
        }
    }

    /// Target width (`x`).
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Target height (`y`).
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Height-to-width ratio.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        aspect_ratio(self.width, self.height)
    }
}

/// How a source image is turned into the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitPlan {
    /// Source already has the target dimensions.
    Identity,

    /// Same aspect ratio, smaller target: resample straight to the target.
    Resize { width: u32, height: u32 },

    /// Place `content_width`×`content_height` on a target-sized canvas at
    /// (`x_pad`, `y_pad`). When `resample` is false the source is placed
    /// as is.
    Letterbox {
        content_width: u32,
        content_height: u32,
        x_pad: u32,
        y_pad: u32,
        resample: bool,
    },
}

/// Height-to-width ratio of a `width`×`height` raster.
#[inline]
pub fn aspect_ratio(width: u32, height: u32) -> f64 {
    height as f64 / width as f64
}

/// Offset that centers `inner` within `outer`, truncated toward the top/left.
#[inline]
pub fn centered_offset(outer: u32, inner: u32) -> u32 {
    outer.saturating_sub(inner) / 2
}

/// Decide how to fit a `source_width`×`source_height` image into `target`.
///
/// Aspect ratios are compared with exact floating point equality, so a
/// target that differs from the source ratio by any representable amount is
/// letterboxed. Same-ratio targets larger than the source are never
/// upscaled; the source is centered on the canvas instead.
///
/// Source dimensions must be non-zero.
pub fn plan(target: TargetSpec, source_width: u32, source_height: u32) -> FitPlan {
    let (x, y) = (target.width(), target.height());
    let required_ratio = target.aspect_ratio();
    let source_ratio = aspect_ratio(source_width, source_height);

    #[allow(clippy::float_cmp)]
    let same_ratio = required_ratio == source_ratio;

    if same_ratio && x == source_width {
        return FitPlan::Identity;
    }
    if same_ratio && x < source_width {
        return FitPlan::Resize {
            width: x,
            height: y,
        };
    }

    let (content_width, content_height, resample) = if x >= source_width && y >= source_height {
        (source_width, source_height, false)
    } else {
        let ratio_x = x as f64 / source_width as f64;
        let ratio_y = y as f64 / source_height as f64;
        if ratio_x < ratio_y {
            // width binds
            (x, scaled(x as f64 * source_ratio, y), true)
        } else {
            // height binds
            (scaled(y as f64 / source_ratio, x), y, true)
        }
    };

    FitPlan::Letterbox {
        content_width,
        content_height,
        x_pad: centered_offset(x, content_width),
        y_pad: centered_offset(y, content_height),
        resample,
    }
}

/// Round a scaled dimension into `1..=limit`.
fn scaled(value: f64, limit: u32) -> u32 {
    (value.round() as u32).clamp(1, limit)
}
