//! Image fitting.
//!
//! Scales a source image of any aspect ratio into an exact target canvas
//! while preserving the source aspect ratio, letterboxing whatever space is
//! left over.
//!
//! # Decision tree
//!
//! ```text
//!                 ratio(target) == ratio(source) ?
//!                   │yes                      │no
//!        ┌──────────┴──────────┐              │
//!   x == srcW            x < srcW             │
//!   Identity          Resize(x, y)            │
//!                                             │
//!        x > srcW ────────────────────────────┤
//!                                             ▼
//!                           x >= srcW && y >= srcH ?
//!                      yes │                 │ no
//!             compose source as is     scale to fit inside,
//!                                        then compose
//! ```
//!
//! Composition places the content on a target-sized canvas filled with a
//! [`FillColor`], centered with truncating integer division. Content pixels
//! replace canvas pixels; nothing is alpha blended.
//!
//! # Example
//!
//! ```
//! use image::RgbaImage;
//! use thumbnail_service::fit::{fit, TargetSpec};
//!
//! let source = RgbaImage::new(800, 600);
//! let target = TargetSpec::new(400, 400).unwrap();
//!
//! let out = fit(target, source);
//! assert_eq!(out.dimensions(), (400, 400));
//! ```

mod color;
mod plan;

pub use color::FillColor;
pub use plan::{aspect_ratio, centered_offset, plan, FitPlan, TargetSpec};

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Resampling filter used for every resize.
pub const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Fit `source` into `target` using the default (opaque black) fill.
pub fn fit(target: TargetSpec, source: RgbaImage) -> RgbaImage {
    fit_with_fill(target, source, FillColor::default())
}

/// Fit `source` into `target`, padding with `fill`.
///
/// The result always has exactly the target dimensions. When the source
/// already matches the target it is returned untouched.
pub fn fit_with_fill(target: TargetSpec, source: RgbaImage, fill: FillColor) -> RgbaImage {
    match plan(target, source.width(), source.height()) {
        FitPlan::Identity => source,
        FitPlan::Resize { width, height } => {
            imageops::resize(&source, width, height, RESAMPLE_FILTER)
        }
        FitPlan::Letterbox {
            content_width,
            content_height,
            x_pad,
            y_pad,
            resample,
        } => {
            if resample {
                let resized = imageops::resize(&source, content_width, content_height, RESAMPLE_FILTER);
                place(target, &resized, fill, x_pad, y_pad)
            } else {
                place(target, &source, fill, x_pad, y_pad)
            }
        }
    }
}

/// Center `content` on a new target-sized canvas filled with `fill`.
///
/// Content larger than the target is clipped at the right/bottom edges.
pub fn compose(target: TargetSpec, content: &RgbaImage, fill: FillColor) -> RgbaImage {
    let x_pad = centered_offset(target.width(), content.width());
    let y_pad = centered_offset(target.height(), content.height());
    place(target, content, fill, x_pad, y_pad)
}

/// Copy `content` onto a fresh `fill` canvas with its top-left at (`x_pad`, `y_pad`).
fn place(
    target: TargetSpec,
    content: &RgbaImage,
    fill: FillColor,
    x_pad: u32,
    y_pad: u32,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(target.width(), target.height(), fill.to_pixel());
    imageops::replace(&mut canvas, content, i64::from(x_pad), i64::from(y_pad));
    canvas
}
