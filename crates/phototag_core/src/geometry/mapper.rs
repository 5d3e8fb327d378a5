//! Screen-space to natural-space coordinate transforms.
//!
//! # Responsibility
//! - Map pointer clicks into resolution-independent image coordinates.
//! - Re-project stored coordinates onto the current rendered box.
//!
//! # Invariants
//! - `to_natural` and `to_screen` are exact inverses up to floating-point
//!   tolerance for any positive rendered and natural sizes.
//! - `to_natural` clamps its result to the image bounds, so stored
//!   coordinates always satisfy `0 <= x <= width`, `0 <= y <= height`.

use crate::model::tag::NaturalPoint;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for coordinate mapping.
pub type MapResult<T> = Result<T, MapError>;

/// The rendered image element's box in screen space.
///
/// `left`/`top` locate the box in client coordinates; `width`/`height` are
/// the actual rendered size, which may distort the image's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl RenderedBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    fn is_laid_out(&self) -> bool {
        self.width > 0.0 && self.width.is_finite() && self.height > 0.0 && self.height.is_finite()
    }
}

/// An image's natural (decoded, unscaled) pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NaturalSize {
    pub width: f64,
    pub height: f64,
}

impl NaturalSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_ready(&self) -> bool {
        self.width > 0.0 && self.width.is_finite() && self.height > 0.0 && self.height.is_finite()
    }
}

/// A point relative to the rendered box origin, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Precondition gates for coordinate mapping.
///
/// Neither variant is a failure state; callers wait for layout/decoding
/// and retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The image has no decoded dimensions yet.
    ImageNotReady,
    /// The rendered element has zero extent (layout has not finished).
    BoxNotLaidOut,
}

impl Display for MapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageNotReady => write!(f, "image natural dimensions are not known yet"),
            Self::BoxNotLaidOut => write!(f, "rendered image box has no extent yet"),
        }
    }
}

impl Error for MapError {}

/// Maps a pointer event in client coordinates to natural image space.
///
/// The offset within the box scales per axis by `natural / rendered`, and
/// the result is clamped to the image bounds so out-of-box clicks land on
/// the nearest edge.
pub fn to_natural(
    pointer_x: f64,
    pointer_y: f64,
    rendered: &RenderedBox,
    natural: NaturalSize,
) -> MapResult<NaturalPoint> {
    if !natural.is_ready() {
        return Err(MapError::ImageNotReady);
    }
    if !rendered.is_laid_out() {
        return Err(MapError::BoxNotLaidOut);
    }

    let offset_x = pointer_x - rendered.left;
    let offset_y = pointer_y - rendered.top;
    let x = (offset_x / rendered.width) * natural.width;
    let y = (offset_y / rendered.height) * natural.height;

    Ok(NaturalPoint::new(
        x.clamp(0.0, natural.width),
        y.clamp(0.0, natural.height),
    ))
}

/// Projects a natural-space point onto the current rendered box.
///
/// The returned point is relative to the box origin; callers re-run this
/// on every resize of the tracked element, it is a pure recompute.
pub fn to_screen(
    point: NaturalPoint,
    rendered: &RenderedBox,
    natural: NaturalSize,
) -> MapResult<ScreenPoint> {
    if !natural.is_ready() {
        return Err(MapError::ImageNotReady);
    }
    if !rendered.is_laid_out() {
        return Err(MapError::BoxNotLaidOut);
    }

    Ok(ScreenPoint {
        x: (point.x / natural.width) * rendered.width,
        y: (point.y / natural.height) * rendered.height,
    })
}
