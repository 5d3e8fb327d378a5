//! Tag entity and creation-time validation.
//!
//! # Responsibility
//! - Define the immutable-once-created tag record and its wire shape.
//! - Validate construction input before a tag is ever persisted.
//!
//! # Invariants
//! - `id` is assigned at creation and never reused for another tag.
//! - `x`/`y` are natural-space pixel coordinates, clamped to image bounds
//!   by the coordinate mapper before construction.
//! - `target_path` is non-empty; existence of the target is checked at
//!   creation time only and never re-validated later.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a tag record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TagId = Uuid;

/// Coordinate deltas at or under this value count as "the same point" for
/// best-effort duplicate warnings. Measured in natural pixels.
pub const DUPLICATE_EPSILON: f64 = 1.0;

/// A point in an image's natural (original, unscaled) pixel space.
///
/// Not a wire type: the persisted document flattens coordinates into the
/// tag record's own `x`/`y` fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NaturalPoint {
    pub x: f64,
    pub y: f64,
}

impl NaturalPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A tag linking one point on an image to a target document.
///
/// Once constructed a tag is treated as immutable; edits are modeled as
/// remove-then-add at the store level.
///
/// The wire shape is camelCase to match the persisted document format.
/// Readers tolerate unknown fields for forward compatibility, and accept
/// the legacy `person` field name for `target_label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Stable identity, used for removal and overlay bookkeeping.
    pub id: TagId,
    /// Natural-space x coordinate on the tagged image.
    pub x: f64,
    /// Natural-space y coordinate on the tagged image.
    pub y: f64,
    /// Stable path of the referenced document. Broken references are
    /// tolerated and simply fail to resolve at render time.
    pub target_path: String,
    /// Denormalized display name, cached so rendering never needs to
    /// resolve the target document.
    #[serde(alias = "person")]
    pub target_label: String,
    /// Natural width of the tagged image at tag-creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<f64>,
    /// Natural height of the tagged image at tag-creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_height: Option<f64>,
}

impl Tag {
    /// Creates a validated tag with a fresh stable id.
    ///
    /// # Errors
    /// - `EmptyTargetPath` when `target_path` is blank.
    /// - `NonPositiveDimensions` when either natural dimension is not a
    ///   positive finite number (the image has not been decoded yet).
    pub fn new(
        point: NaturalPoint,
        target_path: impl Into<String>,
        target_label: impl Into<String>,
        natural_width: f64,
        natural_height: f64,
    ) -> Result<Self, TagValidationError> {
        let target_path = target_path.into();
        if target_path.trim().is_empty() {
            return Err(TagValidationError::EmptyTargetPath);
        }
        if !(natural_width > 0.0 && natural_width.is_finite())
            || !(natural_height > 0.0 && natural_height.is_finite())
        {
            return Err(TagValidationError::NonPositiveDimensions {
                width: natural_width,
                height: natural_height,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            x: point.x,
            y: point.y,
            target_path,
            target_label: target_label.into(),
            image_width: Some(natural_width),
            image_height: Some(natural_height),
        })
    }

    /// Returns the natural-space coordinates of this tag.
    pub fn natural_point(&self) -> NaturalPoint {
        NaturalPoint::new(self.x, self.y)
    }

    /// Returns whether `other` references the same target at (nearly) the
    /// same point.
    ///
    /// Used only for best-effort duplicate warnings; legitimate re-tagging
    /// at a nearby point is valid and never rejected.
    pub fn is_near_duplicate_of(&self, other: &Tag, epsilon: f64) -> bool {
        self.target_path == other.target_path
            && (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
    }
}

/// Tag construction validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValidationError {
    EmptyTargetPath,
    NonPositiveDimensions { width: f64, height: f64 },
}

impl Display for TagValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTargetPath => write!(f, "tag target path must not be empty"),
            Self::NonPositiveDimensions { width, height } => write!(
                f,
                "tag image dimensions must be positive, got {width}x{height}"
            ),
        }
    }
}

impl Error for TagValidationError {}

#[cfg(test)]
mod tests {
    use super::{NaturalPoint, Tag, TagValidationError, DUPLICATE_EPSILON};

    #[test]
    fn new_assigns_fresh_ids() {
        let a = Tag::new(NaturalPoint::new(1.0, 2.0), "people/a.md", "A", 800.0, 600.0)
            .expect("valid tag");
        let b = Tag::new(NaturalPoint::new(1.0, 2.0), "people/a.md", "A", 800.0, 600.0)
            .expect("valid tag");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn rejects_blank_target_path() {
        let err = Tag::new(NaturalPoint::new(1.0, 2.0), "   ", "A", 800.0, 600.0)
            .expect_err("blank path must fail");
        assert_eq!(err, TagValidationError::EmptyTargetPath);
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        for (w, h) in [(0.0, 600.0), (800.0, -1.0), (f64::NAN, 600.0)] {
            let err = Tag::new(NaturalPoint::new(1.0, 2.0), "people/a.md", "A", w, h)
                .expect_err("bad dimensions must fail");
            assert!(matches!(
                err,
                TagValidationError::NonPositiveDimensions { .. }
            ));
        }
    }

    #[test]
    fn near_duplicate_requires_same_target_and_nearby_point() {
        let a = Tag::new(NaturalPoint::new(100.0, 50.0), "people/a.md", "A", 800.0, 600.0)
            .expect("valid tag");
        let close = Tag::new(NaturalPoint::new(100.5, 50.5), "people/a.md", "A", 800.0, 600.0)
            .expect("valid tag");
        let far = Tag::new(NaturalPoint::new(130.0, 50.0), "people/a.md", "A", 800.0, 600.0)
            .expect("valid tag");
        let other = Tag::new(NaturalPoint::new(100.0, 50.0), "people/b.md", "B", 800.0, 600.0)
            .expect("valid tag");

        assert!(a.is_near_duplicate_of(&close, DUPLICATE_EPSILON));
        assert!(!a.is_near_duplicate_of(&far, DUPLICATE_EPSILON));
        assert!(!a.is_near_duplicate_of(&other, DUPLICATE_EPSILON));
    }
}
