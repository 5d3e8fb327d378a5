//! Tag domain model.
//!
//! # Responsibility
//! - Define the canonical tag record linking an image point to a document.
//! - Keep the persisted wire shape stable across readers.
//!
//! # Invariants
//! - Every tag is identified by a stable `TagId` that is never reused.
//! - Coordinates are stored in natural (unscaled) image pixel space.

pub mod tag;
