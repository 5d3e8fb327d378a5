//! Target-document candidate filtering.
//!
//! # Responsibility
//! - Narrow host-supplied document candidates for the editing session.
//! - Keep result shaping (gating, capping) inside the core.
//!
//! # Invariants
//! - A blank query never floods the caller with the whole index.
//! - Matching preserves the index's native ordering.

pub mod filter;
