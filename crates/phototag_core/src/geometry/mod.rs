//! Coordinate mapping between screen space and natural image space.
//!
//! # Responsibility
//! - Translate pointer events on a displayed image into natural-space
//!   coordinates, and project stored coordinates back for overlays.
//!
//! # Invariants
//! - Each axis scales by its own `natural / rendered` ratio; no aspect
//!   ratio or fit policy is assumed.
//! - Mapping before the element has laid out or the image has decoded is
//!   gated by `MapError`, never computed.

pub mod mapper;
