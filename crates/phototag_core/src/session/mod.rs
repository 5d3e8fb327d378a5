//! Interactive tag editing session.
//!
//! # Responsibility
//! - Coordinate pick-point, target search, confirm and append for one
//!   image, independent of any rendering technology.
//!
//! # Invariants
//! - Only `commit` has a durable effect; abandoning a session leaves the
//!   store untouched.
//! - A failed commit never leaves the session in a half-transitioned state.

pub mod editing;
