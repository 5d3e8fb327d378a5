//! Tag persistence layer.
//!
//! # Responsibility
//! - Define the durable-storage seam and the flat JSON document codec.
//! - Hold the in-memory tag map and keep it round-tripping to storage.
//!
//! # Invariants
//! - The persisted document is always a valid JSON object of tag arrays.
//! - Load failures are non-destructive: a corrupt file is never
//!   overwritten until a later successful mutation persists.
//! - Mutations are visible to in-memory reads before their persist
//!   completes.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod backend;
pub mod tag_store;

/// Result type for store APIs.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error for document IO and encoding.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Codec(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "tag storage io failure: {err}"),
            Self::Codec(err) => write!(f, "tag document encoding failure: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Codec(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}
