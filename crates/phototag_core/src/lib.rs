//! Core domain logic for photo tagging.
//! This crate is the single source of truth for tag invariants: coordinate
//! mapping, tag validation, persistence and the editing state machine.

pub mod geometry;
pub mod host;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod session;
pub mod store;

pub use geometry::mapper::{
    to_natural, to_screen, MapError, MapResult, NaturalSize, RenderedBox, ScreenPoint,
};
pub use host::capability::{is_image_path, DocumentHit, DocumentIndex, ResourceResolver};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::tag::{NaturalPoint, Tag, TagId, TagValidationError, DUPLICATE_EPSILON};
pub use search::filter::{filter_candidates, SEARCH_RESULT_LIMIT};
pub use service::tagger_service::{GalleryPhoto, OverlayMarker, TaggerService};
pub use session::editing::{SessionError, SessionResult, SessionState, TagSession};
pub use store::backend::{FileBackend, MemoryBackend, StorageBackend};
pub use store::tag_store::{TagChangeListener, TagStore, TagsDocument};
pub use store::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
