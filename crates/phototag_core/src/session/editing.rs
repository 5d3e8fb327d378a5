//! Tag editing session state machine.
//!
//! # Responsibility
//! - Walk one image through `Idle -> PointPicked -> TargetSelected ->
//!   commit` with explicit transitions.
//! - Keep pending state in memory only; nothing persists before commit.
//!
//! # Invariants
//! - Only the latest picked point matters; picking replaces, never queues.
//! - Commit from a non-`TargetSelected` state fails without mutating the
//!   store.
//! - Deleting a tag bypasses the machine entirely and leaves pending
//!   state alone.

use crate::geometry::mapper::NaturalSize;
use crate::host::capability::{DocumentHit, DocumentIndex};
use crate::model::tag::{NaturalPoint, Tag, TagId, TagValidationError};
use crate::search::filter::filter_candidates;
use crate::store::backend::StorageBackend;
use crate::store::tag_store::TagStore;
use crate::store::{StoreError, StoreResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Result type for session transitions.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session transition and commit errors.
#[derive(Debug)]
pub enum SessionError {
    /// The transition needs a picked point and none is pending.
    NoPendingPoint,
    /// Commit or clear attempted before a target was selected.
    NoTargetSelected,
    /// A target is already selected; clear it before picking a new point.
    SelectionInProgress,
    Validation(TagValidationError),
    Store(StoreError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPendingPoint => write!(f, "no point has been picked in this session"),
            Self::NoTargetSelected => write!(f, "no target document has been selected"),
            Self::SelectionInProgress => {
                write!(f, "a target is already selected; clear it first")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TagValidationError> for SessionError {
    fn from(value: TagValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Current position in the editing flow.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    PointPicked {
        point: NaturalPoint,
        image: NaturalSize,
    },
    TargetSelected {
        point: NaturalPoint,
        image: NaturalSize,
        target: DocumentHit,
    },
}

/// Per-image editing session.
pub struct TagSession {
    image_id: String,
    state: SessionState,
    index: Arc<dyn DocumentIndex>,
}

impl TagSession {
    pub fn new(image_id: impl Into<String>, index: Arc<dyn DocumentIndex>) -> Self {
        Self {
            image_id: image_id.into(),
            state: SessionState::Idle,
            index,
        }
    }

    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns the pending natural-space point, if one is picked.
    pub fn pending_point(&self) -> Option<NaturalPoint> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::PointPicked { point, .. }
            | SessionState::TargetSelected { point, .. } => Some(*point),
        }
    }

    /// Holds a clicked point as the pending tag position.
    ///
    /// Replaces any prior pending point; the image's natural size travels
    /// with the point so commit can record creation-time dimensions.
    pub fn pick_point(&mut self, point: NaturalPoint, image: NaturalSize) -> SessionResult<()> {
        match self.state {
            SessionState::Idle | SessionState::PointPicked { .. } => {
                self.state = SessionState::PointPicked { point, image };
                Ok(())
            }
            SessionState::TargetSelected { .. } => Err(SessionError::SelectionInProgress),
        }
    }

    /// Searches the host index for candidate target documents.
    ///
    /// Blank queries yield nothing; matches keep the index's ordering and
    /// are capped by the search filter.
    pub fn search(&self, query: &str) -> Vec<DocumentHit> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        filter_candidates(self.index.search(query), query)
    }

    /// Selects the target document for the pending point.
    ///
    /// An unresolvable path is logged but still accepted here; commit-time
    /// validation is the gate that matters.
    pub fn select_target(&mut self, target: DocumentHit) -> SessionResult<()> {
        match self.state {
            SessionState::PointPicked { point, image } => {
                if !self.index.resolve(&target.path) {
                    warn!(
                        "event=target_select module=session status=warn image={} target={} reason=unresolved",
                        self.image_id, target.path
                    );
                }
                self.state = SessionState::TargetSelected {
                    point,
                    image,
                    target,
                };
                Ok(())
            }
            SessionState::Idle => Err(SessionError::NoPendingPoint),
            SessionState::TargetSelected { .. } => Err(SessionError::SelectionInProgress),
        }
    }

    /// Drops the selected target, keeping the pending point.
    pub fn clear_target(&mut self) -> SessionResult<()> {
        match self.state {
            SessionState::TargetSelected { point, image, .. } => {
                self.state = SessionState::PointPicked { point, image };
                Ok(())
            }
            SessionState::PointPicked { .. } => Err(SessionError::NoTargetSelected),
            SessionState::Idle => Err(SessionError::NoPendingPoint),
        }
    }

    /// Abandons all pending state with no persisted effect.
    pub fn cancel(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Builds a tag from the pending point and target, appends it to the
    /// store, and resets the session.
    ///
    /// On validation failure the session state is unchanged and the store
    /// untouched, so the caller can correct input and retry from the same
    /// `TargetSelected` state. A store failure resets the session anyway:
    /// the tag is already in the in-memory map at that point, so keeping
    /// the pending state would let a retry append a duplicate.
    pub fn commit<B: StorageBackend>(&mut self, store: &mut TagStore<B>) -> SessionResult<Tag> {
        let (point, image, target) = match &self.state {
            SessionState::TargetSelected {
                point,
                image,
                target,
            } => (*point, *image, target.clone()),
            SessionState::PointPicked { .. } => return Err(SessionError::NoTargetSelected),
            SessionState::Idle => return Err(SessionError::NoPendingPoint),
        };

        let tag = Tag::new(
            point,
            target.path,
            target.display_name,
            image.width,
            image.height,
        )?;

        let appended = store.add_tag(&self.image_id, tag.clone());
        self.state = SessionState::Idle;
        appended?;
        info!(
            "event=tag_commit module=session status=ok image={} tag={}",
            self.image_id, tag.id
        );
        Ok(tag)
    }

    /// Removes a tag directly via the store.
    ///
    /// Stateless with respect to the session machine; pending state is
    /// unaffected regardless of outcome.
    pub fn delete_tag<B: StorageBackend>(
        &self,
        store: &mut TagStore<B>,
        tag_id: TagId,
    ) -> StoreResult<bool> {
        store.remove_tag(&self.image_id, tag_id)
    }
}
