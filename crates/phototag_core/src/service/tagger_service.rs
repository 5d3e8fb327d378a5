//! Tagging use-case facade for the embedding host.
//!
//! # Responsibility
//! - Wire the loaded store and host capabilities behind one entry point.
//! - Answer the two embedding queries: gallery of photos for a document,
//!   overlay markers for a photo at the current rendered size.
//!
//! # Invariants
//! - Capabilities arrive explicitly at construction; no global host
//!   access.
//! - Broken image references are skipped with a warning, never an error.

use crate::geometry::mapper::{to_screen, MapResult, NaturalSize, RenderedBox, ScreenPoint};
use crate::host::capability::{DocumentIndex, ResourceResolver};
use crate::model::tag::{Tag, TagId};
use crate::session::editing::TagSession;
use crate::store::backend::StorageBackend;
use crate::store::tag_store::{TagChangeListener, TagStore};
use crate::store::StoreResult;
use log::warn;
use std::collections::BTreeSet;
use std::sync::Arc;

/// One photo entry in a document's gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryPhoto {
    /// Image identifier as stored in the tag document.
    pub image_id: String,
    /// Opaque display URI resolved by the host.
    pub resource_uri: String,
    /// Natural width recorded at tag-creation time, when available.
    pub width: Option<f64>,
    /// Natural height recorded at tag-creation time, when available.
    pub height: Option<f64>,
}

/// One positioned tag marker for the interactive overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayMarker {
    pub tag_id: TagId,
    pub label: String,
    pub target_path: String,
    /// Position relative to the rendered box origin.
    pub screen: ScreenPoint,
}

/// Use-case facade owning the loaded store and host capabilities.
pub struct TaggerService<B: StorageBackend> {
    store: TagStore<B>,
    index: Arc<dyn DocumentIndex>,
    resolver: Arc<dyn ResourceResolver>,
}

impl<B: StorageBackend> TaggerService<B> {
    pub fn new(
        store: TagStore<B>,
        index: Arc<dyn DocumentIndex>,
        resolver: Arc<dyn ResourceResolver>,
    ) -> Self {
        Self {
            store,
            index,
            resolver,
        }
    }

    /// Opens an editing session for one image.
    pub fn open_session(&self, image_id: impl Into<String>) -> TagSession {
        TagSession::new(image_id, self.index.clone())
    }

    /// Returns the ordered tags of an image.
    pub fn tags_for(&self, image_id: &str) -> &[Tag] {
        self.store.tags_for(image_id)
    }

    /// Returns every image identifier tagging the target document.
    pub fn images_tagging_target(&self, target_path: &str) -> BTreeSet<String> {
        self.store.images_tagging_target(target_path)
    }

    /// Removes a tag from an image; idempotent.
    pub fn remove_tag(&mut self, image_id: &str, tag_id: TagId) -> StoreResult<bool> {
        self.store.remove_tag(image_id, tag_id)
    }

    /// Registers a change listener on the underlying store.
    pub fn subscribe(&mut self, listener: Arc<dyn TagChangeListener>) {
        self.store.subscribe(listener);
    }

    /// Builds the gallery of photos in which a document is tagged.
    ///
    /// Dimensions come from the first tag that recorded them, so the host
    /// can size gallery slots without re-probing images. Images whose URI
    /// no longer resolves are skipped.
    pub fn gallery_for(&self, document_path: &str) -> Vec<GalleryPhoto> {
        let mut photos = Vec::new();
        for image_id in self.store.images_tagging_target(document_path) {
            let Some(resource_uri) = self.resolver.resolve_display_source(&image_id) else {
                warn!(
                    "event=gallery_build module=service status=warn image={image_id} reason=unresolved"
                );
                continue;
            };

            let sized = self
                .store
                .tags_for(&image_id)
                .iter()
                .find(|tag| tag.image_width.is_some() && tag.image_height.is_some());

            photos.push(GalleryPhoto {
                image_id,
                resource_uri,
                width: sized.and_then(|tag| tag.image_width),
                height: sized.and_then(|tag| tag.image_height),
            });
        }
        photos
    }

    /// Projects every stored tag of an image onto the current rendered box.
    ///
    /// Pure recompute; the host calls this again on every resize of the
    /// tracked element.
    pub fn overlay_markers(
        &self,
        image_id: &str,
        rendered: &RenderedBox,
        natural: NaturalSize,
    ) -> MapResult<Vec<OverlayMarker>> {
        self.store
            .tags_for(image_id)
            .iter()
            .map(|tag| {
                to_screen(tag.natural_point(), rendered, natural).map(|screen| OverlayMarker {
                    tag_id: tag.id,
                    label: tag.target_label.clone(),
                    target_path: tag.target_path.clone(),
                    screen,
                })
            })
            .collect()
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &TagStore<B> {
        &self.store
    }

    /// Returns the underlying store for session commits.
    pub fn store_mut(&mut self) -> &mut TagStore<B> {
        &mut self.store
    }
}
