//! In-memory tag map with whole-document persistence.
//!
//! # Responsibility
//! - Own the image-to-tags map for the process lifetime.
//! - Persist the full document after every effective mutation.
//! - Answer both inverse queries: tags of an image, images of a target.
//!
//! # Invariants
//! - A `TagStore` value only exists in the loaded state; there is no way
//!   to query or mutate before `load` completes.
//! - Tag order within an image is insertion order and is never renumbered.
//! - Keys with no remaining tags are pruned rather than kept empty.
//! - A parse failure at load falls back to an empty in-memory document
//!   without touching the on-disk bytes.

use crate::model::tag::{Tag, TagId, DUPLICATE_EPSILON};
use crate::store::backend::StorageBackend;
use crate::store::StoreResult;
use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// The persisted aggregate: image identifier to its ordered tags.
pub type TagsDocument = BTreeMap<String, Vec<Tag>>;

/// Change-notification contract for presentation layers.
///
/// Listeners receive the mutated image identifier after every effective
/// mutation and are expected to re-query the store.
pub trait TagChangeListener {
    fn tags_changed(&self, image_id: &str);
}

/// Loaded tag store bound to one storage backend.
pub struct TagStore<B: StorageBackend> {
    document: TagsDocument,
    backend: B,
    listeners: Vec<Arc<dyn TagChangeListener>>,
}

impl<B: StorageBackend> TagStore<B> {
    /// Loads the tag document from storage.
    ///
    /// An absent document initializes as empty and is persisted right
    /// away. A malformed document is logged and replaced by an empty
    /// in-memory map, leaving the stored bytes untouched so the user can
    /// recover them; the next successful mutation overwrites them.
    ///
    /// # Errors
    /// Returns `StoreError::Io` when the backend cannot be read, or when
    /// persisting the initial empty document fails.
    pub fn load(backend: B) -> StoreResult<Self> {
        let mut store = Self {
            document: TagsDocument::new(),
            backend,
            listeners: Vec::new(),
        };

        match store.backend.read()? {
            None => {
                store.persist()?;
                info!("event=tags_load module=store status=ok source=initialized images=0");
            }
            Some(bytes) => match serde_json::from_slice::<TagsDocument>(&bytes) {
                Ok(document) => {
                    info!(
                        "event=tags_load module=store status=ok images={}",
                        document.len()
                    );
                    store.document = document;
                }
                Err(err) => {
                    warn!(
                        "event=tags_load module=store status=fallback_empty error={err}"
                    );
                }
            },
        }

        Ok(store)
    }

    /// Returns the ordered tags of an image; empty when the image has none.
    pub fn tags_for(&self, image_id: &str) -> &[Tag] {
        self.document
            .get(image_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Appends a tag to an image's sequence and persists.
    ///
    /// Existing tags keep their order and identity. A near-duplicate of an
    /// existing tag is logged as a warning but still appended; re-tagging
    /// at a nearby point is legitimate.
    pub fn add_tag(&mut self, image_id: &str, tag: Tag) -> StoreResult<()> {
        if let Some(existing) = self
            .tags_for(image_id)
            .iter()
            .find(|existing| existing.is_near_duplicate_of(&tag, DUPLICATE_EPSILON))
        {
            warn!(
                "event=tag_duplicate module=store status=warn image={image_id} target={} existing_tag={}",
                tag.target_path, existing.id
            );
        }

        let tag_id = tag.id;
        self.document
            .entry(image_id.to_string())
            .or_default()
            .push(tag);

        info!("event=tag_add module=store status=ok image={image_id} tag={tag_id}");
        self.notify(image_id);
        self.persist()
    }

    /// Removes a tag by identity and persists.
    ///
    /// Returns `false` without persisting when no such tag exists, so
    /// repeated removal is an idempotent no-op.
    pub fn remove_tag(&mut self, image_id: &str, tag_id: TagId) -> StoreResult<bool> {
        let Some(tags) = self.document.get_mut(image_id) else {
            return Ok(false);
        };
        let Some(position) = tags.iter().position(|tag| tag.id == tag_id) else {
            return Ok(false);
        };

        tags.remove(position);
        if tags.is_empty() {
            self.document.remove(image_id);
        }

        info!("event=tag_remove module=store status=ok image={image_id} tag={tag_id}");
        self.notify(image_id);
        self.persist()?;
        Ok(true)
    }

    /// Returns every image identifier carrying at least one tag for the
    /// target document.
    ///
    /// A linear scan over the document; at the expected scale (tens to low
    /// thousands of tagged images) a secondary index is not worth keeping
    /// in sync.
    pub fn images_tagging_target(&self, target_path: &str) -> BTreeSet<String> {
        self.document
            .iter()
            .filter(|(_, tags)| tags.iter().any(|tag| tag.target_path == target_path))
            .map(|(image_id, _)| image_id.clone())
            .collect()
    }

    /// Serializes the full document and replaces the stored content.
    ///
    /// The in-memory state is already updated when this runs; a failure is
    /// logged and surfaced but never rolls the memory state back.
    pub fn persist(&mut self) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(&self.document)?;
        if let Err(err) = self.backend.write(&bytes) {
            warn!("event=tags_persist module=store status=error error={err}");
            return Err(err.into());
        }
        Ok(())
    }

    /// Registers a change listener notified with each mutated image id.
    pub fn subscribe(&mut self, listener: Arc<dyn TagChangeListener>) {
        self.listeners.push(listener);
    }

    /// Returns the storage backend, mainly for inspection in tests.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn notify(&self, image_id: &str) {
        for listener in &self.listeners {
            listener.tags_changed(image_id);
        }
    }
}
