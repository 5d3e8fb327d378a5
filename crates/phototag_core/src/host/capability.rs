//! Capability traits supplied by the embedding host.

use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE_EXTENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(jpe?g|png|gif|webp)$").expect("valid image extension regex"));

/// One candidate document returned by the host's index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHit {
    /// Stable path identifying the document.
    pub path: String,
    /// Short human-readable name for list rendering.
    pub display_name: String,
}

impl DocumentHit {
    pub fn new(path: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display_name: display_name.into(),
        }
    }
}

/// Document lookup capability supplied by the host.
///
/// The core filters and caps the returned candidates itself; the host only
/// needs to supply matches in its native ordering.
pub trait DocumentIndex {
    /// Returns candidate documents for a query, in the index's own order.
    fn search(&self, query: &str) -> Vec<DocumentHit>;

    /// Returns whether a document path currently resolves.
    ///
    /// Checked at tag-creation time only; references broken later are
    /// tolerated and fail to resolve at render time instead.
    fn resolve(&self, path: &str) -> bool;
}

/// Image resource resolution capability supplied by the host.
pub trait ResourceResolver {
    /// Resolves an image path into an opaque display URI, or `None` when
    /// the image is gone.
    fn resolve_display_source(&self, image_path: &str) -> Option<String>;
}

/// Returns whether a path names a taggable image file.
pub fn is_image_path(path: &str) -> bool {
    IMAGE_EXTENSION_RE.is_match(path)
}
