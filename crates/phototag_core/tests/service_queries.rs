use phototag_core::{
    DocumentHit, DocumentIndex, MemoryBackend, NaturalPoint, NaturalSize, RenderedBox,
    ResourceResolver, Tag, TagStore, TaggerService,
};
use std::collections::BTreeMap;
use std::sync::Arc;

struct EmptyIndex;

impl DocumentIndex for EmptyIndex {
    fn search(&self, _query: &str) -> Vec<DocumentHit> {
        Vec::new()
    }

    fn resolve(&self, _path: &str) -> bool {
        false
    }
}

struct FakeResolver {
    uris: BTreeMap<String, String>,
}

impl ResourceResolver for FakeResolver {
    fn resolve_display_source(&self, image_path: &str) -> Option<String> {
        self.uris.get(image_path).cloned()
    }
}

fn service_with_tags() -> TaggerService<MemoryBackend> {
    let mut store = TagStore::load(MemoryBackend::new()).unwrap();
    let alice = Tag::new(
        NaturalPoint::new(100.0, 50.0),
        "people/Alice.md",
        "Alice",
        800.0,
        600.0,
    )
    .unwrap();
    let bob = Tag::new(
        NaturalPoint::new(400.0, 300.0),
        "people/Bob.md",
        "Bob",
        800.0,
        600.0,
    )
    .unwrap();
    store.add_tag("a.png", alice).unwrap();
    store.add_tag("a.png", bob).unwrap();

    let alice_again = Tag::new(
        NaturalPoint::new(5.0, 5.0),
        "people/Alice.md",
        "Alice",
        1024.0,
        768.0,
    )
    .unwrap();
    store.add_tag("missing.png", alice_again).unwrap();

    let resolver = FakeResolver {
        uris: [("a.png".to_string(), "app://resolved/a.png".to_string())]
            .into_iter()
            .collect(),
    };
    TaggerService::new(store, Arc::new(EmptyIndex), Arc::new(resolver))
}

#[test]
fn gallery_lists_resolved_photos_with_stored_dimensions() {
    let service = service_with_tags();

    let gallery = service.gallery_for("people/Alice.md");

    // missing.png tags Alice too but has no resolvable URI, so only a.png
    // makes it into the gallery.
    assert_eq!(gallery.len(), 1);
    assert_eq!(gallery[0].image_id, "a.png");
    assert_eq!(gallery[0].resource_uri, "app://resolved/a.png");
    assert_eq!(gallery[0].width, Some(800.0));
    assert_eq!(gallery[0].height, Some(600.0));
}

#[test]
fn gallery_for_untagged_document_is_empty() {
    let service = service_with_tags();
    assert!(service.gallery_for("people/Nobody.md").is_empty());
}

#[test]
fn overlay_markers_reproject_for_the_current_box() {
    let service = service_with_tags();
    let natural = NaturalSize::new(800.0, 600.0);

    // Half-size render: every coordinate halves.
    let markers = service
        .overlay_markers("a.png", &RenderedBox::new(0.0, 0.0, 400.0, 300.0), natural)
        .unwrap();
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].label, "Alice");
    assert_eq!(markers[0].screen.x, 50.0);
    assert_eq!(markers[0].screen.y, 25.0);
    assert_eq!(markers[1].screen.x, 200.0);
    assert_eq!(markers[1].screen.y, 150.0);

    // A resize is a fresh recompute against the new box.
    let resized = service
        .overlay_markers("a.png", &RenderedBox::new(0.0, 0.0, 1600.0, 1200.0), natural)
        .unwrap();
    assert_eq!(resized[0].screen.x, 200.0);
    assert_eq!(resized[0].screen.y, 100.0);
}

#[test]
fn overlay_markers_gate_on_unready_image() {
    let service = service_with_tags();
    let err = service
        .overlay_markers(
            "a.png",
            &RenderedBox::new(0.0, 0.0, 400.0, 300.0),
            NaturalSize::new(0.0, 0.0),
        )
        .unwrap_err();
    assert_eq!(err, phototag_core::MapError::ImageNotReady);
}

#[test]
fn service_passthrough_queries_match_the_store() {
    let mut service = service_with_tags();

    assert_eq!(service.tags_for("a.png").len(), 2);
    assert_eq!(service.images_tagging_target("people/Alice.md").len(), 2);

    let bob_id = service.tags_for("a.png")[1].id;
    assert!(service.remove_tag("a.png", bob_id).unwrap());
    assert!(service.images_tagging_target("people/Bob.md").is_empty());
}
