//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `phototag_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use phototag_core::{MemoryBackend, NaturalPoint, Tag, TagStore};

fn main() {
    println!("phototag_core version={}", phototag_core::core_version());

    // In-memory round trip to validate core wiring without touching disk.
    let mut store = match TagStore::load(MemoryBackend::new()) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("store load failed: {err}");
            std::process::exit(1);
        }
    };

    let tag = match Tag::new(
        NaturalPoint::new(100.0, 50.0),
        "people/alice.md",
        "Alice",
        800.0,
        600.0,
    ) {
        Ok(tag) => tag,
        Err(err) => {
            eprintln!("tag construction failed: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = store.add_tag("photo.png", tag) {
        eprintln!("tag append failed: {err}");
        std::process::exit(1);
    }

    println!(
        "smoke ok: photo.png tags={} inverse={}",
        store.tags_for("photo.png").len(),
        store.images_tagging_target("people/alice.md").len()
    );
}
