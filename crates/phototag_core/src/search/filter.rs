//! Case-insensitive substring filtering over index candidates.
//!
//! # Responsibility
//! - Apply the session's search semantics to host index output.
//!
//! # Invariants
//! - Blank queries yield an empty result, never the full index.
//! - No ranking beyond the index's own ordering; first matches win the cap.

use crate::host::capability::DocumentHit;

/// Maximum number of candidates surfaced to the editing UI.
pub const SEARCH_RESULT_LIMIT: usize = 10;

/// Filters candidates by case-insensitive substring match on `path`.
///
/// Returns an empty list for blank queries. Input ordering is preserved
/// among matches and the result is capped at [`SEARCH_RESULT_LIMIT`].
pub fn filter_candidates(candidates: Vec<DocumentHit>, query: &str) -> Vec<DocumentHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    candidates
        .into_iter()
        .filter(|hit| hit.path.to_lowercase().contains(&needle))
        .take(SEARCH_RESULT_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_candidates, SEARCH_RESULT_LIMIT};
    use crate::host::capability::DocumentHit;

    fn hits(paths: &[&str]) -> Vec<DocumentHit> {
        paths
            .iter()
            .map(|path| DocumentHit::new(*path, *path))
            .collect()
    }

    #[test]
    fn blank_query_yields_nothing() {
        assert!(filter_candidates(hits(&["people/alice.md"]), "").is_empty());
        assert!(filter_candidates(hits(&["people/alice.md"]), "   ").is_empty());
    }

    #[test]
    fn matches_case_insensitively_on_path() {
        let result = filter_candidates(
            hits(&["People/Alice.md", "people/bob.md", "notes/todo.md"]),
            "ALICE",
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].path, "People/Alice.md");
    }

    #[test]
    fn preserves_index_ordering_among_matches() {
        let result = filter_candidates(
            hits(&["people/carol.md", "people/alice.md", "people/bob.md"]),
            "people",
        );
        let paths: Vec<&str> = result.iter().map(|hit| hit.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["people/carol.md", "people/alice.md", "people/bob.md"]
        );
    }

    #[test]
    fn caps_results_at_the_limit() {
        let many: Vec<String> = (0..25).map(|i| format!("people/p{i}.md")).collect();
        let candidates: Vec<DocumentHit> = many
            .iter()
            .map(|path| DocumentHit::new(path.clone(), path.clone()))
            .collect();

        let result = filter_candidates(candidates, "people");
        assert_eq!(result.len(), SEARCH_RESULT_LIMIT);
        assert_eq!(result[0].path, "people/p0.md");
    }
}
