//! Assessment selection
//!
//! Assessment snapshots are named by date (`2024-06-01.json`), so the
//! lexicographically greatest name is taken to be the most recent one.
//! That ordering assumption is not checked against the `date` field.

use std::path::Path;

/// Pick the greatest name whose extension is in `extensions`
///
/// Returns `None` when no name qualifies.
#[must_use]
pub fn select_latest<'a>(names: &'a [String], extensions: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter(|name| {
            Path::new(name.as_str())
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.contains(&ext))
        })
        .max()
        .map(String::as_str)
}
