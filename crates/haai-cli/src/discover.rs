//! Dataset root discovery
//!
//! Looks for the directory holding `taxonomy.json`, in order:
//! 1. two levels above the executable
//! 2. the current directory
//! 3. each ancestor of the current directory
//!
//! and falls back to `.` when nothing matches.

use std::path::{Path, PathBuf};

const MARKER: &str = "taxonomy.json";

fn has_marker(dir: &Path) -> bool {
    dir.join(MARKER).is_file()
}

/// First ancestor of `start` (inclusive) that holds the marker file
pub(crate) fn find_in_ancestors(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| has_marker(dir))
        .map(Path::to_path_buf)
}

/// Resolve the dataset root when none was given on the command line
pub(crate) fn discover_root() -> PathBuf {
    if let Some(root) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("..").join("..")))
        .filter(|root| has_marker(root))
    {
        tracing::debug!(root = %root.display(), "dataset root next to executable");
        return root;
    }

    if let Some(root) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_in_ancestors(&cwd))
    {
        tracing::debug!(root = %root.display(), "dataset root from working directory");
        return root;
    }

    tracing::debug!("no {MARKER} found, using current directory");
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_nearest_ancestor_with_marker() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("a").join(MARKER), "{}").unwrap();

        assert_eq!(find_in_ancestors(&nested), Some(dir.path().join("a")));
    }

    #[test]
    fn marker_in_start_dir_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MARKER), "{}").unwrap();
        assert_eq!(find_in_ancestors(dir.path()), Some(dir.path().to_path_buf()));
    }
}
