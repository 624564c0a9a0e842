//! Error types for the catalog
//!
//! Only the primary artifact of the selected generation (and the reference
//! metadata files requested directly by a caller) ever surfaces one of these.
//! Optional artifacts swallow their failures at the loader boundary.

use std::path::PathBuf;

/// Errors raised while reading or decoding a dataset artifact
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// IO error during artifact read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact bytes did not decode into the requested shape
    #[error("decode error in {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// No decoder registered for the artifact's extension
    #[error("no decoder registered for {0}")]
    UnsupportedFormat(PathBuf),
}

impl CatalogError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create decode error for path
    pub fn decode_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the failure means the artifact simply is not there
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display() {
        let err = CatalogError::decode_error("activities.json", "expected value at line 1");
        assert_eq!(
            err.to_string(),
            "decode error in activities.json: expected value at line 1"
        );
    }

    #[test]
    fn not_found_detection() {
        let missing = CatalogError::io_error(
            "taxonomy.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let denied = CatalogError::io_error(
            "taxonomy.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );

        assert!(missing.is_not_found());
        assert!(!denied.is_not_found());
        assert!(!CatalogError::UnsupportedFormat("a.toml".into()).is_not_found());
    }
}
