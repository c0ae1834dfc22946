//! Error types for catalog loading.

use thiserror::Error;

/// Errors raised while loading or checking fragment catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog JSON could not be parsed.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Principal axis name is not one of `x`, `y`, `z`.
    #[error("invalid principal axis: {0:?} (expected \"x\", \"y\" or \"z\")")]
    InvalidAxis(String),

    /// Catalog contains no groups.
    #[error("catalog is empty")]
    EmptyCatalog,

    /// Group has no model identifier.
    #[error("fragment group {group:?} has no model identifier")]
    MissingModel {
        /// Name of the offending group.
        group: String,
    },

    /// Fragment length does not match its slice offsets.
    #[error(
        "fragment {index} of {group:?}: length {length} does not match slice span {span}"
    )]
    LengthMismatch {
        /// Name of the offending group.
        group: String,
        /// Index of the fragment within the group.
        index: usize,
        /// Stored length.
        length: f64,
        /// `end - start` slice offset.
        span: f64,
    },
}

impl CatalogError {
    /// Creates an invalid axis error.
    #[must_use]
    pub fn invalid_axis(name: impl Into<String>) -> Self {
        Self::InvalidAxis(name.into())
    }

    /// Creates a missing model error.
    #[must_use]
    pub fn missing_model(group: impl Into<String>) -> Self {
        Self::MissingModel {
            group: group.into(),
        }
    }

    /// Creates a length mismatch error.
    #[must_use]
    pub fn length_mismatch(group: impl Into<String>, index: usize, length: f64, span: f64) -> Self {
        Self::LengthMismatch {
            group: group.into(),
            index,
            length,
            span,
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_axis() {
        let err = CatalogError::invalid_axis("w");
        assert!(err.to_string().contains("invalid principal axis"));
        assert!(err.to_string().contains("\"w\""));
    }

    #[test]
    fn error_missing_model() {
        let err = CatalogError::missing_model("Real Fibula Scan");
        assert!(err.to_string().contains("no model identifier"));
    }

    #[test]
    fn error_length_mismatch() {
        let err = CatalogError::length_mismatch("g", 2, 0.05, 0.06);
        let msg = err.to_string();
        assert!(msg.contains("fragment 2"));
        assert!(msg.contains("0.05"));
        assert!(msg.contains("0.06"));
    }

    #[test]
    fn error_from_json() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: CatalogError = json_err.into();
        assert!(err.to_string().contains("catalog parse error"));
    }
}
