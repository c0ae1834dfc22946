//! Error types for guide sessions.

use guide_types::SessionState;
use thiserror::Error;

/// Errors raised by session activation and user commands.
///
/// Configuration errors abort activation; no partially configured session
/// exists. Rejected commands leave the session unchanged.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the offending value.
        reason: String,
    },

    /// Configuration JSON could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// No reference object was configured for detection.
    #[error("missing reference object name")]
    MissingReferenceObject,

    /// The loaded model asset is not the one the fragment group expects.
    #[error("model asset {asset:?} does not match fragment group model {expected:?}")]
    ModelMismatch {
        /// Name of the supplied asset.
        asset: String,
        /// Model name required by the group.
        expected: String,
    },

    /// Model bounds are empty or not finite.
    #[error("model bounds for {model:?} are degenerate")]
    InvalidModelBounds {
        /// Name of the model.
        model: String,
    },

    /// A user command is not permitted in the current state.
    #[error("cannot {action} while session is {state}")]
    CommandRejected {
        /// The rejected action.
        action: &'static str,
        /// State at the time of the request.
        state: SessionState,
    },

    /// Lock was requested before any model was placed.
    #[error("no tracked model to lock")]
    NoTrackedModel,
}

impl SessionError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Creates a rejected command error.
    #[must_use]
    pub const fn rejected(action: &'static str, state: SessionState) -> Self {
        Self::CommandRejected { action, state }
    }

    /// True for configuration errors raised during activation.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. }
                | Self::ConfigParse(_)
                | Self::MissingReferenceObject
                | Self::ModelMismatch { .. }
                | Self::InvalidModelBounds { .. }
        )
    }
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_config() {
        let err = SessionError::invalid_config("vertical_sensitivity must be positive");
        assert!(err.to_string().contains("invalid configuration"));
        assert!(err.is_configuration());
    }

    #[test]
    fn error_rejected() {
        let err = SessionError::rejected("lock", SessionState::Searching);
        assert_eq!(err.to_string(), "cannot lock while session is searching");
        assert!(!err.is_configuration());
    }

    #[test]
    fn error_model_mismatch() {
        let err = SessionError::ModelMismatch {
            asset: "a".to_owned(),
            expected: "b".to_owned(),
        };
        assert!(err.to_string().contains("does not match"));
        assert!(err.is_configuration());
    }
}
