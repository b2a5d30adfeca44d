//! Error types for poolbuf.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BufferError>;

/// Errors raised by buffer, sequence and pool operations.
///
/// All checks run before any mutation or pool interaction, so a failed call
/// leaves the structure exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A size, index or growth argument violated its constraint.
    #[error("invalid argument {name}: {message}")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// Invalid pool configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl BufferError {
    /// Builds an [`BufferError::InvalidArgument`].
    pub fn invalid_arg(name: &'static str, message: impl Into<String>) -> Self {
        BufferError::InvalidArgument {
            name,
            message: message.into(),
        }
    }

    /// Returns true for [`BufferError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, BufferError::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = BufferError::invalid_arg("element_index", "7 is out of range 0..6");
        assert_eq!(
            err.to_string(),
            "invalid argument element_index: 7 is out of range 0..6"
        );
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_config_display() {
        let err = BufferError::InvalidConfig {
            message: "block lengths must be non-zero",
        };
        assert!(err.to_string().contains("invalid config"));
        assert!(!err.is_invalid_argument());
    }
}
