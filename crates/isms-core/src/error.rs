//! # Error Types
//!
//! One error enum for the whole engine. Every operation either fully
//! succeeds or returns one of these variants; nothing is reported partially.

use thiserror::Error;

/// Result alias used by every library crate in the workspace.
pub type IsmsResult<T> = Result<T, IsmsError>;

/// Top-level error type for the requirement engine.
#[derive(Error, Debug)]
pub enum IsmsError {
    /// A lookup named an item code that is not in the catalog.
    #[error("requirement not found: {item_code}")]
    NotFound {
        /// The code the caller asked for, verbatim.
        item_code: String,
    },

    /// A status map referenced codes that are not in the catalog.
    #[error("unknown requirement(s) in status map: {}", .item_codes.join(", "))]
    UnknownRequirement {
        /// Every offending code, ascending.
        item_codes: Vec<String>,
    },

    /// Caller input was rejected before any work was done.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requirement source failed a startup invariant.
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl IsmsError {
    /// Shorthand for [`IsmsError::NotFound`].
    pub fn not_found(item_code: impl Into<String>) -> Self {
        Self::NotFound {
            item_code: item_code.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_requirement_lists_every_code() {
        let err = IsmsError::UnknownRequirement {
            item_codes: vec!["1.1.9".into(), "4.1.1".into()],
        };
        assert_eq!(
            err.to_string(),
            "unknown requirement(s) in status map: 1.1.9, 4.1.1"
        );
    }

    #[test]
    fn not_found_keeps_raw_code() {
        let err = IsmsError::not_found(" 1.1.1 ");
        assert!(matches!(err, IsmsError::NotFound { ref item_code } if item_code == " 1.1.1 "));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: IsmsError = io.into();
        assert!(err.to_string().starts_with("io error"));
    }
}
