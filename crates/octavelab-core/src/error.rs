//! Error types for the octavelab core.

use std::fmt;

use crate::types::{ParamAddress, MAX_PARAMETERS};

/// Setup-time configuration errors.
///
/// These indicate a broken parameter declaration and are surfaced to the
/// developer during plugin initialization. They are never expected at
/// runtime: out-of-range values are clamped, not rejected, and notification
/// delivery to a dead observer is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Two parameters declared the same address.
    DuplicateAddress(ParamAddress),
    /// Two parameters within one group declared the same identifier.
    DuplicateIdentifier(&'static str),
    /// An operation referenced an address no parameter was defined for.
    UnknownAddress(ParamAddress),
    /// The tree declares more parameters than the bridge can hold.
    TooManyParameters { declared: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateAddress(address) => {
                write!(f, "duplicate parameter address: {}", address)
            }
            Self::DuplicateIdentifier(identifier) => {
                write!(f, "duplicate parameter identifier: {:?}", identifier)
            }
            Self::UnknownAddress(address) => {
                write!(f, "unknown parameter address: {}", address)
            }
            Self::TooManyParameters { declared } => {
                write!(
                    f,
                    "tree declares {} parameters, maximum is {}",
                    declared, MAX_PARAMETERS
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type for setup-time operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ConfigError::DuplicateAddress(1).to_string(),
            "duplicate parameter address: 1"
        );
        assert_eq!(
            ConfigError::DuplicateIdentifier("octaveShift").to_string(),
            "duplicate parameter identifier: \"octaveShift\""
        );
        assert!(ConfigError::TooManyParameters { declared: 65 }
            .to_string()
            .contains("maximum is 64"));
    }
}
