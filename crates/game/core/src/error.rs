//! Common error infrastructure for playground-core.
//!
//! Domain errors live next to the code that raises them (`GridError` in
//! [`crate::grid`], `StaminaError` in [`crate::state`], and so on). This module
//! holds what they share: a severity classification, the failure taxonomy
//! callers branch on, and the [`GameError`] trait tying them together.
//!
//! Every operation validates fully before mutating, so any error returned by
//! this crate means the playground is unchanged.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// The request was illegal this turn; the executor may apply a no-op or
    /// penalty and continue.
    ///
    /// Examples: destination occupied, stamina exhausted
    Recoverable,

    /// Invalid input that must be changed before retrying.
    ///
    /// Examples: map width below minimum, unknown agent id
    Validation,

    /// Arena bookkeeping disagrees with itself. Indicates a bug.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Failure class, independent of which module produced the error.
///
/// `Bounds` covers coordinates that do not exist on the grid; `Occupancy`
/// covers cells that exist but hold the wrong occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    Occupancy,
    Bounds,
    ResourceExhaustion,
    Turn,
    Snapshot,
}

/// Common trait for all playground-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the taxonomy class of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns a static string identifier for this error variant.
    ///
    /// Stable across releases; suitable for metrics and test assertions.
    fn error_code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_labels_are_stable() {
        assert_eq!(ErrorSeverity::Recoverable.as_str(), "recoverable");
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
    }

    #[test]
    fn kind_renders_snake_case() {
        assert_eq!(ErrorKind::ResourceExhaustion.to_string(), "resource_exhaustion");
        assert_eq!(ErrorKind::Bounds.as_ref(), "bounds");
    }
}
