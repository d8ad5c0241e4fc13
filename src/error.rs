//! Error types.

use std::collections::TryReserveError;
use std::fmt;

/// Status of a failed session operation.
///
/// Failures never roll back: the session stays in whatever state processing
/// reached before the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The scheme name is in neither scheme table, or an operation needed an
    /// active input scheme and none was active.
    SchemeUnknown(String),
    /// The expression resolved under no path.
    ColorUnknown(String),
    /// A value exists but has no symbolic name under the selected output.
    ///
    /// This is a property of the value, not a failed resolution.
    ColorNoName,
    /// The canonicalization buffer could not grow.
    AllocationFailure,
}

impl ResolveError {
    /// Returns true for the `ColorNoName` status.
    #[must_use]
    pub const fn is_no_name(&self) -> bool {
        matches!(self, Self::ColorNoName)
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemeUnknown(s) if s.is_empty() => write!(f, "No input scheme active"),
            Self::SchemeUnknown(s) => write!(f, "Unknown scheme: {s}"),
            Self::ColorUnknown(s) => write!(f, "Unknown color: {s}"),
            Self::ColorNoName => write!(f, "Color has no name in the output scheme"),
            Self::AllocationFailure => write!(f, "Failed to allocate canonicalization buffer"),
        }
    }
}

impl std::error::Error for ResolveError {}

impl From<TryReserveError> for ResolveError {
    fn from(_: TryReserveError) -> Self {
        Self::AllocationFailure
    }
}

/// Error type for dataset assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// More named schemes than a [`SchemeSet`](crate::scheme::SchemeSet) can hold.
    TooManySchemes(usize),
    /// A scheme name was declared twice.
    DuplicateScheme(String),
    /// A color referenced a named scheme that was never declared.
    UndeclaredScheme(String),
    /// A named scheme's default name is not a member of that scheme.
    MissingDefault { scheme: String, name: String },
    /// An indexed scheme was declared with no slots.
    EmptyIndexedScheme(String),
    /// The string pool outgrew its offset type.
    PoolOverflow,
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManySchemes(n) => write!(f, "Too many named schemes: {n}"),
            Self::DuplicateScheme(s) => write!(f, "Duplicate scheme: {s}"),
            Self::UndeclaredScheme(s) => write!(f, "Undeclared scheme: {s}"),
            Self::MissingDefault { scheme, name } => {
                write!(f, "Default color {name} is not in scheme {scheme}")
            }
            Self::EmptyIndexedScheme(s) => write!(f, "Indexed scheme has no colors: {s}"),
            Self::PoolOverflow => write!(f, "String pool overflow"),
        }
    }
}

impl std::error::Error for DatasetError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ResolveError::SchemeUnknown("foo".to_string()).to_string(),
            "Unknown scheme: foo"
        );
        assert_eq!(
            ResolveError::SchemeUnknown(String::new()).to_string(),
            "No input scheme active"
        );
        assert_eq!(
            ResolveError::ColorUnknown("bluee".to_string()).to_string(),
            "Unknown color: bluee"
        );
        assert!(ResolveError::ColorNoName.is_no_name());
        assert!(!ResolveError::AllocationFailure.is_no_name());
    }

    #[test]
    fn test_try_reserve_maps_to_allocation_failure() {
        let mut s = String::new();
        let err = s.try_reserve(usize::MAX).unwrap_err();
        assert_eq!(ResolveError::from(err), ResolveError::AllocationFailure);
    }
}
