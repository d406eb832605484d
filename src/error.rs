//! Error types for the pay tracker.
//!
//! Constructors of the core value objects fail with [`ValidationError`];
//! everything that touches configuration or storage returns [`TrackerError`].

use std::fmt;

use thiserror::Error;

/// The field a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Entry identifier.
    Id,
    /// Workplace label.
    Workplace,
    /// Hourly pay rate.
    PayRate,
    /// Shift start instant.
    From,
    /// Shift end instant.
    To,
    /// List of unpaid breaks.
    UnpaidBreaks,
    /// Whole hours of a duration.
    Hours,
    /// Minutes of a duration.
    Minutes,
    /// Calendar month.
    Month,
    /// Reporting window bounds.
    Window,
}

impl Field {
    /// Returns the name of the field as it appears in persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Workplace => "workplace",
            Field::PayRate => "payRate",
            Field::From => "from",
            Field::To => "to",
            Field::UnpaidBreaks => "unpaidBreaks",
            Field::Hours => "hours",
            Field::Minutes => "minutes",
            Field::Month => "month",
            Field::Window => "window",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value failed validation while constructing a duration, entry or calendar.
///
/// # Example
///
/// ```
/// use pay_tracker::error::{Field, ValidationError};
///
/// let error = ValidationError::new(Field::PayRate, "cannot be negative");
/// assert_eq!(error.to_string(), "Invalid field 'payRate': cannot be negative");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid field '{field}': {reason}")]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: Field,
    /// Why the value was rejected.
    pub reason: String,
}

impl ValidationError {
    /// Creates a validation error for `field`.
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias for core constructors.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The crate-level error type.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A record or argument failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A stored value could not be read or written.
    #[error("Storage error for key '{key}': {message}")]
    Storage {
        /// The storage key involved.
        key: String,
        /// A description of the failure.
        message: String,
    },

    /// An underlying filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A type alias for Results that return TrackerError.
pub type TrackerResult<T> = Result<T, TrackerError>;
