//! Error types for the capacity engine.
//!
//! The calculation layer itself never fails: unparseable periods, unknown
//! quarters and missing holiday data all degrade to zero or empty values.
//! These errors exist at the boundaries, when configuration is loaded from
//! disk or when an API request references something that does not exist.

use thiserror::Error;

/// The main error type for the capacity engine.
///
/// # Example
///
/// ```
/// use capacity_engine::error::EngineError;
///
/// let error = EngineError::InvalidPeriod {
///     label: "Q5 2026".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid period label: Q5 2026");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A settings value is outside the range the engine can work with.
    #[error("Invalid setting '{field}': {message}")]
    InvalidSettings {
        /// The offending settings field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A day quantity in the planning data is negative.
    #[error("Invalid days for {context}: {days}")]
    InvalidDays {
        /// The entry carrying the value.
        context: String,
        /// The value as supplied.
        days: String,
    },

    /// A period label did not match any known grammar.
    #[error("Invalid period label: {label}")]
    InvalidPeriod {
        /// The label as supplied.
        label: String,
    },

    /// No team member with the given id exists in the snapshot.
    #[error("Team member not found: {id}")]
    MemberNotFound {
        /// The member id that was looked up.
        id: String,
    },

    /// No project with the given id exists in the snapshot.
    #[error("Project not found: {id}")]
    ProjectNotFound {
        /// The project id that was looked up.
        id: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
