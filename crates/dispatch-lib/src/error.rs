use thiserror::Error;

/// Convenient result alias for the dispatch library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// The solver itself never fails; these errors come from the edges: reading
/// configuration and decoding whole request documents.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value could not be parsed.
    #[error("invalid value for {name}: '{value}'")]
    InvalidSetting { name: String, value: String },

    /// A configuration value parsed but falls outside its allowed range.
    #[error("{name} must be {expected}, got {value}")]
    SettingOutOfRange {
        name: String,
        expected: &'static str,
        value: String,
    },

    /// Raised when a request document is valid JSON but not an object.
    #[error("request body must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
