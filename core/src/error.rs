use thiserror::Error;

/// Result type for rrscat operations
pub type Result<T> = std::result::Result<T, RrsError>;

/// Error types for rrscat operations
#[derive(Error, Debug)]
pub enum RrsError {
    /// Terminology service unreachable or not reporting an active status
    #[error("Terminology service unavailable: {0}")]
    ServiceUnavailable(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Terminology response did not have the expected shape
    #[error("Malformed terminology response: {0}")]
    MalformedResponse(String),

    /// Laterality index requested for something other than left/right
    #[error("Invalid laterality side '{0}': must be left or right")]
    InvalidSide(String),

    /// Focus procedure list could not be loaded
    #[error("Focus procedure list error: {0}")]
    FocusList(String),

    /// Artifact template could not be loaded
    #[error("Template error: {0}")]
    Template(String),

    /// Generic classification error
    #[error("Classification error: {0}")]
    ClassificationError(String),

    /// Tabular read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// Helper conversions
impl From<String> for RrsError {
    fn from(s: String) -> Self {
        RrsError::ClassificationError(s)
    }
}

impl From<&str> for RrsError {
    fn from(s: &str) -> Self {
        RrsError::ClassificationError(s.to_string())
    }
}
