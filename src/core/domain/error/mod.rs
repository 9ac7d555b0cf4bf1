use thiserror::Error;

/// The main error type for exporter operations.
///
/// Fetch failures (`Transport`, `Upstream`, `Decode`) are recoverable: the
/// exporter logs them, counts them and serves an empty result for that
/// scrape. The remaining variants surface while bootstrapping the process.
#[derive(Error, Debug)]
pub enum ExporterError {
    /// The request to the Couchbase node could not be built, sent or read
    ///
    /// # Fields
    /// * `0` - A description of what went wrong on the wire
    #[error("Transport error: {0}")]
    Transport(String),

    /// The Couchbase node answered with a status other than 200
    ///
    /// # Fields
    /// * `status` - The HTTP status code received
    /// * `body` - The response body, kept for diagnostics
    #[error("Couchbase node stats non-200 status ({status}) received, body: {body}")]
    Upstream { status: u16, body: String },

    /// The response body was not a stats document
    ///
    /// # Fields
    /// * `0` - The deserializer's description of the problem
    #[error("Decode error: {0}")]
    Decode(String),

    /// Represents configuration validation failures
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Metrics could not be encoded into the exposition format
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Socket level failures while serving metrics
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExporterError {
    /// Returns true for failures raised while fetching stats from the node.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            ExporterError::Transport(_) | ExporterError::Upstream { .. } | ExporterError::Decode(_)
        )
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a configuration
/// value was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),
}

impl ValidationError {
    pub(crate) fn field(field: &str, message: impl Into<String>) -> Self {
        ValidationError::Field {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Type alias for Results that may fail with an ExporterError
pub type ExporterResult<T> = Result<T, ExporterError>;
