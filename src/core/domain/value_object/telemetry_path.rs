use crate::core::domain::error::ValidationError;

/// The HTTP path metrics are served under (default `/metrics`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryPath(String);

impl TelemetryPath {
    /// Creates a new telemetry path after validating it.
    pub fn new(path: impl Into<String>) -> Result<Self, ValidationError> {
        let path = path.into();
        validate_telemetry_path(&path)?;
        Ok(Self(path))
    }

    /// Returns the path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TelemetryPath {
    fn default() -> Self {
        Self("/metrics".to_string())
    }
}

/// Validates a telemetry path. `/` is reserved for the landing page.
pub(crate) fn validate_telemetry_path(path: &str) -> Result<(), ValidationError> {
    if !path.starts_with('/') {
        return Err(ValidationError::field(
            "web.telemetry-path",
            "Path must start with '/'",
        ));
    }
    if path == "/" {
        return Err(ValidationError::field(
            "web.telemetry-path",
            "Path '/' is reserved for the landing page",
        ));
    }
    // `:`, `*` and braces are route parameters and wildcards to the router.
    if path
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '?' | '#' | ':' | '*' | '{' | '}'))
    {
        return Err(ValidationError::Format(format!(
            "Path '{}' contains characters not allowed in a route",
            path
        )));
    }
    Ok(())
}
