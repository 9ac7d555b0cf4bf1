use crate::core::domain::error::ValidationError;
use std::fmt;

/// Base URL of the Couchbase node whose admin REST API is polled
/// (e.g. `http://localhost:8091`).
///
/// The URL is kept exactly as configured because it is also published as
/// the `source` label of every sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeUrl(String);

impl NodeUrl {
    /// Creates a new node URL after validating it.
    pub fn new(url: impl Into<String>) -> Result<Self, ValidationError> {
        let url = url.into();
        validate_node_url(&url)?;
        Ok(Self(url))
    }

    /// Returns the URL as configured.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins an API path onto the base URL without doubling the separator.
    pub fn with_path(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.0.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Display for NodeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates a node base URL: non-empty, parseable, http(s) and with a host.
pub(crate) fn validate_node_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Err(ValidationError::field("node.url", "URL cannot be empty"));
    }

    let parsed = url::Url::parse(url)
        .map_err(|e| ValidationError::Format(format!("Invalid node URL '{}': {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ValidationError::field(
                "node.url",
                format!("Unsupported scheme '{}', expected http or https", scheme),
            ));
        }
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::field("node.url", "URL must include a host"));
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ValidationError::field(
            "node.url",
            "URL must not carry a query string or fragment",
        ));
    }

    Ok(())
}
