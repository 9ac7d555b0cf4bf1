use crate::core::domain::error::ValidationError;

/// Address the metrics server binds to, as `host:port`.
///
/// A bare `:port` (the conventional exporter flag form) binds every
/// interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenAddress(String);

impl ListenAddress {
    /// Creates a new listen address after validating and normalising it.
    pub fn new(address: impl Into<String>) -> Result<Self, ValidationError> {
        let address = address.into();
        let address = match address.strip_prefix(':') {
            Some(port) => format!("0.0.0.0:{}", port),
            None => address,
        };
        validate_listen_address(&address)?;
        Ok(Self(address))
    }

    /// Returns the normalised `host:port` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a `host:port` pair.
pub(crate) fn validate_listen_address(address: &str) -> Result<(), ValidationError> {
    let (host, port) = address.rsplit_once(':').ok_or_else(|| {
        ValidationError::field("web.listen-address", "Address must be in host:port form")
    })?;

    if host.is_empty() {
        return Err(ValidationError::field(
            "web.listen-address",
            "Host cannot be empty",
        ));
    }

    port.parse::<u16>().map_err(|_| {
        ValidationError::Format(format!("Invalid port '{}' in listen address", port))
    })?;

    Ok(())
}
