//! Command line configuration.
//!
//! Flag names follow the usual Prometheus exporter conventions
//! (`--web.listen-address`, `--web.telemetry-path`, ...).

use crate::core::domain::{
    error::{ExporterResult, ValidationError},
    value_object::{ListenAddress, NodeNameFilter, NodeUrl, TelemetryPath},
};
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

/// Raw command line flags.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "couchbase_exporter",
    version,
    about = "Exports Couchbase node and cluster statistics to Prometheus"
)]
pub struct Settings {
    /// Address to listen on for web interface and telemetry.
    #[arg(long = "web.listen-address", default_value = ":9131")]
    pub listen_address: String,

    /// Path under which to expose metrics.
    #[arg(long = "web.telemetry-path", default_value = "/metrics")]
    pub telemetry_path: String,

    /// Base URL of the Couchbase node to poll.
    #[arg(long = "node.url", default_value = "http://localhost:8091")]
    pub node_url: String,

    /// Only export nodes whose hostname starts with this prefix.
    #[arg(long = "node.name")]
    pub node_name: Option<String>,

    /// Log level (trace, debug, info, warn, error, off). `RUST_LOG` takes precedence.
    #[arg(long = "log.level", default_value = "info")]
    pub log_level: String,
}

impl Settings {
    /// Validates the raw flags into an [`ExporterConfig`].
    ///
    /// # Errors
    /// Returns `ExporterError::Validation` for the first invalid flag.
    pub fn validate(self) -> ExporterResult<ExporterConfig> {
        let log_level = self.log_level.parse::<LevelFilter>().map_err(|_| {
            ValidationError::field(
                "log.level",
                format!("Unknown log level '{}'", self.log_level),
            )
        })?;

        Ok(ExporterConfig {
            listen_address: ListenAddress::new(self.listen_address)?,
            telemetry_path: TelemetryPath::new(self.telemetry_path)?,
            node_url: NodeUrl::new(self.node_url)?,
            node_name: NodeNameFilter::from_option(self.node_name),
            log_level,
        })
    }
}

/// Validated, immutable process configuration.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    listen_address: ListenAddress,
    telemetry_path: TelemetryPath,
    node_url: NodeUrl,
    node_name: Option<NodeNameFilter>,
    log_level: LevelFilter,
}

impl ExporterConfig {
    pub fn listen_address(&self) -> &ListenAddress {
        &self.listen_address
    }

    pub fn telemetry_path(&self) -> &TelemetryPath {
        &self.telemetry_path
    }

    pub fn node_url(&self) -> &NodeUrl {
        &self.node_url
    }

    pub fn node_name(&self) -> Option<&NodeNameFilter> {
        self.node_name.as_ref()
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::error::ExporterError;

    fn parse(args: &[&str]) -> ExporterResult<ExporterConfig> {
        let argv = std::iter::once("couchbase_exporter").chain(args.iter().copied());
        Settings::try_parse_from(argv).unwrap().validate()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.listen_address().as_str(), "0.0.0.0:9131");
        assert_eq!(config.telemetry_path().as_str(), "/metrics");
        assert_eq!(config.node_url().as_str(), "http://localhost:8091");
        assert!(config.node_name().is_none());
        assert_eq!(config.log_level(), LevelFilter::INFO);
    }

    #[test]
    fn test_all_flags() {
        let config = parse(&[
            "--web.listen-address",
            "127.0.0.1:9999",
            "--web.telemetry-path",
            "/cb",
            "--node.url",
            "https://cb.example.com:18091",
            "--node.name",
            "web",
            "--log.level",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.listen_address().as_str(), "127.0.0.1:9999");
        assert_eq!(config.telemetry_path().as_str(), "/cb");
        assert_eq!(config.node_url().as_str(), "https://cb.example.com:18091");
        assert_eq!(config.node_name().unwrap().as_str(), "web");
        assert_eq!(config.log_level(), LevelFilter::DEBUG);
    }

    #[test]
    fn test_empty_node_name_disables_filter() {
        let config = parse(&["--node.name", ""]).unwrap();
        assert!(config.node_name().is_none());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            parse(&["--node.url", "couchbase://localhost"]),
            Err(ExporterError::Validation(_))
        ));
        assert!(matches!(
            parse(&["--web.telemetry-path", "metrics"]),
            Err(ExporterError::Validation(_))
        ));
        assert!(matches!(
            parse(&["--web.telemetry-path", "/*"]),
            Err(ExporterError::Validation(_))
        ));
        assert!(matches!(
            parse(&["--web.telemetry-path", "/:x"]),
            Err(ExporterError::Validation(_))
        ));
        assert!(matches!(
            parse(&["--web.listen-address", "9131"]),
            Err(ExporterError::Validation(_))
        ));
        assert!(matches!(
            parse(&["--log.level", "loud"]),
            Err(ExporterError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_flag_is_a_parse_error() {
        assert!(Settings::try_parse_from(["couchbase_exporter", "--node.port", "8091"]).is_err());
    }
}
