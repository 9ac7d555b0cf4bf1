//! Prometheus exporter for Couchbase.
//!
//! On every scrape the exporter fetches `/pools/default` from one Couchbase
//! node, flattens the cluster storage totals and the per-node counters into
//! gauges, and serves them in the Prometheus text format.

mod core;
pub mod exporter;
pub mod server;
pub mod settings;
mod stats;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use crate::{
    core::{
        domain::{
            error::{ExporterError, ExporterResult, ValidationError},
            model::{
                metric_sample::{MetricDescriptor, MetricKind, MetricSample},
                stats_document::{
                    HddTotals, InterestingStats, NodeEntry, NodeHealth, RamTotals, StatsDocument,
                    StorageTotals, SystemStats,
                },
            },
            value_object::{ListenAddress, NodeNameFilter, NodeUrl, TelemetryPath},
        },
        infrastructure::stats_fetcher::{
            REQUEST_TIMEOUT, STATS_PATH, StatsFetcher, StatsSource, build_http_client,
            build_http_client_with_timeout,
        },
    },
    exporter::{Exporter, MetricGroup, Scrape},
    settings::{ExporterConfig, Settings},
    stats::application::service::{metric_formatter::MetricFormatter, node_collector::NodeCollector},
};

/// Metric name prefix of everything this crate exports.
pub const NAMESPACE: &str = "couchbase";

/// Builds the exporter for a validated configuration.
///
/// The HTTP client is created once here and shared by every scrape.
///
/// # Examples
///
/// ```no_run
/// use couchbase_exporter::{ExporterResult, Settings, build_exporter};
/// use clap::Parser;
///
/// #[tokio::main]
/// async fn main() -> ExporterResult<()> {
///     let config = Settings::parse().validate()?;
///     let exporter = build_exporter(&config)?;
///     println!("{}", exporter.render().await?);
///     Ok(())
/// }
/// ```
///
/// # Errors
/// Returns `ExporterError::Transport` if the HTTP client cannot be built.
pub fn build_exporter(config: &ExporterConfig) -> ExporterResult<Exporter> {
    let fetcher = StatsFetcher::new(build_http_client()?);
    let mut exporter = Exporter::new(NAMESPACE);
    exporter.add_group(NodeCollector::new(
        fetcher,
        config.node_url().clone(),
        config.node_name().cloned(),
    ));
    Ok(exporter)
}
