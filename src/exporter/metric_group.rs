use crate::core::domain::{
    error::ExporterResult,
    model::metric_sample::{MetricDescriptor, MetricSample},
};
use async_trait::async_trait;

/// A set of related metrics registered with the [`Exporter`](super::Exporter).
///
/// `describe` is static: it lists every metric the group may ever emit.
/// `collect` runs once per scrape and either returns every sample for that
/// cycle or an error, in which case the group contributes nothing.
#[async_trait]
pub trait MetricGroup: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Every metric this group may emit.
    fn describe(&self) -> Vec<MetricDescriptor>;

    /// Collects the samples for the current scrape.
    async fn collect(&self) -> ExporterResult<Vec<MetricSample>>;
}
