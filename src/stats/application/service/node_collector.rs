use crate::{
    core::{
        domain::{
            error::ExporterResult,
            model::metric_sample::{MetricDescriptor, MetricSample},
            value_object::{NodeNameFilter, NodeUrl},
        },
        infrastructure::stats_fetcher::{StatsFetcher, StatsSource},
    },
    exporter::MetricGroup,
    stats::application::service::metric_formatter::MetricFormatter,
};
use async_trait::async_trait;

/// Collects node and storage metrics from one Couchbase node on every scrape.
///
/// The node URL and the optional hostname filter are fixed at construction.
/// Nothing is cached between scrapes: every `collect` performs one fetch.
#[derive(Debug)]
pub struct NodeCollector<S = StatsFetcher> {
    source: S,
    node_url: NodeUrl,
    node_name: Option<NodeNameFilter>,
    formatter: MetricFormatter,
}

impl<S: StatsSource> NodeCollector<S> {
    pub fn new(source: S, node_url: NodeUrl, node_name: Option<NodeNameFilter>) -> Self {
        Self {
            source,
            node_url,
            node_name,
            formatter: MetricFormatter::new(),
        }
    }

    pub fn node_url(&self) -> &NodeUrl {
        &self.node_url
    }

    pub fn node_name(&self) -> Option<&NodeNameFilter> {
        self.node_name.as_ref()
    }

    /// Fetches the node stats and formats them.
    ///
    /// # Errors
    /// Any fetch error is returned as is; no samples are produced for the cycle.
    pub async fn collect(&self) -> ExporterResult<Vec<MetricSample>> {
        let document = self.source.fetch(&self.node_url).await?;
        Ok(self
            .formatter
            .format(self.node_url.as_str(), self.node_name.as_ref(), &document))
    }
}

#[async_trait]
impl<S: StatsSource> MetricGroup for NodeCollector<S> {
    fn name(&self) -> &str {
        "node"
    }

    fn describe(&self) -> Vec<MetricDescriptor> {
        MetricFormatter::descriptors()
    }

    async fn collect(&self) -> ExporterResult<Vec<MetricSample>> {
        NodeCollector::collect(self).await
    }
}
