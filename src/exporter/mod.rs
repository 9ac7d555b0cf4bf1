//! Collector registry and Prometheus text encoding.
//!
//! Groups are collected one after another on every scrape. A group that
//! fails is logged, counted and skipped for that scrape only.

mod metric_group;

pub use metric_group::MetricGroup;

use crate::core::domain::{
    error::{ExporterError, ExporterResult},
    model::metric_sample::{MetricDescriptor, MetricSample},
};
use prometheus_client::{
    encoding::text::encode,
    metrics::{counter::Counter, family::Family, gauge::Gauge},
    registry::Registry,
};
use std::collections::HashMap;
use tracing::{debug, error, warn};

/// Label set of a rendered sample, in the sample's label order.
type LabelSet = Vec<(String, String)>;

/// Result of running every registered group once.
#[derive(Debug, Default)]
pub struct Scrape {
    pub samples: Vec<MetricSample>,
    pub failed_groups: usize,
}

impl Scrape {
    pub fn is_success(&self) -> bool {
        self.failed_groups == 0
    }
}

/// Namespaced set of metric groups, rendered on demand.
pub struct Exporter {
    namespace: String,
    groups: Vec<Box<dyn MetricGroup>>,
    scrape_errors: Counter,
}

impl Exporter {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            groups: Vec::new(),
            scrape_errors: Counter::default(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn add_group(&mut self, group: impl MetricGroup + 'static) {
        self.groups.push(Box::new(group));
    }

    /// Number of failed group collections since startup.
    pub fn scrape_errors(&self) -> u64 {
        self.scrape_errors.get()
    }

    /// Union of every group's descriptors, in registration order.
    pub fn describe(&self) -> Vec<MetricDescriptor> {
        let mut descriptors: Vec<MetricDescriptor> = Vec::new();
        for descriptor in self.groups.iter().flat_map(|g| g.describe()) {
            if !descriptors.iter().any(|d| d.name == descriptor.name) {
                descriptors.push(descriptor);
            }
        }
        descriptors
    }

    /// Runs every group once.
    pub async fn collect(&self) -> Scrape {
        let mut scrape = Scrape::default();
        for group in &self.groups {
            match group.collect().await {
                Ok(samples) => {
                    debug!(group = group.name(), samples = samples.len(), "Collected group");
                    scrape.samples.extend(samples);
                }
                Err(e) if e.is_fetch_error() => {
                    warn!(group = group.name(), error = %e, "Error collecting group");
                    self.scrape_errors.inc();
                    scrape.failed_groups += 1;
                }
                Err(e) => {
                    error!(group = group.name(), error = %e, "Unexpected error collecting group");
                    self.scrape_errors.inc();
                    scrape.failed_groups += 1;
                }
            }
        }
        scrape
    }

    /// Collects every group and encodes the result in the text exposition format.
    ///
    /// # Errors
    /// Returns `ExporterError::Encoding` if the registry cannot be encoded.
    pub async fn render(&self) -> ExporterResult<String> {
        let scrape = self.collect().await;
        let registry = self.build_registry(&scrape);

        let mut buffer = String::new();
        encode(&mut buffer, &registry).map_err(|e| ExporterError::Encoding(e.to_string()))?;
        Ok(buffer)
    }

    fn build_registry(&self, scrape: &Scrape) -> Registry {
        let help: HashMap<&str, &str> = self
            .describe()
            .into_iter()
            .map(|d| (d.name, d.help))
            .collect();

        // One gauge family per metric name, in order of first appearance.
        let mut families: Vec<(&str, Family<LabelSet, Gauge>)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for sample in &scrape.samples {
            let idx = *index.entry(sample.name()).or_insert_with(|| {
                families.push((sample.name(), Family::default()));
                families.len() - 1
            });
            families[idx].1.get_or_create(&sample.labels()).set(sample.value());
        }

        let mut registry = Registry::with_prefix(&self.namespace);
        for (name, family) in families {
            let description = help.get(name).copied().unwrap_or_else(|| {
                scrape
                    .samples
                    .iter()
                    .find(|s| s.name() == name)
                    .map(MetricSample::description)
                    .unwrap_or_default()
            });
            registry.register(name, description, family);
        }

        let up: Gauge = Gauge::default();
        up.set(i64::from(scrape.is_success()));
        registry.register(
            "exporter_up",
            "Whether every collector succeeded during the last scrape",
            up,
        );
        registry.register(
            "exporter_scrape_errors",
            "Collector failures since the exporter started",
            self.scrape_errors.clone(),
        );
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    const ITEMS: MetricDescriptor = MetricDescriptor::gauge("items", "Items stored");

    struct StaticGroup(Vec<MetricSample>);

    #[async_trait]
    impl MetricGroup for StaticGroup {
        fn name(&self) -> &str {
            "static"
        }

        fn describe(&self) -> Vec<MetricDescriptor> {
            vec![ITEMS]
        }

        async fn collect(&self) -> ExporterResult<Vec<MetricSample>> {
            Ok(self.0.clone())
        }
    }

    struct FailingGroup;

    #[async_trait]
    impl MetricGroup for FailingGroup {
        fn name(&self) -> &str {
            "failing"
        }

        fn describe(&self) -> Vec<MetricDescriptor> {
            vec![ITEMS]
        }

        async fn collect(&self) -> ExporterResult<Vec<MetricSample>> {
            Err(ExporterError::Transport("connection refused".to_string()))
        }
    }

    fn items(hostname: &str, value: i64) -> MetricSample {
        MetricSample::new(&ITEMS, value)
            .with_label("hostname", hostname)
            .with_label("source", "http://h:8091")
    }

    #[tokio::test]
    async fn test_render_encodes_samples_with_namespace() {
        let mut exporter = Exporter::new("couchbase");
        exporter.add_group(StaticGroup(vec![items("n1", 42), items("n2", 7)]));

        let text = exporter.render().await.unwrap();

        assert!(text.contains("# TYPE couchbase_items gauge"));
        assert!(text.contains("couchbase_items{hostname=\"n1\",source=\"http://h:8091\"} 42"));
        assert!(text.contains("couchbase_items{hostname=\"n2\",source=\"http://h:8091\"} 7"));
        assert!(text.contains("couchbase_exporter_up 1"));
        assert!(text.contains("couchbase_exporter_scrape_errors_total 0"));
    }

    #[tokio::test]
    async fn test_failing_group_contributes_nothing() {
        let mut exporter = Exporter::new("couchbase");
        exporter.add_group(FailingGroup);
        exporter.add_group(StaticGroup(vec![items("n1", 1)]));

        let scrape = exporter.collect().await;
        assert_eq!(scrape.failed_groups, 1);
        assert_eq!(scrape.samples.len(), 1);
        assert!(!scrape.is_success());
        assert_eq!(exporter.scrape_errors(), 1);

        let text = exporter.render().await.unwrap();
        assert!(text.contains("couchbase_exporter_up 0"));
        assert!(text.contains("couchbase_exporter_scrape_errors_total 2"));
        assert!(text.contains("couchbase_items{hostname=\"n1\",source=\"http://h:8091\"} 1"));
    }

    #[tokio::test]
    async fn test_only_failing_group_renders_self_metrics() {
        let mut exporter = Exporter::new("couchbase");
        exporter.add_group(FailingGroup);

        let text = exporter.render().await.unwrap();
        assert!(!text.contains("couchbase_items"));
        assert!(text.contains("couchbase_exporter_up 0"));
    }

    #[test]
    fn test_describe_deduplicates_names() {
        let mut exporter = Exporter::new("couchbase");
        exporter.add_group(StaticGroup(Vec::new()));
        exporter.add_group(FailingGroup);

        assert_eq!(exporter.describe(), vec![ITEMS]);
        assert_eq!(exporter.namespace(), "couchbase");
    }
}
