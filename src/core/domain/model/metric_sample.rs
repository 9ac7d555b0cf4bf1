//! Output unit handed to the exporter on every scrape.

/// Metric kind. Everything this exporter publishes is a point-in-time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Gauge,
}

/// Static description of a metric a collector group may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: MetricKind,
}

impl MetricDescriptor {
    pub const fn gauge(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            kind: MetricKind::Gauge,
        }
    }
}

/// One labelled value produced during a collection.
///
/// Labels can only be attached as key/value pairs, so the key and value
/// sequences always have the same length and positional meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSample {
    name: String,
    kind: MetricKind,
    value: i64,
    description: String,
    label_keys: Vec<String>,
    label_values: Vec<String>,
}

impl MetricSample {
    /// Creates an unlabelled sample for the given descriptor.
    pub fn new(descriptor: &MetricDescriptor, value: i64) -> Self {
        Self {
            name: descriptor.name.to_string(),
            kind: descriptor.kind,
            value,
            description: descriptor.help.to_string(),
            label_keys: Vec::new(),
            label_values: Vec::new(),
        }
    }

    /// Appends a label after any existing ones.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_label(key, value);
        self
    }

    /// Appends a label after any existing ones.
    pub fn push_label(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.label_keys.push(key.into());
        self.label_values.push(value.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn label_keys(&self) -> &[String] {
        &self.label_keys
    }

    pub fn label_values(&self) -> &[String] {
        &self.label_values
    }

    /// Returns the value of a label, if present.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.label_keys
            .iter()
            .position(|k| k == key)
            .map(|idx| self.label_values[idx].as_str())
    }

    /// Returns the labels as ordered key/value pairs.
    pub fn labels(&self) -> Vec<(String, String)> {
        self.label_keys
            .iter()
            .cloned()
            .zip(self.label_values.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURR_ITEMS: MetricDescriptor = MetricDescriptor::gauge("curr_items", "Active items");

    #[test]
    fn test_labels_keep_insertion_order() {
        let sample = MetricSample::new(&CURR_ITEMS, 42)
            .with_label("hostname", "n1")
            .with_label("source", "http://h:8091");

        assert_eq!(sample.name(), "curr_items");
        assert_eq!(sample.kind(), MetricKind::Gauge);
        assert_eq!(sample.value(), 42);
        assert_eq!(sample.description(), "Active items");
        assert_eq!(sample.label_keys(), ["hostname", "source"]);
        assert_eq!(sample.label_values(), ["n1", "http://h:8091"]);
        assert_eq!(
            sample.labels(),
            vec![
                ("hostname".to_string(), "n1".to_string()),
                ("source".to_string(), "http://h:8091".to_string()),
            ]
        );
    }

    #[test]
    fn test_label_lookup() {
        let mut sample = MetricSample::new(&CURR_ITEMS, 0);
        assert_eq!(sample.label("source"), None);
        sample.push_label("source", "http://h:8091");
        assert_eq!(sample.label("source"), Some("http://h:8091"));
    }
}
