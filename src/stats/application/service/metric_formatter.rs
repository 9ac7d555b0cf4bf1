//! Flattens a stats document into labelled gauge samples.

use crate::core::domain::{
    model::{
        metric_sample::{MetricDescriptor, MetricSample},
        stats_document::{NodeEntry, StatsDocument, StorageTotals, SystemStats},
    },
    value_object::NodeNameFilter,
};

/// Label carrying the node hostname on per-node samples.
pub const HOSTNAME_LABEL: &str = "hostname";
/// Label carrying the queried node URL on every sample.
pub const SOURCE_LABEL: &str = "source";

/// Cluster-wide capacity figures, emitted once per collection.
pub const STORAGE_METRICS: [MetricDescriptor; 7] = [
    MetricDescriptor::gauge("storage_hdd_total", "Total disk capacity of the cluster in bytes"),
    MetricDescriptor::gauge("storage_hdd_free", "Free disk capacity of the cluster in bytes"),
    MetricDescriptor::gauge("storage_hdd_used", "Disk space used on the cluster in bytes"),
    MetricDescriptor::gauge(
        "storage_hdd_usedbydata",
        "Disk space used by Couchbase data in bytes",
    ),
    MetricDescriptor::gauge("storage_ram_total", "Total memory of the cluster in bytes"),
    MetricDescriptor::gauge("storage_ram_used", "Memory used on the cluster in bytes"),
    MetricDescriptor::gauge(
        "storage_ram_usedbydata",
        "Memory used by Couchbase data in bytes",
    ),
];

/// Per-node figures, emitted for every node kept by the name filter.
pub const NODE_METRICS: [MetricDescriptor; 19] = [
    MetricDescriptor::gauge("cmd_get", "Get operations per second"),
    MetricDescriptor::gauge(
        "couch_docs_actual_disk_size",
        "Disk size of the data files in bytes",
    ),
    MetricDescriptor::gauge("couch_docs_data_size", "Size of the document data in bytes"),
    MetricDescriptor::gauge(
        "couch_views_actual_disk_size",
        "Disk size of the view indexes in bytes",
    ),
    MetricDescriptor::gauge("couch_views_data_size", "Size of the view index data in bytes"),
    MetricDescriptor::gauge("curr_items", "Active items on the node"),
    MetricDescriptor::gauge("curr_items_tot", "Active and replica items on the node"),
    MetricDescriptor::gauge(
        "ep_bg_fetched",
        "Items fetched from disk by the background fetcher",
    ),
    MetricDescriptor::gauge("get_hits", "Get hits per second"),
    MetricDescriptor::gauge("mem_used", "Memory used by the data service in bytes"),
    MetricDescriptor::gauge("ops", "Operations per second"),
    MetricDescriptor::gauge("vb_replica_curr_items", "Replica items on the node"),
    MetricDescriptor::gauge("cpu_utilization_rate", "CPU utilization percentage"),
    MetricDescriptor::gauge("swap_total", "Total swap space in bytes"),
    MetricDescriptor::gauge("swap_used", "Used swap space in bytes"),
    MetricDescriptor::gauge("mem_total", "Total host memory in bytes"),
    MetricDescriptor::gauge("mem_free", "Free host memory in bytes"),
    MetricDescriptor::gauge("uptime", "Seconds since the node started"),
    MetricDescriptor::gauge("status", "1 if the node reports itself healthy, 0 otherwise"),
];

/// Translates stats documents into samples. Stateless: formatting the same
/// document twice yields the same samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricFormatter;

impl MetricFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Every descriptor `format` may emit, storage totals first.
    pub fn descriptors() -> Vec<MetricDescriptor> {
        STORAGE_METRICS.iter().chain(NODE_METRICS.iter()).copied().collect()
    }

    /// Formats `document` as fetched from `node_url`.
    ///
    /// Storage totals are always emitted. Nodes not matched by `node_name`
    /// are skipped; `None` keeps all of them. Per-node samples carry a
    /// `hostname` label, and every sample gets `source = node_url` as its
    /// last label.
    pub fn format(
        &self,
        node_url: &str,
        node_name: Option<&NodeNameFilter>,
        document: &StatsDocument,
    ) -> Vec<MetricSample> {
        let kept = document
            .nodes
            .iter()
            .filter(|node| node_name.is_none_or(|filter| filter.matches(&node.hostname)));

        let mut samples = Vec::with_capacity(
            STORAGE_METRICS.len() + NODE_METRICS.len() * document.nodes.len(),
        );
        samples.extend(
            STORAGE_METRICS
                .iter()
                .zip(storage_values(&document.storage_totals))
                .map(|(descriptor, value)| MetricSample::new(descriptor, value)),
        );
        for node in kept {
            samples.extend(
                NODE_METRICS
                    .iter()
                    .zip(node_values(node))
                    .map(|(descriptor, value)| {
                        MetricSample::new(descriptor, value)
                            .with_label(HOSTNAME_LABEL, node.hostname.as_str())
                    }),
            );
        }

        for sample in &mut samples {
            sample.push_label(SOURCE_LABEL, node_url);
        }
        samples
    }
}

/// Values in `STORAGE_METRICS` order.
fn storage_values(totals: &StorageTotals) -> [i64; 7] {
    [
        gauge(totals.hdd.total),
        gauge(totals.hdd.free),
        gauge(totals.hdd.used),
        gauge(totals.hdd.used_by_data),
        gauge(totals.ram.total),
        gauge(totals.ram.used),
        gauge(totals.ram.used_by_data),
    ]
}

/// Stands in for a node that reports no system stats.
const NO_SYSTEM_STATS: SystemStats = SystemStats {
    cpu_utilization_rate: 0.0,
    swap_total: 0,
    swap_used: 0,
    mem_total: 0,
    mem_free: 0,
};

/// Values in `NODE_METRICS` order. A missing system-stats block reads as zeros.
fn node_values(node: &NodeEntry) -> [i64; 19] {
    let stats = &node.interesting_stats;
    let system = node.system_stats.as_ref().unwrap_or(&NO_SYSTEM_STATS);
    [
        truncate(stats.cmd_get),
        gauge(stats.couch_docs_actual_disk_size),
        gauge(stats.couch_docs_data_size),
        gauge(stats.couch_views_actual_disk_size),
        gauge(stats.couch_views_data_size),
        gauge(stats.curr_items),
        gauge(stats.curr_items_tot),
        gauge(stats.ep_bg_fetched),
        truncate(stats.get_hits),
        gauge(stats.mem_used),
        truncate(stats.ops),
        gauge(stats.vb_replica_curr_items),
        truncate(system.cpu_utilization_rate),
        gauge(system.swap_total),
        gauge(system.swap_used),
        gauge(system.mem_total),
        gauge(system.mem_free),
        gauge(node.uptime),
        i64::from(node.status.is_healthy()),
    ]
}

fn gauge(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Drops the fractional part; saturates at the i64 bounds and maps NaN to 0.
fn truncate(value: f64) -> i64 {
    value as i64
}
