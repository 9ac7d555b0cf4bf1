//! Domain model for the `/pools/default` endpoint.
//!
//! Decoding is lenient about content: unknown fields are ignored and missing
//! fields fall back to zero, so payloads from different Couchbase releases
//! all decode into the same shape. It is strict about structure: every struct
//! must arrive as a JSON object.

use crate::core::domain::value_object::serde_helpers::{
    Object, object, optional_object, u64_from_string_or_number, vec_of_objects,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Cluster statistics as reported by one node's admin REST API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDocument {
    /// Cluster members, in the order the node reports them.
    pub nodes: Vec<NodeEntry>,
    /// Cluster-wide disk and memory capacity.
    pub storage_totals: StorageTotals,
}

impl<'de> Deserialize<'de> for StatsDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Default, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        struct Fields {
            #[serde(deserialize_with = "vec_of_objects::deserialize")]
            nodes: Vec<NodeEntry>,
            #[serde(deserialize_with = "object::deserialize")]
            storage_totals: StorageTotals,
        }

        let Object(Fields {
            nodes,
            storage_totals,
        }) = Object::deserialize(deserializer)?;
        Ok(Self {
            nodes,
            storage_totals,
        })
    }
}

/// One cluster member.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeEntry {
    /// `host:port` the node is known by (e.g. `10.0.0.7:8091`).
    pub hostname: String,
    /// Health as reported by the cluster manager.
    pub status: NodeHealth,
    /// Seconds since the node started. Couchbase sends this as a string.
    #[serde(deserialize_with = "u64_from_string_or_number::deserialize")]
    pub uptime: u64,
    /// Bucket level counters aggregated on this node.
    #[serde(deserialize_with = "object::deserialize")]
    pub interesting_stats: InterestingStats,
    /// Host level resource usage; older releases omit the block.
    #[serde(alias = "SystemStats", deserialize_with = "optional_object::deserialize")]
    pub system_stats: Option<SystemStats>,
}

/// Node health. Anything other than the exact string `healthy` is unhealthy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum NodeHealth {
    Healthy,
    Other(String),
}

impl NodeHealth {
    pub fn is_healthy(&self) -> bool {
        matches!(self, NodeHealth::Healthy)
    }
}

impl Default for NodeHealth {
    fn default() -> Self {
        NodeHealth::Other(String::new())
    }
}

impl From<String> for NodeHealth {
    fn from(value: String) -> Self {
        if value == "healthy" {
            NodeHealth::Healthy
        } else {
            NodeHealth::Other(value)
        }
    }
}

impl From<NodeHealth> for String {
    fn from(value: NodeHealth) -> Self {
        match value {
            NodeHealth::Healthy => "healthy".to_string(),
            NodeHealth::Other(other) => other,
        }
    }
}

/// Operation counters, cache and document sizes, item counts.
///
/// `cmd_get`, `get_hits` and `ops` are per-second rates and arrive as floats.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InterestingStats {
    pub cmd_get: f64,
    pub couch_docs_actual_disk_size: u64,
    pub couch_docs_data_size: u64,
    pub couch_views_actual_disk_size: u64,
    pub couch_views_data_size: u64,
    pub curr_items: u64,
    pub curr_items_tot: u64,
    pub ep_bg_fetched: u64,
    pub get_hits: f64,
    pub mem_used: u64,
    pub ops: f64,
    pub vb_replica_curr_items: u64,
}

/// Host resource usage.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemStats {
    /// CPU utilisation percentage (0.0 to 100.0).
    pub cpu_utilization_rate: f64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub mem_total: u64,
    pub mem_free: u64,
}

/// Aggregate cluster capacity, in bytes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageTotals {
    #[serde(deserialize_with = "object::deserialize")]
    pub hdd: HddTotals,
    #[serde(deserialize_with = "object::deserialize")]
    pub ram: RamTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HddTotals {
    pub total: u64,
    pub quota_total: u64,
    pub used: u64,
    pub used_by_data: u64,
    pub free: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RamTotals {
    pub total: u64,
    pub quota_total: u64,
    pub quota_used: u64,
    pub used: u64,
    pub used_by_data: u64,
}
