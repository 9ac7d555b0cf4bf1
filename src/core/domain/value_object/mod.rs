mod listen_address;
mod node_name_filter;
mod node_url;
pub(crate) mod serde_helpers;
mod telemetry_path;

pub use listen_address::ListenAddress;
pub use node_name_filter::NodeNameFilter;
pub use node_url::NodeUrl;
pub use telemetry_path::TelemetryPath;
