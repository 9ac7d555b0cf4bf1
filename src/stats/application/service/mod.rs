pub mod metric_formatter;
pub mod node_collector;
