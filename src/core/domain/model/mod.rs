pub mod metric_sample;
pub mod stats_document;
