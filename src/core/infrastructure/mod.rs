pub mod stats_fetcher;
