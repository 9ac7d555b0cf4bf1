use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Installs the global log subscriber. `RUST_LOG` overrides `level` when set.
pub fn init(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
