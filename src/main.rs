use std::sync::Arc;

use clap::Parser;
use couchbase_exporter::{Settings, build_exporter, server, telemetry};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Settings::parse().validate()?;
    telemetry::init(config.log_level());

    info!(
        node_url = %config.node_url(),
        node_name = config.node_name().map(|n| n.as_str()).unwrap_or("*"),
        telemetry_path = config.telemetry_path().as_str(),
        "Starting couchbase_exporter"
    );

    let exporter = Arc::new(build_exporter(&config)?);
    let listener = TcpListener::bind(config.listen_address().as_str()).await?;
    server::serve(listener, server::router(exporter, config.telemetry_path())).await?;

    Ok(())
}
