//! HTTP surface: the telemetry path and a landing page.

use crate::{
    core::domain::{error::ExporterResult, value_object::TelemetryPath},
    exporter::Exporter,
};
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Content type of the OpenMetrics text produced by `prometheus-client`.
pub const METRICS_CONTENT_TYPE: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

#[derive(Clone)]
struct AppState {
    exporter: Arc<Exporter>,
    landing_page: Arc<str>,
}

/// Builds the router serving `telemetry_path` and `/`.
pub fn router(exporter: Arc<Exporter>, telemetry_path: &TelemetryPath) -> Router {
    let state = AppState {
        exporter,
        landing_page: landing_page("Couchbase exporter", telemetry_path.as_str()).into(),
    };
    Router::new()
        .route(telemetry_path.as_str(), get(metrics_handler))
        .route("/", get(landing_handler))
        .with_state(state)
}

/// Serves `router` on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, router: Router) -> ExporterResult<()> {
    info!(address = %listener.local_addr()?, "Listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl-C handler: {e:?}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.exporter.render().await {
        Ok(body) => ([(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            error!("Failed to render metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error encoding metrics").into_response()
        }
    }
}

async fn landing_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.landing_page.to_string())
}

fn landing_page(title: &str, telemetry_path: &str) -> String {
    format!(
        "<html>\n\
         <head><title>{title}</title></head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         <p><a href=\"{telemetry_path}\">Metrics</a></p>\n\
         </body>\n\
         </html>\n"
    )
}
