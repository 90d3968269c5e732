use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, AppState},
    metrics,
    signals::{setup_signal_handlers, Reloadable},
};

/// Start the price estimator server
///
/// This function:
/// 1. Initializes metrics (if enabled)
/// 2. Sets up signal handlers for graceful shutdown and pricing reload
/// 3. Creates the Axum application
/// 4. Binds to the configured address
/// 5. Serves requests with graceful shutdown support
pub async fn start_server(config: Config, config_path: PathBuf) -> Result<()> {
    let metrics_route = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        Some((config.metrics.endpoint.clone(), Arc::new(metrics::init_metrics()?)))
    } else {
        None
    };

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));
    let body_limit = config.server.max_upload_mb * 1024 * 1024;
    let classifier_url = config.classifier.predict_url();
    let category_count = config.pricing.categories.len();

    let state = AppState::from_config(config);

    let (shutdown_tx, signal_handle) = setup_signal_handlers(Reloadable {
        config_path,
        config: state.config.clone(),
        estimator: state.estimator.clone(),
        classifier: state.classifier.clone(),
    });
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app = create_router(state, metrics_route, body_limit);

    info!("Starting price estimator on {}", addr);
    info!(
        "Configuration: classifier at {}, {} price categories",
        classifier_url, category_count
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(
    state: AppState,
    metrics_route: Option<(String, Arc<PrometheusHandle>)>,
    body_limit: usize,
) -> Router {
    let api_routes = Router::new()
        .route("/api/estimate", post(handlers::estimate::handle_estimate))
        .route("/api/appraise", post(handlers::appraise::handle_appraise))
        .route(
            "/api/history",
            get(handlers::history::list_history).delete(handlers::history::clear_history),
        )
        .route("/ready", get(handlers::health::readiness_check))
        .with_state(state);

    let mut router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(api_routes);

    if let Some((endpoint, handle)) = metrics_route {
        router = router.merge(
            Router::new()
                .route(&endpoint, get(handlers::metrics_handler::metrics))
                .with_state(handle),
        );
    }

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
