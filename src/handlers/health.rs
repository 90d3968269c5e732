use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::handlers::AppState;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "service": "price-estimator",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness check endpoint
/// Reports the loaded pricing tables and classifier target
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let history_entries = state.appraiser.history().len().await;
    let classifier = state.appraiser.classifier();
    let estimator = state.estimator.load_full();
    let catalog = estimator.catalog();

    (StatusCode::OK, Json(json!({
        "status": "ready",
        "service": "price-estimator",
        "classifier_url": classifier.predict_url(),
        "categories": catalog.categories.len(),
        "labels": catalog.labels.len(),
        "history_entries": history_entries,
    })))
}
