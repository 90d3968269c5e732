use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::json;

use crate::{handlers::AppState, history::HistoryEntry, render};

#[derive(Debug, Serialize)]
pub struct HistoryItem {
    #[serde(flatten)]
    pub entry: HistoryEntry,
    pub rendered: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub total: usize,
    pub entries: Vec<HistoryItem>,
}

/// GET /api/history - completed appraisals, newest first
pub async fn list_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let entries: Vec<HistoryItem> = state
        .appraiser
        .history()
        .list()
        .await
        .into_iter()
        .map(|entry| HistoryItem {
            rendered: render::render_appraisal(&entry.appraisal),
            entry,
        })
        .collect();

    Json(HistoryResponse {
        total: entries.len(),
        entries,
    })
}

/// DELETE /api/history - forget all appraisals
pub async fn clear_history(State(state): State<AppState>) -> Json<serde_json::Value> {
    let cleared = state.appraiser.history().clear().await;
    tracing::info!(cleared = cleared, "History cleared");
    Json(json!({ "cleared": cleared }))
}
