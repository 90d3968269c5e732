use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::AppError,
    handlers::AppState,
    metrics,
    pricing::{parse_confidence_value, Condition, PriceBreakdown},
};

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub label: String,
    /// Number or numeric string
    pub confidence: Value,
    #[serde(default = "default_condition")]
    pub condition: String,
}

fn default_condition() -> String {
    Condition::New.as_str().to_string()
}

/// POST /api/estimate - price a label directly, without the classifier
pub async fn handle_estimate(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<PriceBreakdown>, AppError> {
    let confidence = parse_confidence_value(&request.confidence)?;
    let condition: Condition = request.condition.parse()?;

    let estimator = state.estimator.load();
    let breakdown = estimator.estimate_with(&request.label, confidence, condition);
    let category = estimator.resolve(&request.label).category().unwrap_or("fallback").to_string();

    metrics::record_estimate(&category, condition.as_str());

    tracing::info!(
        label = %request.label,
        category = %category,
        condition = %condition,
        final_price = breakdown.final_price,
        "Handled estimate request"
    );

    Ok(Json(breakdown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn request(value: Value) -> Json<EstimateRequest> {
        Json(serde_json::from_value(value).unwrap())
    }

    #[tokio::test]
    async fn test_estimate_sports_car() {
        let state = AppState::from_config(Config::default());
        let Json(breakdown) = handle_estimate(
            State(state),
            request(json!({"label": "sports_car", "confidence": 0.95, "condition": "New"})),
        )
        .await
        .unwrap();

        assert_eq!(breakdown.final_price, 2_280_300);
    }

    #[tokio::test]
    async fn test_estimate_defaults_to_new() {
        let state = AppState::from_config(Config::default());
        let Json(breakdown) = handle_estimate(
            State(state),
            request(json!({"label": "unknown_widget", "confidence": "0.5"})),
        )
        .await
        .unwrap();

        assert_eq!(breakdown.condition, "New");
        assert_eq!(breakdown.final_price, 2_750);
    }

    #[tokio::test]
    async fn test_estimate_rejects_malformed_confidence() {
        let state = AppState::from_config(Config::default());
        let result = handle_estimate(
            State(state),
            request(json!({"label": "sofa", "confidence": "high"})),
        )
        .await;

        assert!(matches!(result, Err(AppError::InputFormat(_))));
    }

    #[tokio::test]
    async fn test_estimate_rejects_unknown_condition() {
        let state = AppState::from_config(Config::default());
        let result = handle_estimate(
            State(state),
            request(json!({"label": "sofa", "confidence": 0.5, "condition": "Broken"})),
        )
        .await;

        assert!(matches!(result, Err(AppError::InputFormat(_))));
    }
}
