/// Reloading the config file while the server state is live
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use base64::{engine::general_purpose, Engine as _};
use httpmock::prelude::*;
use price_estimator::{
    appraisal::AppraisalOutcome,
    config::Config,
    handlers::AppState,
    image_utils::ImageUpload,
    pricing::Condition,
    server::create_router,
    signals::{reload_config, Reloadable},
};
use serde_json::{json, Value};
use std::io::Write;
use tower::ServiceExt;

// 1x1 transparent PNG
const PNG_PIXEL: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

fn png_upload(name: &str) -> ImageUpload {
    let bytes = general_purpose::STANDARD.decode(PNG_PIXEL).unwrap();
    ImageUpload::new(name, Some("image/png"), bytes).unwrap()
}

#[tokio::test]
async fn test_reload_redirects_appraisals_to_new_classifier() {
    let old_server = MockServer::start_async().await;
    old_server
        .mock_async(|when, then| {
            when.method(POST).path("/predict/");
            then.status(503).body("decommissioned");
        })
        .await;

    let new_server = MockServer::start_async().await;
    let new_mock = new_server
        .mock_async(|when, then| {
            when.method(POST).path("/predict/");
            then.status(200).json_body(json!({
                "name": "Armchair",
                "description": "Velvet, green",
                "label": "armchair",
                "confidence": 0.5
            }));
        })
        .await;

    let mut config = Config::default();
    config.classifier.base_url = old_server.base_url();
    let state = AppState::from_config(config);

    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[classifier]\nbase_url = \"{}\"\ntimeout_seconds = 5",
        new_server.base_url()
    )
    .unwrap();

    let reloadable = Reloadable {
        config_path: file.path().to_path_buf(),
        config: state.config.clone(),
        estimator: state.estimator.clone(),
        classifier: state.classifier.clone(),
    };
    reload_config(&reloadable).unwrap();

    let outcome = state
        .appraiser
        .appraise_one(png_upload("chair.png"), Condition::New)
        .await;
    new_mock.assert_async().await;

    match outcome {
        AppraisalOutcome::Completed { appraisal, .. } => {
            assert_eq!(appraisal.name, "Armchair");
            // furniture 0.5 -> 50500
            assert_eq!(appraisal.breakdown.get("final_price"), Some(&json!(50500)));
        }
        AppraisalOutcome::Failed { error, .. } => panic!("Expected completion, got {}", error),
    }

    let router = create_router(state, None, 1024 * 1024);
    let response = router
        .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let ready: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        ready["classifier_url"],
        format!("{}/predict/", new_server.base_url())
    );
}
