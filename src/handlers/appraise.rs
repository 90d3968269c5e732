use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use serde::Serialize;

use crate::{
    appraisal::AppraisalOutcome, error::AppError, handlers::AppState, image_utils::ImageUpload,
    pricing::Condition,
};

#[derive(Debug, Serialize)]
pub struct AppraiseResponse {
    pub condition: String,
    pub completed: usize,
    pub failed: usize,
    pub results: Vec<AppraisalOutcome>,
}

/// POST /api/appraise - multipart upload of one or more `file` parts plus `condition`
///
/// Each image is appraised on its own; an invalid or failed image is reported
/// in its slot and the rest of the batch continues.
pub async fn handle_appraise(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AppraiseResponse>, AppError> {
    let mut condition = None;
    let mut uploads: Vec<Result<ImageUpload, (String, AppError)>> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InputFormat(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("condition") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::InputFormat(format!("Invalid condition field: {}", e)))?;
                condition = Some(text);
            }
            Some("file") | Some("files") => uploads.push(read_upload(field).await),
            other => {
                tracing::debug!(field = ?other, "Ignoring unknown multipart field");
            }
        }
    }

    if uploads.is_empty() {
        return Err(AppError::InputFormat("No image files uploaded".to_string()));
    }

    let condition: Condition = condition
        .as_deref()
        .unwrap_or(Condition::New.as_str())
        .parse()?;

    tracing::info!(
        images = uploads.len(),
        condition = %condition,
        "Handling appraisal request"
    );

    let mut results = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let outcome = match upload {
            Ok(upload) => state.appraiser.appraise_one(upload, condition).await,
            Err((file_name, e)) => AppraisalOutcome::failed(file_name, &e),
        };
        results.push(outcome);
    }

    let completed = results.iter().filter(|r| r.is_completed()).count();

    Ok(Json(AppraiseResponse {
        condition: condition.as_str().to_string(),
        completed,
        failed: results.len() - completed,
        results,
    }))
}

async fn read_upload(field: Field<'_>) -> Result<ImageUpload, (String, AppError)> {
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let content_type = field.content_type().map(str::to_string);

    let bytes = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            let err = AppError::InputFormat(format!("Failed to read upload: {}", e));
            return Err((file_name, err));
        }
    };

    ImageUpload::new(file_name.clone(), content_type.as_deref(), bytes.to_vec())
        .map_err(|e| (file_name, e))
}
