use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    classifier::{ClassifierClient, ClassifierResponse},
    error::AppError,
    history::HistoryStore,
    image_utils::ImageUpload,
    metrics,
    pricing::{parse_confidence_value, Condition, PriceBreakdown, PriceEstimator},
    render,
};

/// Result of one classifier round trip for one image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appraisal {
    pub id: Uuid,
    pub file_name: String,
    pub name: String,
    pub description: String,
    pub condition: String,
    /// Breakdown fields as received; rendered with placeholders for gaps
    pub breakdown: Map<String, Value>,
    /// True when the breakdown was computed here from the raw label
    pub priced_locally: bool,
    pub created_at: DateTime<Utc>,
}

/// Per-image outcome of a batch
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AppraisalOutcome {
    Completed {
        history_number: u64,
        appraisal: Appraisal,
        rendered: String,
    },
    Failed {
        file_name: String,
        error: String,
        error_type: String,
    },
}

impl AppraisalOutcome {
    pub fn failed(file_name: impl Into<String>, error: &AppError) -> Self {
        Self::Failed {
            file_name: file_name.into(),
            error: error.to_string(),
            error_type: error.type_name().to_string(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Drives uploads through the classifier and records results
#[derive(Clone)]
pub struct Appraiser {
    classifier: Arc<ArcSwap<ClassifierClient>>,
    estimator: Arc<ArcSwap<PriceEstimator>>,
    history: Arc<HistoryStore>,
}

impl Appraiser {
    pub fn new(
        classifier: Arc<ArcSwap<ClassifierClient>>,
        estimator: Arc<ArcSwap<PriceEstimator>>,
        history: Arc<HistoryStore>,
    ) -> Self {
        Self {
            classifier,
            estimator,
            history,
        }
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    /// The classifier client currently in use
    pub fn classifier(&self) -> Arc<ClassifierClient> {
        self.classifier.load_full()
    }

    /// Appraise a single image without recording it
    pub async fn appraise(
        &self,
        upload: &ImageUpload,
        condition: Condition,
    ) -> Result<Appraisal, AppError> {
        let classifier = self.classifier();
        let response = classifier.predict(upload, condition).await?;
        let estimator = self.estimator.load_full();
        let (breakdown, priced_locally) = resolve_breakdown(&estimator, &response, condition)?;

        Ok(Appraisal {
            id: Uuid::new_v4(),
            file_name: upload.file_name.clone(),
            name: response.name,
            description: response.description,
            condition: condition.as_str().to_string(),
            breakdown,
            priced_locally,
            created_at: Utc::now(),
        })
    }

    /// Appraise one image and record it in history on success
    pub async fn appraise_one(&self, upload: ImageUpload, condition: Condition) -> AppraisalOutcome {
        match self.appraise(&upload, condition).await {
            Ok(appraisal) => {
                let rendered = render::render_appraisal(&appraisal);
                let history_number = self
                    .history
                    .push(appraisal.clone(), upload.mime_type.clone(), upload.to_data_url())
                    .await;

                info!(
                    file = %upload.file_name,
                    name = %appraisal.name,
                    history_number = history_number,
                    "Appraisal completed"
                );

                AppraisalOutcome::Completed {
                    history_number,
                    appraisal,
                    rendered,
                }
            }
            Err(e) => {
                warn!(file = %upload.file_name, error = %e, "Appraisal failed");
                AppraisalOutcome::failed(upload.file_name, &e)
            }
        }
    }

    /// Appraise each image independently; one failure never stops the rest
    pub async fn appraise_batch(
        &self,
        uploads: Vec<ImageUpload>,
        condition: Condition,
    ) -> Vec<AppraisalOutcome> {
        let mut outcomes = Vec::with_capacity(uploads.len());
        for upload in uploads {
            outcomes.push(self.appraise_one(upload, condition).await);
        }
        outcomes
    }
}

/// Pick the breakdown to display for a classifier response
///
/// The classifier's own breakdown wins. Without one, a raw label and
/// confidence are priced here; with neither, the breakdown is empty and
/// renders as placeholders.
pub fn resolve_breakdown(
    estimator: &PriceEstimator,
    response: &ClassifierResponse,
    condition: Condition,
) -> Result<(Map<String, Value>, bool), AppError> {
    if let Some(breakdown) = &response.breakdown {
        return Ok((breakdown.clone(), false));
    }

    let (Some(label), Some(raw_confidence)) = (&response.label, &response.confidence) else {
        return Ok((Map::new(), false));
    };

    let confidence = parse_confidence_value(raw_confidence)?;
    let breakdown = estimator.estimate_with(label, confidence, condition);
    metrics::record_estimate(
        estimator.resolve(label).category().unwrap_or("fallback"),
        condition.as_str(),
    );

    Ok((breakdown_map(&breakdown)?, true))
}

fn breakdown_map(breakdown: &PriceBreakdown) -> Result<Map<String, Value>, AppError> {
    let value = serde_json::to_value(breakdown)
        .map_err(|e| AppError::Internal(format!("Failed to serialize breakdown: {}", e)))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Internal(format!(
            "Breakdown serialized to a non-object: {}",
            other
        ))),
    }
}
