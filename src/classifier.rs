use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{Duration, Instant};

use crate::{
    config::ClassifierConfig, error::AppError, image_utils::ImageUpload, metrics,
    pricing::Condition,
};

/// Body returned by the classifier's predict endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierResponse {
    pub name: String,
    pub description: String,
    /// Breakdown computed by the classifier service, if it priced the item itself
    #[serde(default)]
    pub breakdown: Option<Map<String, Value>>,
    /// Raw label, used to price locally when no breakdown is returned
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub confidence: Option<Value>,
}

/// HTTP client for the remote image classifier
#[derive(Debug, Clone)]
pub struct ClassifierClient {
    http: Client,
    predict_url: String,
    timeout: Duration,
}

impl ClassifierClient {
    pub fn new(http: Client, config: &ClassifierConfig) -> Self {
        Self {
            http,
            predict_url: config.predict_url(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    /// Same HTTP client, new target and timeout
    pub fn reconfigured(&self, config: &ClassifierConfig) -> Self {
        Self::new(self.http.clone(), config)
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }

    /// Send one image and its condition to the classifier
    ///
    /// Any transport failure or non-success status is returned as an error;
    /// there is no retry.
    pub async fn predict(
        &self,
        upload: &ImageUpload,
        condition: Condition,
    ) -> Result<ClassifierResponse, AppError> {
        let start = Instant::now();
        let result = self.send(upload, condition).await;

        metrics::record_classifier_request(outcome_label(&result), start.elapsed());

        result
    }

    async fn send(
        &self,
        upload: &ImageUpload,
        condition: Condition,
    ) -> Result<ClassifierResponse, AppError> {
        let file = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)?;

        let form = Form::new()
            .part("file", file)
            .text("condition", condition.as_str());

        tracing::debug!(
            url = %self.predict_url,
            file = %upload.file_name,
            bytes = upload.bytes.len(),
            condition = %condition,
            "Sending image to classifier"
        );

        let response = self
            .http
            .post(&self.predict_url)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::UpstreamStatus { status, message });
        }

        Ok(response.json::<ClassifierResponse>().await?)
    }
}

/// Metric label for a classifier round trip
fn outcome_label(result: &Result<ClassifierResponse, AppError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(AppError::UpstreamStatus { .. }) => "upstream_status",
        Err(e) if e.is_transport() => "transport_error",
        Err(_) => "error",
    }
}
