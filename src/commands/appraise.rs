use anyhow::Result;
use arc_swap::ArcSwap;
use colored::Colorize;
use price_estimator::{
    appraisal::{AppraisalOutcome, Appraiser},
    classifier::ClassifierClient,
    config,
    error::AppError,
    history::HistoryStore,
    image_utils::ImageUpload,
    pricing::{Condition, PriceEstimator},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Execute the appraise command
///
/// Each file is sent to the classifier separately; failures are reported
/// per file and do not stop the rest.
pub async fn execute(
    config_path: &Path,
    files: Vec<PathBuf>,
    condition: &str,
    api_url: Option<String>,
) -> Result<()> {
    let mut cfg = config::load_config(config_path)?;
    if let Some(url) = api_url {
        cfg.classifier.base_url = url;
        config::validate_config(&cfg)?;
    }

    let condition: Condition = condition.parse()?;
    let classifier = ClassifierClient::new(reqwest::Client::new(), &cfg.classifier);
    info!(url = %classifier.predict_url(), files = files.len(), "Appraising images");

    let appraiser = Appraiser::new(
        Arc::new(ArcSwap::from_pointee(classifier)),
        Arc::new(ArcSwap::from_pointee(PriceEstimator::new(cfg.pricing.clone()))),
        Arc::new(HistoryStore::new(files.len().max(1))),
    );

    let mut completed = 0;
    for path in &files {
        println!("{} {}", "Analyzing".yellow(), path.display());

        let outcome = match read_upload(path).await {
            Ok(upload) => appraiser.appraise_one(upload, condition).await,
            Err(e) => AppraisalOutcome::failed(path.display().to_string(), &e),
        };

        match outcome {
            AppraisalOutcome::Completed { rendered, .. } => {
                completed += 1;
                println!("{}", "Analysis completed successfully!".green());
                println!("{}", rendered);
            }
            AppraisalOutcome::Failed { error, .. } => {
                println!("{} {}", "Error:".red().bold(), error);
            }
        }
        println!();
    }

    println!(
        "{} {}/{} images appraised",
        "Summary:".bold(),
        completed,
        files.len()
    );

    if completed == 0 {
        anyhow::bail!("No images could be appraised");
    }

    Ok(())
}

async fn read_upload(path: &Path) -> Result<ImageUpload, AppError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::InvalidImage(format!("Cannot read {}: {}", path.display(), e)))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    ImageUpload::new(file_name, None, bytes)
}
