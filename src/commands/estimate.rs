use anyhow::Result;
use colored::Colorize;
use price_estimator::{
    config,
    error::AppError,
    pricing::{parse_confidence, Condition, PriceBreakdown, PriceEstimator},
    render,
};
use std::path::Path;

/// Execute the estimate command
///
/// Prices a label with the configured tables, no classifier involved.
pub fn execute(
    config_path: &Path,
    label: &str,
    confidence: &str,
    condition: &str,
    json: bool,
) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let estimator = PriceEstimator::new(cfg.pricing);

    let breakdown = estimate(&estimator, label, confidence, condition)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    let category = estimator
        .resolve(label)
        .category()
        .unwrap_or("fallback range")
        .to_string();

    println!("{} {} ({})", "Label:".bold(), label, category.cyan());
    println!("{}", render::render_price_breakdown(&breakdown));
    Ok(())
}

/// Parse raw CLI input and run the estimator
fn estimate(
    estimator: &PriceEstimator,
    label: &str,
    confidence: &str,
    condition: &str,
) -> Result<PriceBreakdown, AppError> {
    let confidence = parse_confidence(confidence)?;
    let condition: Condition = condition.parse()?;
    Ok(estimator.estimate_with(label, confidence, condition))
}
