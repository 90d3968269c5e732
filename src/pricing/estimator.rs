use tracing::{debug, warn};

use crate::pricing::catalog::PriceCatalog;
use crate::pricing::models::{CategoryResolution, Condition, PriceBreakdown};

/// Confidence above which luxury categories get boosted
pub const LUXURY_CONFIDENCE_THRESHOLD: f64 = 0.9;
/// Multiplier applied by the luxury boost
pub const LUXURY_BOOST: f64 = 1.2;

const BOOSTED_LABEL: &str = "+20%";
const UNBOOSTED_LABEL: &str = "0%";

/// Deterministic price estimator over a static catalog
#[derive(Debug, Clone, Default)]
pub struct PriceEstimator {
    catalog: PriceCatalog,
}

/// Price before the condition adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BasePrice {
    interpolated: i64,
    boosted: i64,
    luxury_boost: bool,
}

impl PriceEstimator {
    pub fn new(catalog: PriceCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    pub fn resolve(&self, label: &str) -> CategoryResolution<'_> {
        self.catalog.resolve(label)
    }

    /// Interpolated price for a label, including the luxury boost
    pub fn estimate_price(&self, label: &str, confidence: f64) -> i64 {
        self.base_price(self.resolve(label), confidence).boosted
    }

    /// Full breakdown for a label, confidence and condition name
    ///
    /// A condition name outside New / Used / Heavily Used applies no
    /// adjustment; the breakdown echoes the name as given.
    pub fn estimate(&self, label: &str, confidence: f64, condition: &str) -> PriceBreakdown {
        match condition.parse::<Condition>() {
            Ok(parsed) => self.estimate_with(label, confidence, parsed),
            Err(_) => {
                warn!(
                    condition = %condition,
                    "Unrecognized condition, applying no adjustment"
                );
                let mut breakdown = self.estimate_with(label, confidence, Condition::New);
                breakdown.condition = condition.to_string();
                breakdown
            }
        }
    }

    /// Full breakdown for an already-parsed condition
    pub fn estimate_with(&self, label: &str, confidence: f64, condition: Condition) -> PriceBreakdown {
        let resolution = self.resolve(label);
        let base = self.base_price(resolution, confidence);

        let price_after_condition =
            truncate_price(base.boosted as f64 * (1.0 + condition.adjustment_pct()));

        debug!(
            label = %label,
            category = resolution.category().unwrap_or("fallback"),
            confidence = confidence,
            base_price = base.interpolated,
            luxury_boost = base.luxury_boost,
            condition = %condition,
            price_after_condition = price_after_condition,
            "Estimated price"
        );

        PriceBreakdown {
            confidence: confidence_percent(confidence),
            base_price: base.interpolated,
            condition: condition.as_str().to_string(),
            condition_adjustment: condition.adjustment_label().to_string(),
            price_after_condition,
            confidence_adjustment: if base.luxury_boost {
                BOOSTED_LABEL.to_string()
            } else {
                UNBOOSTED_LABEL.to_string()
            },
            final_price: price_after_condition,
        }
    }

    fn base_price(&self, resolution: CategoryResolution<'_>, confidence: f64) -> BasePrice {
        match resolution {
            CategoryResolution::Resolved { category, range } => {
                let interpolated = truncate_price(range.interpolate(confidence));
                let luxury_boost =
                    self.catalog.is_luxury(category) && confidence > LUXURY_CONFIDENCE_THRESHOLD;
                let boosted = if luxury_boost {
                    truncate_price(interpolated as f64 * LUXURY_BOOST)
                } else {
                    interpolated
                };

                BasePrice {
                    interpolated,
                    boosted,
                    luxury_boost,
                }
            }
            CategoryResolution::Fallback => {
                let interpolated = truncate_price(self.catalog.fallback_range().interpolate(confidence));
                BasePrice {
                    interpolated,
                    boosted: interpolated,
                    luxury_boost: false,
                }
            }
        }
    }
}

/// Truncate toward zero; prices never go below zero
fn truncate_price(value: f64) -> i64 {
    (value.trunc() as i64).max(0)
}

fn confidence_percent(confidence: f64) -> f64 {
    (confidence * 10_000.0).round() / 100.0
}
