use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Declared condition of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "New")]
    New,
    #[serde(rename = "Used")]
    Used,
    #[serde(rename = "Heavily Used")]
    HeavilyUsed,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::New, Condition::Used, Condition::HeavilyUsed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::Used => "Used",
            Condition::HeavilyUsed => "Heavily Used",
        }
    }

    /// Percentage applied to the base price (0.0, -0.25, -0.5)
    pub fn adjustment_pct(&self) -> f64 {
        match self {
            Condition::New => 0.0,
            Condition::Used => -0.25,
            Condition::HeavilyUsed => -0.5,
        }
    }

    /// Display form of the adjustment, as recorded in the breakdown
    pub fn adjustment_label(&self) -> &'static str {
        match self {
            Condition::New => "0%",
            Condition::Used => "-25%",
            Condition::HeavilyUsed => "-50%",
        }
    }
}

impl FromStr for Condition {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "new" => Ok(Condition::New),
            "used" => Ok(Condition::Used),
            "heavily used" => Ok(Condition::HeavilyUsed),
            _ => Err(AppError::InputFormat(format!(
                "Unknown condition '{}': expected one of New, Used, Heavily Used",
                s
            ))),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive price range of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

impl PriceRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Linear interpolation inside the range, before truncation
    pub fn interpolate(&self, confidence: f64) -> f64 {
        self.min as f64 + (self.max as f64 - self.min as f64) * confidence
    }

    pub fn contains(&self, price: i64) -> bool {
        price >= 0 && (self.min..=self.max).contains(&(price as u64))
    }
}

/// Outcome of looking a classifier label up in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryResolution<'a> {
    Resolved { category: &'a str, range: PriceRange },
    Fallback,
}

impl CategoryResolution<'_> {
    pub fn category(&self) -> Option<&str> {
        match self {
            CategoryResolution::Resolved { category, .. } => Some(category),
            CategoryResolution::Fallback => None,
        }
    }
}

/// Auditable explanation of how a final price was derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Classifier confidence as a percentage
    pub confidence: f64,
    pub base_price: i64,
    pub condition: String,
    pub condition_adjustment: String,
    pub price_after_condition: i64,
    pub confidence_adjustment: String,
    pub final_price: i64,
}
