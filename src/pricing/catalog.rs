use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::pricing::models::{CategoryResolution, PriceRange};

/// Static lookup tables used by the estimator
///
/// Loaded once from the `[pricing]` config section (or the built-in defaults)
/// and swapped wholesale on reload; never mutated in place.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PriceCatalog {
    /// category -> (min_price, max_price)
    pub categories: BTreeMap<String, (u64, u64)>,
    /// classifier label -> category
    pub labels: BTreeMap<String, String>,
    /// categories eligible for the high-confidence boost
    pub luxury_categories: BTreeSet<String>,
    /// range used when a label has no category
    pub fallback: (u64, u64),
}

impl Default for PriceCatalog {
    fn default() -> Self {
        let categories = [
            ("car", (5_000, 2_000_000)),
            ("phone", (3_000, 150_000)),
            ("handbag", (500, 50_000)),
            ("laptop", (10_000, 300_000)),
            ("furniture", (1_000, 100_000)),
            ("watch", (1_000, 1_000_000)),
            ("tv", (5_000, 500_000)),
            ("camera", (2_000, 500_000)),
        ];

        let labels = [
            ("sports_car", "car"),
            ("convertible", "car"),
            ("cellular_telephone", "phone"),
            ("laptop", "laptop"),
            ("handbag", "handbag"),
            ("sofa", "furniture"),
            ("armchair", "furniture"),
            ("digital_watch", "watch"),
            ("tv", "tv"),
            ("camera", "camera"),
        ];

        let luxury = ["car", "handbag", "watch", "laptop", "tv", "camera"];

        Self {
            categories: categories
                .into_iter()
                .map(|(name, range)| (name.to_string(), range))
                .collect(),
            labels: labels
                .into_iter()
                .map(|(label, category)| (label.to_string(), category.to_string()))
                .collect(),
            luxury_categories: luxury.into_iter().map(String::from).collect(),
            fallback: (500, 5_000),
        }
    }
}

impl PriceCatalog {
    /// Resolve a classifier label to its category and range
    ///
    /// Labels are matched case-insensitively, with spaces treated as underscores.
    /// A label whose category has no range takes the fallback path.
    pub fn resolve(&self, label: &str) -> CategoryResolution<'_> {
        let key = normalize_label(label);

        let Some(category) = self.labels.get(&key) else {
            return CategoryResolution::Fallback;
        };

        match self.categories.get_key_value(category) {
            Some((name, &(min, max))) => CategoryResolution::Resolved {
                category: name.as_str(),
                range: PriceRange::new(min, max),
            },
            None => CategoryResolution::Fallback,
        }
    }

    pub fn fallback_range(&self) -> PriceRange {
        PriceRange::new(self.fallback.0, self.fallback.1)
    }

    pub fn is_luxury(&self, category: &str) -> bool {
        self.luxury_categories.contains(category)
    }

    /// Check that every range is well formed
    pub fn validate(&self) -> anyhow::Result<()> {
        for (category, &(min, max)) in &self.categories {
            if min > max {
                anyhow::bail!(
                    "Price range for category '{}' is inverted: min {} > max {}",
                    category,
                    min,
                    max
                );
            }
        }

        if self.fallback.0 > self.fallback.1 {
            anyhow::bail!(
                "Fallback price range is inverted: min {} > max {}",
                self.fallback.0,
                self.fallback.1
            );
        }

        for (label, category) in &self.labels {
            if !self.categories.contains_key(category) {
                tracing::warn!(
                    label = %label,
                    category = %category,
                    "Label maps to a category without a price range, fallback range will be used"
                );
            }
        }

        Ok(())
    }
}

/// Lowercase a label and join words with underscores
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "_")
}
