pub mod catalog;
pub mod estimator;
pub mod input;
pub mod models;

pub use catalog::{normalize_label, PriceCatalog};
pub use estimator::{PriceEstimator, LUXURY_BOOST, LUXURY_CONFIDENCE_THRESHOLD};
pub use input::{parse_confidence, parse_confidence_value};
pub use models::{CategoryResolution, Condition, PriceBreakdown, PriceRange};
