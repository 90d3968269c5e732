//! Command implementations for the CLI
//!
//! - start: Start the estimator server
//! - estimate: Price a label without the classifier
//! - appraise: Send local images to the classifier
//! - config: Configuration display and validation

pub mod appraise;
pub mod config;
pub mod estimate;
pub mod start;
