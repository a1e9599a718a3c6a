//! # enermatch
//!
//! Recommendation-to-product matching and financial estimation engine for
//! energy-audit storefronts.
//!
//! Given a snapshot of audit recommendations, a product catalog, user
//! category preferences, and a versioned estimation config, the engine
//! filters recommendations, matches each to candidate products, and computes
//! the savings/ROI/payback/confidence figures used to justify a purchase.
//! Everything is pure, synchronous computation: the engine holds no state
//! across runs beyond the explicitly-invalidated [`config::ConfigCache`],
//! and independent runs may execute concurrently against the same config.
//!
//! ```no_run
//! use enermatch::config::ConfigLoader;
//! use enermatch::MatchOrchestrator;
//! use std::sync::Arc;
//!
//! # fn main() -> enermatch::Result<()> {
//! let config = Arc::new(ConfigLoader::new().with_file("estimation.json").load()?);
//! let orchestrator = MatchOrchestrator::new(config);
//! # let (recommendations, products) = (Vec::new(), Vec::new());
//! let matches = orchestrator.run(&recommendations, &products, &[], Some(1500.0))?;
//! # Ok(())
//! # }
//! ```

pub mod category;
pub mod config;
pub mod error;
pub mod estimate;
pub mod filter;
pub mod logging;
pub mod matcher;
pub mod orchestrator;
pub mod types;

pub use category::{CategoryKey, CategoryMapper};
pub use error::{ConfigValidationError, EngineError, Result};
pub use estimate::{Estimator, EstimatorFactory};
pub use filter::RecommendationFilter;
pub use matcher::ProductMatcher;
pub use orchestrator::MatchOrchestrator;
pub use types::{
    ConfidenceLevel, EstimateResult, MatchReport, PaybackPeriod, Product,
    ProductRecommendationMatch, RankedProduct, Recommendation,
};
