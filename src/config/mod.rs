//! Estimation config: types, loading, validation, and the versioned cache.

pub mod cache;
pub mod loader;
pub mod types;
pub mod validator;

pub use cache::ConfigCache;
pub use loader::ConfigLoader;
pub use types::{
    CategoryRules, ConfidenceThresholds, ConsumptionCurve, EfficiencyFactors, EstimationConfig,
    MatchingWeights,
};
