//! Estimation config types.
//!
//! The config is an external JSON document (static asset or config service),
//! one numeric rule table per category. It is validated once at load time
//! (see [`super::validator`]) and treated as immutable for the duration of a
//! matching run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::category::CategoryKey;

/// Versioned, per-category rule table driving all estimators
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationConfig {
    /// Config document version, used for cache invalidation
    pub version: String,

    /// Category key -> numeric rules. Keys are canonical category strings
    /// (`hvac`, `dehumidification`, ..., `general`).
    pub categories: HashMap<String, CategoryRules>,

    /// Tunable relevance weighting for the product matcher
    #[serde(default)]
    pub matching: MatchingWeights,

    /// Optional override of the mapper's keyword tie-break order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_priority: Option<Vec<CategoryKey>>,
}

impl EstimationConfig {
    /// Rules for a category key, if configured
    pub fn rules(&self, key: CategoryKey) -> Option<&CategoryRules> {
        self.categories.get(key.as_str())
    }
}

/// Numeric rules for one product category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRules {
    /// Price floor for the category, in dollars
    pub base_price: f64,
    /// Dollars added per capacity unit
    pub capacity_coefficient: f64,
    /// Price premium for ENERGY STAR certification
    pub efficiency_premium: f64,
    /// Price premium for "Most Efficient" designation
    pub most_efficient_premium: f64,
    /// Capacity assumed when a product does not state one
    pub default_capacity: f64,
    /// Reference consumption curve for a standard (inefficient) unit
    pub standard_consumption: ConsumptionCurve,
    /// Consumption multipliers by certification tier
    pub efficiency_factors: EfficiencyFactors,
    /// Regional electricity rate, dollars per kWh
    pub electricity_rate: f64,
    /// Completeness-score cutoffs for confidence labeling
    pub confidence_thresholds: ConfidenceThresholds,
}

/// Linear reference curve: `standard_kwh = base_kwh + kwh_per_unit * capacity`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionCurve {
    pub base_kwh: f64,
    pub kwh_per_unit: f64,
}

impl ConsumptionCurve {
    pub fn standard_kwh(&self, capacity: f64) -> f64 {
        self.base_kwh + self.kwh_per_unit * capacity
    }
}

/// Multipliers applied to standard consumption, by certification tier.
/// All factors live in (0, 1]; lower means more efficient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyFactors {
    /// Uncertified replacement unit
    pub baseline: f64,
    /// ENERGY STAR certified
    pub energy_star: f64,
    /// ENERGY STAR Most Efficient
    pub most_efficient: f64,
}

/// Cutoffs applied to the attribute-completeness score. Must satisfy
/// `0 < low < medium < high <= 1`; violation is a config validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceThresholds {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

/// Relevance weighting for the product matcher.
///
/// The exact weights are a tunable deployment parameter, not a fixed law;
/// the defaults favor category exactness over feature overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingWeights {
    /// Weight of matching the recommendation's category exactly
    pub category_exactness: f64,
    /// Weight of keyword overlap between recommendation text and product
    /// name/features
    pub feature_overlap: f64,
    /// Scale applied to the exactness weight when the candidate pool was
    /// widened to the general category
    pub widened_pool_scale: f64,
}

impl Default for MatchingWeights {
    fn default() -> Self {
        Self {
            category_exactness: 0.6,
            feature_overlap: 0.4,
            widened_pool_scale: 0.5,
        }
    }
}
