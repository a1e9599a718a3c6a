//! Fallback estimator for the `general` category.
//!
//! Recommendations that map to no specific category land here, so the
//! meaning of a product's capacity figure is unverifiable. A supplied
//! capacity is still used, but confidence is capped at medium; a missing
//! one follows the usual assumed-capacity path.

use crate::category::CategoryKey;
use crate::config::CategoryRules;
use crate::estimate::estimator::{estimate_with_rules, CertificationPolicy, Estimator};
use crate::types::{ConfidenceLevel, EstimateResult, ProductAttributes};

pub struct GeneralEstimator {
    rules: CategoryRules,
}

impl GeneralEstimator {
    pub fn new(rules: CategoryRules) -> Self {
        Self { rules }
    }
}

impl Estimator for GeneralEstimator {
    fn category(&self) -> CategoryKey {
        CategoryKey::General
    }

    fn estimate(&self, attributes: &ProductAttributes) -> EstimateResult {
        let mut result = estimate_with_rules(&self.rules, attributes, CertificationPolicy::Full);
        if result.confidence_level == ConfidenceLevel::High {
            result.confidence_level = ConfidenceLevel::Medium;
        }
        result
    }
}
