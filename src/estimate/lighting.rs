//! Estimator for lighting products. Lumen-rated; the Most Efficient
//! designation does not exist for this category, so only the ENERGY STAR
//! flag participates in pricing and consumption.

use crate::category::CategoryKey;
use crate::config::CategoryRules;
use crate::estimate::estimator::{estimate_with_rules, CertificationPolicy, Estimator};
use crate::types::{EstimateResult, ProductAttributes};

pub struct LightingEstimator {
    rules: CategoryRules,
}

impl LightingEstimator {
    pub fn new(rules: CategoryRules) -> Self {
        Self { rules }
    }
}

impl Estimator for LightingEstimator {
    fn category(&self) -> CategoryKey {
        CategoryKey::Lighting
    }

    fn estimate(&self, attributes: &ProductAttributes) -> EstimateResult {
        estimate_with_rules(&self.rules, attributes, CertificationPolicy::EnergyStarOnly)
    }
}
