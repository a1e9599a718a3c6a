//! Estimator for capacity-rated appliances (dehumidifiers, HVAC units,
//! water heaters). Reads both certification flags; capacity comes straight
//! from the catalog spec (pints/day, BTU/h, gallons).

use crate::category::CategoryKey;
use crate::config::CategoryRules;
use crate::estimate::estimator::{estimate_with_rules, CertificationPolicy, Estimator};
use crate::types::{EstimateResult, ProductAttributes};

pub struct CapacityApplianceEstimator {
    category: CategoryKey,
    rules: CategoryRules,
}

impl CapacityApplianceEstimator {
    pub fn new(category: CategoryKey, rules: CategoryRules) -> Self {
        Self { category, rules }
    }
}

impl Estimator for CapacityApplianceEstimator {
    fn category(&self) -> CategoryKey {
        self.category
    }

    fn estimate(&self, attributes: &ProductAttributes) -> EstimateResult {
        estimate_with_rules(&self.rules, attributes, CertificationPolicy::Full)
    }
}
