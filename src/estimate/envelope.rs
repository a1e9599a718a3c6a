//! Estimator for building-envelope work (insulation, windows). R-value
//! rated; no certification program applies, so savings always follow the
//! category's baseline efficiency factor.

use crate::category::CategoryKey;
use crate::config::CategoryRules;
use crate::estimate::estimator::{estimate_with_rules, CertificationPolicy, Estimator};
use crate::types::{EstimateResult, ProductAttributes};

pub struct EnvelopeEstimator {
    category: CategoryKey,
    rules: CategoryRules,
}

impl EnvelopeEstimator {
    pub fn new(category: CategoryKey, rules: CategoryRules) -> Self {
        Self { category, rules }
    }
}

impl Estimator for EnvelopeEstimator {
    fn category(&self) -> CategoryKey {
        self.category
    }

    fn estimate(&self, attributes: &ProductAttributes) -> EstimateResult {
        estimate_with_rules(&self.rules, attributes, CertificationPolicy::None)
    }
}
