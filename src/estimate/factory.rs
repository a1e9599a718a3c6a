//! Estimator dispatch table.
//!
//! Built once at startup from the loaded config: a fixed enumeration of
//! category keys mapped to strategy instances, with `general` as the
//! required fallback entry. Unknown categories are therefore a config
//! error, never a silent miss.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::category::CategoryKey;
use crate::config::EstimationConfig;
use crate::error::{EngineError, Result};
use crate::estimate::capacity::CapacityApplianceEstimator;
use crate::estimate::envelope::EnvelopeEstimator;
use crate::estimate::estimator::Estimator;
use crate::estimate::general::GeneralEstimator;
use crate::estimate::lighting::LightingEstimator;

pub struct EstimatorFactory {
    estimators: HashMap<CategoryKey, Arc<dyn Estimator>>,
}

impl EstimatorFactory {
    /// Build the dispatch table for every category the config covers
    pub fn new(config: &EstimationConfig) -> Self {
        let mut estimators: HashMap<CategoryKey, Arc<dyn Estimator>> = HashMap::new();

        for key in [
            CategoryKey::Hvac,
            CategoryKey::Lighting,
            CategoryKey::Dehumidification,
            CategoryKey::Insulation,
            CategoryKey::Windows,
            CategoryKey::WaterHeating,
            CategoryKey::General,
        ] {
            let Some(rules) = config.rules(key) else {
                continue;
            };
            let rules = rules.clone();
            let estimator: Arc<dyn Estimator> = match key {
                CategoryKey::Hvac
                | CategoryKey::Dehumidification
                | CategoryKey::WaterHeating => {
                    Arc::new(CapacityApplianceEstimator::new(key, rules))
                }
                CategoryKey::Lighting => Arc::new(LightingEstimator::new(rules)),
                CategoryKey::Insulation | CategoryKey::Windows => {
                    Arc::new(EnvelopeEstimator::new(key, rules))
                }
                CategoryKey::General => Arc::new(GeneralEstimator::new(rules)),
            };
            estimators.insert(key, estimator);
        }

        debug!(categories = estimators.len(), "estimator dispatch table built");
        Self { estimators }
    }

    /// Estimator for a category, falling back to `general`.
    ///
    /// The only hard failure in the estimation path: neither the category
    /// nor the fallback is configured, which signals a deployment defect
    /// rather than a data-quality issue.
    pub fn get(&self, category: CategoryKey) -> Result<Arc<dyn Estimator>> {
        self.estimators
            .get(&category)
            .or_else(|| self.estimators.get(&CategoryKey::General))
            .cloned()
            .ok_or_else(|| EngineError::UnknownCategory {
                category: category.as_str().to_string(),
            })
    }
}
