//! Shape validation for estimation config documents.
//!
//! The loader hands the raw JSON document here; validation is a single pure
//! pass that collects **every** violation before failing, producing one
//! aggregated [`ConfigValidationError`] instead of scattered null checks at
//! call sites.

use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::warn;

use super::types::{
    CategoryRules, ConfidenceThresholds, ConsumptionCurve, EfficiencyFactors, EstimationConfig,
    MatchingWeights,
};
use crate::category::CategoryKey;
use crate::error::{ConfigIssue, ConfigValidationError};

/// Validate a raw config document and build the typed config.
///
/// Fails with every offending field listed, not just the first.
pub fn validate_document(doc: &Value) -> Result<EstimationConfig, ConfigValidationError> {
    let mut issues = Vec::new();

    let Some(root) = doc.as_object() else {
        return Err(ConfigValidationError::new(vec![ConfigIssue::new(
            "$",
            "config document must be a JSON object",
        )]));
    };

    let version = match field(root, "version") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(_) => {
            issues.push(ConfigIssue::new("version", "must be a non-empty string"));
            None
        }
        None => {
            issues.push(ConfigIssue::new("version", "missing required field"));
            None
        }
    };

    let mut categories = HashMap::new();
    match field(root, "categories") {
        Some(Value::Object(map)) if !map.is_empty() => {
            // Deterministic issue ordering regardless of document key order.
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                let path = format!("categories.{key}");
                if CategoryKey::from_tag(key).is_none() {
                    warn!(category = %key, "config entry for unrecognized category key");
                }
                match &map[key] {
                    Value::Object(entry) => {
                        if let Some(rules) = category_rules(&path, entry, &mut issues) {
                            categories.insert(key.clone(), rules);
                        }
                    }
                    _ => issues.push(ConfigIssue::new(path, "must be an object of numeric rules")),
                }
            }
        }
        Some(Value::Object(_)) => {
            issues.push(ConfigIssue::new(
                "categories",
                "at least one category must be configured",
            ));
        }
        Some(_) => issues.push(ConfigIssue::new("categories", "must be an object")),
        None => issues.push(ConfigIssue::new("categories", "missing required field")),
    }

    let matching = matching_weights(root, &mut issues);
    let category_priority = category_priority(root, &mut issues);

    if !issues.is_empty() {
        return Err(ConfigValidationError::new(issues));
    }

    Ok(EstimationConfig {
        // Guarded above: issues is empty, so version was extracted.
        version: version.unwrap_or_default(),
        categories,
        matching,
        category_priority,
    })
}

fn category_rules(
    path: &str,
    entry: &Map<String, Value>,
    issues: &mut Vec<ConfigIssue>,
) -> Option<CategoryRules> {
    let base_price = require_non_negative(entry, path, "basePrice", issues);
    let capacity_coefficient = require_non_negative(entry, path, "capacityCoefficient", issues);
    let efficiency_premium = require_non_negative(entry, path, "efficiencyPremium", issues);
    let most_efficient_premium =
        require_non_negative(entry, path, "mostEfficientPremium", issues);
    let default_capacity = require_non_negative(entry, path, "defaultCapacity", issues);
    let electricity_rate = require_non_negative(entry, path, "electricityRate", issues);
    let standard_consumption = consumption_curve(entry, path, issues);
    let efficiency_factors = efficiency_factors(entry, path, issues);
    let confidence_thresholds = confidence_thresholds(entry, path, issues);

    Some(CategoryRules {
        base_price: base_price?,
        capacity_coefficient: capacity_coefficient?,
        efficiency_premium: efficiency_premium?,
        most_efficient_premium: most_efficient_premium?,
        default_capacity: default_capacity?,
        standard_consumption: standard_consumption?,
        efficiency_factors: efficiency_factors?,
        electricity_rate: electricity_rate?,
        confidence_thresholds: confidence_thresholds?,
    })
}

fn consumption_curve(
    entry: &Map<String, Value>,
    path: &str,
    issues: &mut Vec<ConfigIssue>,
) -> Option<ConsumptionCurve> {
    let path = format!("{path}.standardConsumption");
    match field(entry, "standardConsumption") {
        Some(Value::Object(obj)) => {
            let base_kwh = require_non_negative(obj, &path, "baseKwh", issues);
            let kwh_per_unit = require_non_negative(obj, &path, "kwhPerUnit", issues);
            Some(ConsumptionCurve {
                base_kwh: base_kwh?,
                kwh_per_unit: kwh_per_unit?,
            })
        }
        Some(_) => {
            issues.push(ConfigIssue::new(path, "must be an object"));
            None
        }
        None => {
            issues.push(ConfigIssue::new(path, "missing required field"));
            None
        }
    }
}

fn efficiency_factors(
    entry: &Map<String, Value>,
    path: &str,
    issues: &mut Vec<ConfigIssue>,
) -> Option<EfficiencyFactors> {
    let path = format!("{path}.efficiencyFactors");
    match field(entry, "efficiencyFactors") {
        Some(Value::Object(obj)) => {
            let baseline = require_fraction(obj, &path, "baseline", issues);
            let energy_star = require_fraction(obj, &path, "energyStar", issues);
            let most_efficient = require_fraction(obj, &path, "mostEfficient", issues);
            Some(EfficiencyFactors {
                baseline: baseline?,
                energy_star: energy_star?,
                most_efficient: most_efficient?,
            })
        }
        Some(_) => {
            issues.push(ConfigIssue::new(path, "must be an object"));
            None
        }
        None => {
            issues.push(ConfigIssue::new(path, "missing required field"));
            None
        }
    }
}

fn confidence_thresholds(
    entry: &Map<String, Value>,
    path: &str,
    issues: &mut Vec<ConfigIssue>,
) -> Option<ConfidenceThresholds> {
    let path = format!("{path}.confidenceThresholds");
    match field(entry, "confidenceThresholds") {
        Some(Value::Object(obj)) => {
            let low = require_fraction(obj, &path, "low", issues);
            let medium = require_fraction(obj, &path, "medium", issues);
            let high = require_fraction(obj, &path, "high", issues);
            let thresholds = ConfidenceThresholds {
                low: low?,
                medium: medium?,
                high: high?,
            };
            if !(thresholds.low < thresholds.medium && thresholds.medium < thresholds.high) {
                issues.push(ConfigIssue::new(
                    path,
                    "thresholds must be strictly increasing (low < medium < high)",
                ));
                return None;
            }
            Some(thresholds)
        }
        Some(_) => {
            issues.push(ConfigIssue::new(path, "must be an object"));
            None
        }
        None => {
            issues.push(ConfigIssue::new(path, "missing required field"));
            None
        }
    }
}

fn matching_weights(root: &Map<String, Value>, issues: &mut Vec<ConfigIssue>) -> MatchingWeights {
    let defaults = MatchingWeights::default();
    match field(root, "matching") {
        Some(Value::Object(obj)) => {
            let category_exactness = optional_non_negative(
                obj,
                "matching",
                "categoryExactness",
                defaults.category_exactness,
                issues,
            );
            let feature_overlap = optional_non_negative(
                obj,
                "matching",
                "featureOverlap",
                defaults.feature_overlap,
                issues,
            );
            let widened_pool_scale = optional_non_negative(
                obj,
                "matching",
                "widenedPoolScale",
                defaults.widened_pool_scale,
                issues,
            );
            MatchingWeights {
                category_exactness,
                feature_overlap,
                widened_pool_scale,
            }
        }
        Some(_) => {
            issues.push(ConfigIssue::new("matching", "must be an object"));
            defaults
        }
        None => defaults,
    }
}

fn category_priority(
    root: &Map<String, Value>,
    issues: &mut Vec<ConfigIssue>,
) -> Option<Vec<CategoryKey>> {
    match field(root, "categoryPriority") {
        Some(Value::Array(entries)) => {
            let mut order = Vec::with_capacity(entries.len());
            for (i, entry) in entries.iter().enumerate() {
                match entry.as_str().and_then(CategoryKey::from_tag) {
                    Some(key) => order.push(key),
                    None => issues.push(ConfigIssue::new(
                        format!("categoryPriority[{i}]"),
                        "not a recognized category key",
                    )),
                }
            }
            Some(order)
        }
        Some(_) => {
            issues.push(ConfigIssue::new(
                "categoryPriority",
                "must be an array of category keys",
            ));
            None
        }
        None => None,
    }
}

/// Field lookup tolerant of lowercased keys. The `config` crate's layering
/// can fold keys to lowercase, so `basePrice` may arrive as `baseprice`.
fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    obj.get(name)
        .or_else(|| obj.get(name.to_ascii_lowercase().as_str()))
}

fn require_number(
    obj: &Map<String, Value>,
    path: &str,
    name: &str,
    issues: &mut Vec<ConfigIssue>,
) -> Option<f64> {
    match field(obj, name) {
        Some(value) => match value.as_f64() {
            Some(n) if n.is_finite() => Some(n),
            _ => {
                issues.push(ConfigIssue::new(
                    format!("{path}.{name}"),
                    "must be a finite number",
                ));
                None
            }
        },
        None => {
            issues.push(ConfigIssue::new(
                format!("{path}.{name}"),
                "missing required numeric field",
            ));
            None
        }
    }
}

fn require_non_negative(
    obj: &Map<String, Value>,
    path: &str,
    name: &str,
    issues: &mut Vec<ConfigIssue>,
) -> Option<f64> {
    let n = require_number(obj, path, name, issues)?;
    if n < 0.0 {
        issues.push(ConfigIssue::new(
            format!("{path}.{name}"),
            "must not be negative",
        ));
        return None;
    }
    Some(n)
}

/// A number in (0, 1], used for efficiency factors and confidence thresholds
fn require_fraction(
    obj: &Map<String, Value>,
    path: &str,
    name: &str,
    issues: &mut Vec<ConfigIssue>,
) -> Option<f64> {
    let n = require_number(obj, path, name, issues)?;
    if n <= 0.0 || n > 1.0 {
        issues.push(ConfigIssue::new(
            format!("{path}.{name}"),
            "must be in (0, 1]",
        ));
        return None;
    }
    Some(n)
}

fn optional_non_negative(
    obj: &Map<String, Value>,
    path: &str,
    name: &str,
    default: f64,
    issues: &mut Vec<ConfigIssue>,
) -> f64 {
    match field(obj, name) {
        Some(value) => match value.as_f64() {
            Some(n) if n.is_finite() && n >= 0.0 => n,
            _ => {
                issues.push(ConfigIssue::new(
                    format!("{path}.{name}"),
                    "must be a non-negative number",
                ));
                default
            }
        },
        None => default,
    }
}
