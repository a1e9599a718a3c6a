//! The estimator strategy trait and the financial math shared by all
//! per-category strategies.
//!
//! Every arithmetic edge case is an explicit branch with a named result:
//! `roi` is 0 when price is 0, zero savings report the `NoPayback` sentinel,
//! and missing capacity downgrades confidence instead of raising an error.

use crate::category::CategoryKey;
use crate::config::CategoryRules;
use crate::estimate::format;
use crate::types::{ConfidenceLevel, EstimateResult, PaybackPeriod, ProductAttributes};

/// One estimation strategy per product category. Implementations are pure
/// and side-effect-free: same attributes, same result.
pub trait Estimator: Send + Sync {
    fn category(&self) -> CategoryKey;

    fn estimate(&self, attributes: &ProductAttributes) -> EstimateResult;
}

/// Which certification flags a category's estimator reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CertificationPolicy {
    /// ENERGY STAR and Most Efficient both apply (capacity-rated appliances)
    Full,
    /// Only ENERGY STAR applies (e.g. lighting)
    EnergyStarOnly,
    /// The category has no certification program (e.g. envelope work)
    None,
}

/// Core formula shared by the strategies.
///
/// `price = base + coefficient * capacity + certification premium`;
/// savings come from the category's reference consumption curve scaled by
/// the certification tier's efficiency factor.
pub(crate) fn estimate_with_rules(
    rules: &CategoryRules,
    attributes: &ProductAttributes,
    policy: CertificationPolicy,
) -> EstimateResult {
    let (capacity, assumed) = match attributes.capacity {
        Some(c) if c.is_finite() && c >= 0.0 => (c, false),
        _ => (rules.default_capacity, true),
    };

    let (energy_star, most_efficient) = match policy {
        CertificationPolicy::Full => (attributes.is_energy_star, attributes.is_most_efficient),
        CertificationPolicy::EnergyStarOnly => (attributes.is_energy_star, None),
        CertificationPolicy::None => (None, None),
    };

    let premium = if most_efficient == Some(true) {
        rules.most_efficient_premium
    } else if energy_star == Some(true) {
        rules.efficiency_premium
    } else {
        0.0
    };
    let price = rules.base_price + rules.capacity_coefficient * capacity + premium;

    let factor = if most_efficient == Some(true) {
        rules.efficiency_factors.most_efficient
    } else if energy_star == Some(true) {
        rules.efficiency_factors.energy_star
    } else {
        rules.efficiency_factors.baseline
    };
    let standard_kwh = rules.standard_consumption.standard_kwh(capacity);
    let efficient_kwh = standard_kwh * factor;
    let annual_savings = (standard_kwh - efficient_kwh) * rules.electricity_rate;

    // Declared edge cases, not exceptions: zero price yields zero ROI, and
    // zero savings yield the sentinel instead of a division.
    let roi = if price > 0.0 { annual_savings / price } else { 0.0 };
    let payback_period = if annual_savings > 0.0 {
        PaybackPeriod::Years(price / annual_savings)
    } else {
        PaybackPeriod::NoPayback
    };

    let certifications_supplied = match policy {
        CertificationPolicy::Full | CertificationPolicy::EnergyStarOnly => {
            energy_star.is_some() || most_efficient.is_some()
        }
        CertificationPolicy::None => true,
    };
    let completeness = if certifications_supplied { 1.0 } else { 0.6 };
    let thresholds = &rules.confidence_thresholds;
    // A defaulted capacity caps confidence at low no matter how permissive
    // the deployment's thresholds are.
    let confidence_level = if assumed {
        ConfidenceLevel::Low
    } else if completeness >= thresholds.high {
        ConfidenceLevel::High
    } else if completeness >= thresholds.medium {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    };

    let energy_efficiency_label = if most_efficient == Some(true) {
        "ENERGY STAR Most Efficient".to_string()
    } else if energy_star == Some(true) {
        "ENERGY STAR".to_string()
    } else {
        "Standard".to_string()
    };

    EstimateResult {
        price,
        annual_savings,
        five_year_savings: annual_savings * 5.0,
        ten_year_savings: annual_savings * 10.0,
        roi,
        payback_period,
        energy_efficiency_label,
        confidence_level,
        assumed_capacity: assumed.then_some(rules.default_capacity),
        formatted_price: format::format_money(price),
        formatted_annual_savings: format::format_money(annual_savings),
        formatted_roi: format::format_percent(roi),
        formatted_payback_period: format::format_payback(&payback_period),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::dehumidifier_rules;
    use super::*;

    fn attrs(capacity: Option<f64>, energy_star: Option<bool>, most_efficient: Option<bool>) -> ProductAttributes {
        ProductAttributes {
            capacity,
            is_energy_star: energy_star,
            is_most_efficient: most_efficient,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_worked_dehumidifier_example() {
        // basePrice=100, coefficient=2, capacity=50, ENERGY STAR premium=30
        let rules = dehumidifier_rules();
        let result = estimate_with_rules(
            &rules,
            &attrs(Some(50.0), Some(true), None),
            CertificationPolicy::Full,
        );

        assert_eq!(result.price, 230.0);
        assert_eq!(result.confidence_level, ConfidenceLevel::High);
        assert_eq!(result.energy_efficiency_label, "ENERGY STAR");
        assert!(result.assumed_capacity.is_none());

        // standard = 100 + 8*50 = 500 kWh; energy star factor 0.85
        // savings = 500 * 0.15 * 0.14 = 10.5
        assert!((result.annual_savings - 10.5).abs() < 1e-9);
        assert!((result.five_year_savings - 52.5).abs() < 1e-9);
        assert!((result.roi - 10.5 / 230.0).abs() < 1e-12);
        assert_eq!(result.formatted_price, "$230.00");
    }

    #[test]
    fn test_missing_certifications_are_medium_confidence() {
        let rules = dehumidifier_rules();
        let result = estimate_with_rules(
            &rules,
            &attrs(Some(50.0), None, None),
            CertificationPolicy::Full,
        );
        assert_eq!(result.confidence_level, ConfidenceLevel::Medium);
        assert_eq!(result.energy_efficiency_label, "Standard");
    }

    #[test]
    fn test_missing_capacity_is_low_confidence_with_marker() {
        let rules = dehumidifier_rules();
        let result = estimate_with_rules(
            &rules,
            &attrs(None, Some(true), None),
            CertificationPolicy::Full,
        );
        assert_eq!(result.confidence_level, ConfidenceLevel::Low);
        assert_eq!(result.assumed_capacity, Some(30.0));
        // Still a usable estimate: priced from the assumed capacity.
        assert_eq!(result.price, 100.0 + 2.0 * 30.0 + 30.0);
    }

    #[test]
    fn test_assumed_capacity_stays_low_under_permissive_thresholds() {
        let mut rules = dehumidifier_rules();
        rules.confidence_thresholds = crate::config::ConfidenceThresholds {
            low: 0.05,
            medium: 0.1,
            high: 0.15,
        };
        let result = estimate_with_rules(
            &rules,
            &attrs(None, Some(true), None),
            CertificationPolicy::Full,
        );
        assert_eq!(result.confidence_level, ConfidenceLevel::Low);
        assert_eq!(result.assumed_capacity, Some(30.0));
    }

    #[test]
    fn test_zero_price_yields_zero_roi() {
        let mut rules = dehumidifier_rules();
        rules.base_price = 0.0;
        rules.capacity_coefficient = 0.0;
        let result = estimate_with_rules(
            &rules,
            &attrs(Some(50.0), None, None),
            CertificationPolicy::Full,
        );
        assert_eq!(result.price, 0.0);
        assert_eq!(result.roi, 0.0);
        assert!(result.roi.is_finite());
    }

    #[test]
    fn test_zero_savings_yield_sentinel_never_infinity() {
        let mut rules = dehumidifier_rules();
        rules.efficiency_factors.baseline = 1.0;
        let result = estimate_with_rules(
            &rules,
            &attrs(Some(50.0), None, None),
            CertificationPolicy::Full,
        );
        assert_eq!(result.annual_savings, 0.0);
        assert_eq!(result.roi, 0.0);
        assert_eq!(result.payback_period, PaybackPeriod::NoPayback);
        assert_eq!(result.formatted_payback_period, "No payback");
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let rules = dehumidifier_rules();
        let a = attrs(Some(50.0), Some(true), None);
        let first = estimate_with_rules(&rules, &a, CertificationPolicy::Full);
        let second = estimate_with_rules(&rules, &a, CertificationPolicy::Full);
        assert_eq!(first, second);
    }

    #[test]
    fn test_most_efficient_outranks_energy_star() {
        let rules = dehumidifier_rules();
        let result = estimate_with_rules(
            &rules,
            &attrs(Some(50.0), Some(true), Some(true)),
            CertificationPolicy::Full,
        );
        assert_eq!(result.price, 100.0 + 100.0 + 60.0);
        assert_eq!(result.energy_efficiency_label, "ENERGY STAR Most Efficient");
    }

    #[test]
    fn test_energy_star_only_policy_ignores_most_efficient() {
        let rules = dehumidifier_rules();
        let result = estimate_with_rules(
            &rules,
            &attrs(Some(50.0), None, Some(true)),
            CertificationPolicy::EnergyStarOnly,
        );
        assert_eq!(result.energy_efficiency_label, "Standard");
        assert_eq!(result.price, 200.0);
    }
}
