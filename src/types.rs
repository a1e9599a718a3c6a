//! Domain value objects shared across the engine.
//!
//! Every boundary type serializes with `camelCase` field names because the
//! recommendation and product snapshots originate from the storefront's JSON
//! API. The engine never mutates these inputs; results are fresh value
//! objects assembled per matching run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Recommendation priority as assigned by the audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Lifecycle status of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationStatus {
    Active,
    Implemented,
}

/// An energy-saving action suggested by an audit.
///
/// Produced by the (external) audit engine; read-only input to matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    /// Category tag assigned by the audit (e.g. "hvac", "dehumidification")
    #[serde(rename = "type")]
    pub type_tag: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: RecommendationStatus,
    pub estimated_savings: f64,
    pub estimated_cost: f64,
    pub payback_period: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_savings: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_cost: Option<f64>,
}

/// Category-specific raw specs attached to a catalog product.
///
/// The capacity field accepts the per-category spec names used by the catalog
/// (pints/day for dehumidifiers, BTU/h for HVAC, lumens for lighting,
/// R-value for envelope work) as aliases. Unrecognized specs are carried in
/// `extra` untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttributes {
    #[serde(
        default,
        alias = "capacityPintsPerDay",
        alias = "capacityBtuPerHour",
        alias = "lumens",
        alias = "rValue",
        skip_serializing_if = "Option::is_none"
    )]
    pub capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_energy_star: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_most_efficient: Option<bool>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A catalog item. Sourced from the (external) product catalog; read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    pub price: f64,
    /// Categorical or numeric efficiency rating as published by the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_efficiency: Option<String>,
    #[serde(default)]
    pub annual_savings: f64,
    #[serde(default)]
    pub roi: f64,
    #[serde(default)]
    pub payback_period: f64,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub attributes: ProductAttributes,
}

/// Rule-based label describing how much of an estimate rests on assumed data
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

/// Payback projection. `NoPayback` is the declared sentinel for zero or
/// negative annual savings; infinity and NaN never leave the estimators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaybackPeriod {
    Years(f64),
    NoPayback,
}

impl PaybackPeriod {
    pub fn is_no_payback(&self) -> bool {
        matches!(self, PaybackPeriod::NoPayback)
    }
}

/// Derived financial/efficiency projection for one product.
///
/// Always computed fresh, never persisted. Display strings are fully
/// formatted here so presentation layers do no numeric logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    pub price: f64,
    pub annual_savings: f64,
    pub five_year_savings: f64,
    pub ten_year_savings: f64,
    pub roi: f64,
    pub payback_period: PaybackPeriod,
    pub energy_efficiency_label: String,
    pub confidence_level: ConfidenceLevel,
    /// Present when capacity was defaulted from config rather than supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assumed_capacity: Option<f64>,
    pub formatted_price: String,
    pub formatted_annual_savings: String,
    pub formatted_roi: String,
    pub formatted_payback_period: String,
}

/// A candidate product paired with its estimate and relevance score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProduct {
    pub product: Product,
    pub estimate: EstimateResult,
    pub relevance_score: f64,
}

/// The engine's sole output unit: one per filtered recommendation, present
/// even when no product matched (`products` is then empty).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecommendationMatch {
    pub recommendation_id: String,
    pub products: Vec<RankedProduct>,
}

/// A recommendation quarantined during a batch run because its category's
/// config is broken. Unrelated recommendations are unaffected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFailure {
    pub recommendation_id: String,
    pub category: String,
    pub error: String,
}

/// Batch-mode output: completed matches plus per-recommendation failures
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub matches: Vec<ProductRecommendationMatch>,
    pub failures: Vec<MatchFailure>,
}
