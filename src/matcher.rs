//! Product matching: candidate selection, relevance scoring, and ranking.

use tracing::debug;

use crate::category::{CategoryKey, CategoryMapper};
use crate::config::MatchingWeights;
use crate::error::Result;
use crate::estimate::EstimatorFactory;
use crate::types::{Product, RankedProduct, Recommendation};

/// Matches one recommendation against the product catalog snapshot.
///
/// Never mutates the products or recommendations it receives; the budget
/// constraint only ranks, it never excludes.
pub struct ProductMatcher<'a> {
    factory: &'a EstimatorFactory,
    mapper: &'a CategoryMapper,
    weights: &'a MatchingWeights,
}

impl<'a> ProductMatcher<'a> {
    pub fn new(
        factory: &'a EstimatorFactory,
        mapper: &'a CategoryMapper,
        weights: &'a MatchingWeights,
    ) -> Self {
        Self {
            factory,
            mapper,
            weights,
        }
    }

    /// Select, estimate, and rank candidate products for a recommendation.
    ///
    /// The returned list may be empty; the orchestrator still emits a match
    /// object for the recommendation in that case.
    pub fn match_products(
        &self,
        recommendation: &Recommendation,
        products: &[Product],
        budget_constraint: Option<f64>,
    ) -> Result<Vec<RankedProduct>> {
        let category = self.mapper.map_to_category(recommendation);

        // Resolve the estimator first: a missing config entry (with no
        // general fallback) is a deployment defect and must surface even
        // when the catalog happens to hold no candidates.
        let estimator = self.factory.get(category)?;

        let exact_pool: Vec<&Product> = products
            .iter()
            .filter(|p| CategoryKey::from_tag(&p.category) == Some(category))
            .collect();

        // Widen once to the general pool before giving up, mirroring the
        // mapper's fallback behavior.
        let (pool, exact) = if exact_pool.is_empty() && category != CategoryKey::General {
            let general: Vec<&Product> = products
                .iter()
                .filter(|p| CategoryKey::from_tag(&p.category) == Some(CategoryKey::General))
                .collect();
            (general, false)
        } else {
            (exact_pool, true)
        };

        if pool.is_empty() {
            debug!(
                recommendation = %recommendation.id,
                category = %category,
                "no candidate products"
            );
            return Ok(Vec::new());
        }

        let rec_tokens = tokenize(&format!(
            "{} {}",
            recommendation.title, recommendation.description
        ));

        let mut ranked: Vec<(bool, RankedProduct)> = pool
            .into_iter()
            .map(|product| {
                let relevance_score = self.relevance(product, &rec_tokens, exact);
                let estimate = estimator.estimate(&product.attributes);
                let within_budget =
                    budget_constraint.map_or(true, |budget| product.price <= budget);
                (
                    within_budget,
                    RankedProduct {
                        product: product.clone(),
                        estimate,
                        relevance_score,
                    },
                )
            })
            .collect();

        // Descending (within_budget, relevance, roi); cheaper product wins
        // ties so ordering stays reproducible.
        ranked.sort_by(|(a_budget, a), (b_budget, b)| {
            b_budget
                .cmp(a_budget)
                .then_with(|| b.relevance_score.total_cmp(&a.relevance_score))
                .then_with(|| b.estimate.roi.total_cmp(&a.estimate.roi))
                .then_with(|| a.product.price.total_cmp(&b.product.price))
        });

        Ok(ranked.into_iter().map(|(_, rp)| rp).collect())
    }

    /// Weighted sum of category exactness and feature-keyword overlap.
    /// Computed once per candidate, before ranking; estimation never feeds
    /// back into relevance.
    fn relevance(&self, product: &Product, rec_tokens: &[String], exact: bool) -> f64 {
        let exactness_scale = if exact {
            1.0
        } else {
            self.weights.widened_pool_scale
        };

        let overlap = if rec_tokens.is_empty() {
            0.0
        } else {
            let product_text = format!(
                "{} {} {}",
                product.name,
                product.sub_category.as_deref().unwrap_or(""),
                product.features.join(" ")
            )
            .to_ascii_lowercase();
            let hits = rec_tokens
                .iter()
                .filter(|token| product_text.contains(token.as_str()))
                .count();
            hits as f64 / rec_tokens.len() as f64
        };

        self.weights.category_exactness * exactness_scale + self.weights.feature_overlap * overlap
    }
}

/// Filler words that carry no matching signal at any length
const STOP_WORDS: &[&str] = &["and", "are", "for", "has", "its", "the", "was", "with"];

/// Lowercased, deduplicated word tokens. Three letters is enough for
/// domain terms like "led" or "fan"; anything shorter is split-off noise.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = text
        .to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| word.len() >= 3 && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect();
    tokens.sort();
    tokens.dedup();
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EstimationConfig, MatchingWeights};
    use crate::estimate::estimator::test_support::dehumidifier_rules;
    use crate::types::{Priority, ProductAttributes, RecommendationStatus};
    use std::collections::HashMap;

    fn config() -> EstimationConfig {
        let mut categories = HashMap::new();
        categories.insert("dehumidification".to_string(), dehumidifier_rules());
        categories.insert("general".to_string(), dehumidifier_rules());
        EstimationConfig {
            version: "test".to_string(),
            categories,
            matching: MatchingWeights::default(),
            category_priority: None,
        }
    }

    fn recommendation() -> Recommendation {
        Recommendation {
            id: "rec-1".to_string(),
            type_tag: "dehumidification".to_string(),
            title: "Install an efficient dehumidifier".to_string(),
            description: "Basement humidity is persistently high".to_string(),
            priority: Priority::High,
            status: RecommendationStatus::Active,
            estimated_savings: 120.0,
            estimated_cost: 250.0,
            payback_period: 2.1,
            actual_savings: None,
            implementation_date: None,
            implementation_cost: None,
        }
    }

    fn product(id: &str, category: &str, price: f64, attrs: ProductAttributes) -> Product {
        Product {
            id: id.to_string(),
            name: format!("{id} dehumidifier"),
            category: category.to_string(),
            sub_category: None,
            price,
            energy_efficiency: None,
            annual_savings: 0.0,
            roi: 0.0,
            payback_period: 0.0,
            features: vec!["humidity control".to_string()],
            attributes: attrs,
        }
    }

    fn attrs(capacity: f64, energy_star: bool) -> ProductAttributes {
        ProductAttributes {
            capacity: Some(capacity),
            is_energy_star: Some(energy_star),
            is_most_efficient: None,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_budget_dominates_roi_in_ranking() {
        let config = config();
        let factory = EstimatorFactory::new(&config);
        let mapper = CategoryMapper::new();
        let matcher = ProductMatcher::new(&factory, &mapper, &config.matching);

        // The ENERGY STAR unit prices at 230 (over budget); the basic unit
        // at 120.
        let products = vec![
            product("star", "dehumidification", 230.0, attrs(50.0, true)),
            product("basic", "dehumidification", 120.0, attrs(10.0, false)),
        ];

        let ranked = matcher
            .match_products(&recommendation(), &products, Some(150.0))
            .unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].product.id, "basic");
        assert_eq!(ranked[1].product.id, "star");

        // Without the budget, ROI decides.
        let ranked = matcher
            .match_products(&recommendation(), &products, None)
            .unwrap();
        assert_eq!(ranked[0].product.id, "star");
    }

    #[test]
    fn test_ties_broken_by_lower_price() {
        let config = config();
        let factory = EstimatorFactory::new(&config);
        let mapper = CategoryMapper::new();
        let matcher = ProductMatcher::new(&factory, &mapper, &config.matching);

        // Identical attributes, different catalog prices.
        let products = vec![
            product("pricier", "dehumidification", 300.0, attrs(50.0, true)),
            product("cheaper", "dehumidification", 280.0, attrs(50.0, true)),
        ];

        let ranked = matcher
            .match_products(&recommendation(), &products, None)
            .unwrap();
        assert_eq!(ranked[0].product.id, "cheaper");
    }

    #[test]
    fn test_pool_widens_once_to_general() {
        let config = config();
        let factory = EstimatorFactory::new(&config);
        let mapper = CategoryMapper::new();
        let matcher = ProductMatcher::new(&factory, &mapper, &config.matching);

        let products = vec![product("g1", "general", 90.0, attrs(20.0, false))];
        let ranked = matcher
            .match_products(&recommendation(), &products, None)
            .unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].product.id, "g1");

        // Widened-pool candidates score below exact matches would.
        let exact_weight = config.matching.category_exactness;
        assert!(ranked[0].relevance_score < exact_weight + config.matching.feature_overlap);
    }

    #[test]
    fn test_empty_pool_is_empty_result_not_error() {
        let config = config();
        let factory = EstimatorFactory::new(&config);
        let mapper = CategoryMapper::new();
        let matcher = ProductMatcher::new(&factory, &mapper, &config.matching);

        let products = vec![product("w1", "windows", 400.0, attrs(3.0, false))];
        let ranked = matcher
            .match_products(&recommendation(), &products, None)
            .unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_feature_overlap_raises_relevance() {
        let config = config();
        let factory = EstimatorFactory::new(&config);
        let mapper = CategoryMapper::new();
        let matcher = ProductMatcher::new(&factory, &mapper, &config.matching);

        let mut bland = product("bland", "dehumidification", 200.0, attrs(50.0, true));
        bland.name = "Unit X200".to_string();
        bland.features = vec!["quiet".to_string()];
        let relevant = product("relevant", "dehumidification", 200.0, attrs(50.0, true));

        let ranked = matcher
            .match_products(&recommendation(), &[bland, relevant], None)
            .unwrap();
        assert_eq!(ranked[0].product.id, "relevant");
        assert!(ranked[0].relevance_score > ranked[1].relevance_score);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let config = config();
        let factory = EstimatorFactory::new(&config);
        let mapper = CategoryMapper::new();
        let matcher = ProductMatcher::new(&factory, &mapper, &config.matching);

        let products = vec![product("p1", "dehumidification", 230.0, attrs(50.0, true))];
        let before = serde_json::to_string(&products).unwrap();
        matcher
            .match_products(&recommendation(), &products, Some(100.0))
            .unwrap();
        assert_eq!(serde_json::to_string(&products).unwrap(), before);
    }

    #[test]
    fn test_tokenize_dedups_and_drops_filler_words() {
        let tokens = tokenize("Install an efficient dehumidifier, efficient and quiet");
        assert!(tokens.contains(&"dehumidifier".to_string()));
        assert!(tokens.contains(&"efficient".to_string()));
        assert!(!tokens.contains(&"an".to_string()));
        assert!(!tokens.contains(&"and".to_string()));
        assert_eq!(
            tokens.iter().filter(|t| t.as_str() == "efficient").count(),
            1
        );
    }

    #[test]
    fn test_tokenize_keeps_short_domain_terms() {
        let tokens = tokenize("Swap the ceiling fan for an LED fixture");
        assert!(tokens.contains(&"led".to_string()));
        assert!(tokens.contains(&"fan".to_string()));
        assert!(!tokens.contains(&"the".to_string()));
        assert!(!tokens.contains(&"for".to_string()));
    }
}
