//! The single entry point composing filter, mapper, estimators, and matcher.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::category::CategoryMapper;
use crate::config::EstimationConfig;
use crate::error::Result;
use crate::estimate::EstimatorFactory;
use crate::filter::RecommendationFilter;
use crate::matcher::ProductMatcher;
use crate::types::{
    MatchFailure, MatchReport, Product, ProductRecommendationMatch, Recommendation,
};

/// Composes the matching pipeline: filter, map category, fetch estimator,
/// match products, assemble one match object per filtered recommendation.
///
/// Stateless across invocations apart from the immutable config snapshot it
/// was built from; independent `run` calls may execute concurrently.
pub struct MatchOrchestrator {
    config: Arc<EstimationConfig>,
    factory: EstimatorFactory,
    mapper: CategoryMapper,
}

impl MatchOrchestrator {
    /// Build the orchestrator for one loaded config. The estimator dispatch
    /// table is constructed here, once, not per request.
    pub fn new(config: Arc<EstimationConfig>) -> Self {
        let factory = EstimatorFactory::new(&config);
        let mapper = match &config.category_priority {
            Some(priority) => CategoryMapper::with_priority(priority.clone()),
            None => CategoryMapper::new(),
        };
        Self {
            config,
            factory,
            mapper,
        }
    }

    /// Strict mode: the first config/category error aborts the run.
    ///
    /// Recommendations dropped by the preference filter produce no match
    /// object at all; recommendations with no matching products still
    /// produce one, with an empty product list.
    pub fn run(
        &self,
        recommendations: &[Recommendation],
        products: &[Product],
        user_categories: &[String],
        budget_constraint: Option<f64>,
    ) -> Result<Vec<ProductRecommendationMatch>> {
        let retained = self.filtered(recommendations, user_categories);
        let matcher = self.matcher();

        let mut matches = Vec::with_capacity(retained.len());
        for recommendation in &retained {
            let ranked = matcher.match_products(recommendation, products, budget_constraint)?;
            matches.push(ProductRecommendationMatch {
                recommendation_id: recommendation.id.clone(),
                products: ranked,
            });
        }

        info!(
            recommendations = recommendations.len(),
            retained = retained.len(),
            "matching run complete"
        );
        Ok(matches)
    }

    /// Batch mode: a category/config error quarantines only the affected
    /// recommendation; unrelated recommendations still complete.
    pub fn run_batch(
        &self,
        recommendations: &[Recommendation],
        products: &[Product],
        user_categories: &[String],
        budget_constraint: Option<f64>,
    ) -> MatchReport {
        let retained = self.filtered(recommendations, user_categories);
        let matcher = self.matcher();

        let mut matches = Vec::with_capacity(retained.len());
        let mut failures = Vec::new();
        for recommendation in &retained {
            match matcher.match_products(recommendation, products, budget_constraint) {
                Ok(ranked) => matches.push(ProductRecommendationMatch {
                    recommendation_id: recommendation.id.clone(),
                    products: ranked,
                }),
                Err(err) => {
                    let category = self.mapper.map_to_category(recommendation);
                    warn!(
                        recommendation = %recommendation.id,
                        category = %category,
                        error = %err,
                        "recommendation quarantined"
                    );
                    failures.push(MatchFailure {
                        recommendation_id: recommendation.id.clone(),
                        category: category.as_str().to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }

        MatchReport { matches, failures }
    }

    fn filtered(
        &self,
        recommendations: &[Recommendation],
        user_categories: &[String],
    ) -> Vec<Recommendation> {
        let filter = RecommendationFilter::new(&self.mapper);
        let retained = filter.filter_by_preferences(recommendations, user_categories);
        debug!(
            total = recommendations.len(),
            retained = retained.len(),
            "preference filter applied"
        );
        retained
    }

    fn matcher(&self) -> ProductMatcher<'_> {
        ProductMatcher::new(&self.factory, &self.mapper, &self.config.matching)
    }
}
