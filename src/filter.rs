//! Preference-based recommendation filtering.

use std::collections::HashSet;
use tracing::warn;

use crate::category::{CategoryKey, CategoryMapper};
use crate::types::Recommendation;

/// Narrows a recommendation set to the user's declared category preferences.
pub struct RecommendationFilter<'a> {
    mapper: &'a CategoryMapper,
}

impl<'a> RecommendationFilter<'a> {
    pub fn new(mapper: &'a CategoryMapper) -> Self {
        Self { mapper }
    }

    /// Keep recommendations whose mapped category intersects the user's
    /// preferences. An empty preference list means "show everything", not
    /// "show nothing"; input order is preserved either way.
    pub fn filter_by_preferences(
        &self,
        recommendations: &[Recommendation],
        user_categories: &[String],
    ) -> Vec<Recommendation> {
        if user_categories.is_empty() {
            return recommendations.to_vec();
        }

        let mut preferred: HashSet<CategoryKey> = HashSet::new();
        for tag in user_categories {
            match CategoryKey::from_tag(tag) {
                Some(key) => {
                    preferred.insert(key);
                }
                None => warn!(preference = %tag, "ignoring unrecognized category preference"),
            }
        }

        recommendations
            .iter()
            .filter(|rec| preferred.contains(&self.mapper.map_to_category(rec)))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Priority, RecommendationStatus};

    fn rec(id: &str, type_tag: &str) -> Recommendation {
        Recommendation {
            id: id.to_string(),
            type_tag: type_tag.to_string(),
            title: String::new(),
            description: String::new(),
            priority: Priority::Medium,
            status: RecommendationStatus::Active,
            estimated_savings: 0.0,
            estimated_cost: 0.0,
            payback_period: 0.0,
            actual_savings: None,
            implementation_date: None,
            implementation_cost: None,
        }
    }

    #[test]
    fn test_empty_preferences_return_everything_unchanged() {
        let mapper = CategoryMapper::new();
        let filter = RecommendationFilter::new(&mapper);
        let recs = vec![rec("a", "hvac"), rec("b", "lighting"), rec("c", "windows")];

        let filtered = filter.filter_by_preferences(&recs, &[]);
        assert_eq!(filtered.len(), 3);
        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_filtering_preserves_input_order() {
        let mapper = CategoryMapper::new();
        let filter = RecommendationFilter::new(&mapper);
        let recs = vec![
            rec("a", "hvac"),
            rec("b", "lighting"),
            rec("c", "hvac"),
            rec("d", "windows"),
        ];

        let filtered =
            filter.filter_by_preferences(&recs, &["hvac".to_string(), "windows".to_string()]);
        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_unrecognized_preferences_match_nothing() {
        let mapper = CategoryMapper::new();
        let filter = RecommendationFilter::new(&mapper);
        let recs = vec![rec("a", "hvac")];

        let filtered = filter.filter_by_preferences(&recs, &["solar".to_string()]);
        assert!(filtered.is_empty());
    }
}
