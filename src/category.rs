//! Category keys and the recommendation-to-category mapper.

use serde::{Deserialize, Serialize};

use crate::types::Recommendation;

/// Fixed enumeration of product categories recognized by the engine.
///
/// `General` is the designated fallback: unknown recommendation types map to
/// it instead of being dropped, and estimator lookup falls back to it when a
/// specific category has no config entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryKey {
    Hvac,
    Lighting,
    Dehumidification,
    Insulation,
    Windows,
    WaterHeating,
    General,
}

impl CategoryKey {
    /// Canonical string form, matching config and catalog category keys
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Hvac => "hvac",
            CategoryKey::Lighting => "lighting",
            CategoryKey::Dehumidification => "dehumidification",
            CategoryKey::Insulation => "insulation",
            CategoryKey::Windows => "windows",
            CategoryKey::WaterHeating => "water-heating",
            CategoryKey::General => "general",
        }
    }

    /// Parse a category tag as used by recommendations, products, config
    /// entries, and user preference strings. Accepts common synonyms.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "hvac" | "heating" | "cooling" => Some(CategoryKey::Hvac),
            "lighting" | "lights" => Some(CategoryKey::Lighting),
            "dehumidification" | "dehumidifier" => Some(CategoryKey::Dehumidification),
            "insulation" => Some(CategoryKey::Insulation),
            "windows" | "window" => Some(CategoryKey::Windows),
            "water-heating" | "water_heating" | "hot-water" => Some(CategoryKey::WaterHeating),
            "general" => Some(CategoryKey::General),
            _ => None,
        }
    }
}

impl std::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-text keywords suggesting a category, scanned when the type tag is
/// unrecognized. Substring matches against lowercased title + description.
fn keywords(key: CategoryKey) -> &'static [&'static str] {
    match key {
        CategoryKey::Hvac => &["hvac", "furnace", "heat pump", "air condition", "thermostat"],
        CategoryKey::Lighting => &["light", "led", "bulb", "lamp", "fixture"],
        CategoryKey::Dehumidification => &["dehumidif", "humidity", "moisture", "damp"],
        CategoryKey::Insulation => &["insulat", "attic", "air seal", "weatheriz"],
        CategoryKey::Windows => &["window", "glazing", "pane"],
        CategoryKey::WaterHeating => &["water heat", "hot water", "shower"],
        CategoryKey::General => &[],
    }
}

/// Default keyword scan order. When a recommendation's free text suggests
/// several categories, the first hit in this order wins, so mapping stays
/// reproducible across runs.
const DEFAULT_PRIORITY: [CategoryKey; 6] = [
    CategoryKey::Dehumidification,
    CategoryKey::Hvac,
    CategoryKey::WaterHeating,
    CategoryKey::Insulation,
    CategoryKey::Windows,
    CategoryKey::Lighting,
];

/// Maps a recommendation to exactly one category key.
///
/// Total and deterministic: a recognized type tag wins outright; otherwise
/// the free text is scanned in the declared priority order; no hit at all
/// falls back to `General` so matching degrades instead of dropping the
/// recommendation.
#[derive(Debug, Clone)]
pub struct CategoryMapper {
    priority: Vec<CategoryKey>,
}

impl CategoryMapper {
    pub fn new() -> Self {
        Self {
            priority: DEFAULT_PRIORITY.to_vec(),
        }
    }

    /// Override the keyword tie-break order, declared once per deployment
    pub fn with_priority(priority: Vec<CategoryKey>) -> Self {
        if priority.is_empty() {
            return Self::new();
        }
        Self { priority }
    }

    pub fn map_to_category(&self, recommendation: &Recommendation) -> CategoryKey {
        if let Some(key) = CategoryKey::from_tag(&recommendation.type_tag) {
            return key;
        }

        let text = format!(
            "{} {}",
            recommendation.title.to_ascii_lowercase(),
            recommendation.description.to_ascii_lowercase()
        );
        for key in &self.priority {
            if keywords(*key).iter().any(|kw| text.contains(kw)) {
                return *key;
            }
        }

        CategoryKey::General
    }
}

impl Default for CategoryMapper {
    fn default() -> Self {
        Self::new()
    }
}
