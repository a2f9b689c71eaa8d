use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

use crate::api_connection::connection::ProviderError;

/// Provider-assigned recipe identifier. Stable across search and enrichment,
/// and the key used for merging and for saved-set uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub u64);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecipeId {
    fn from(id: u64) -> Self {
        RecipeId(id)
    }
}

impl From<&Recipe> for RecipeId {
    fn from(recipe: &Recipe) -> Self {
        recipe.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    pub name: String,
    pub amount: f32,
    pub unit: String,
    pub percent_of_daily_needs: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaloricBreakdown {
    pub percent_protein: f32,
    pub percent_fat: f32,
    pub percent_carbs: f32,
}

/// Per-serving macro and calorie breakdown as reported by the provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrition {
    pub nutrients: Vec<Nutrient>,
    pub caloric_breakdown: Option<CaloricBreakdown>,
}

impl Nutrition {
    /// Case-insensitive lookup of a nutrient by name.
    pub fn amount_of(&self, name: &str) -> Option<&Nutrient> {
        self.nutrients
            .iter()
            .find(|n| n.name.eq_ignore_ascii_case(name))
    }

    pub fn calories(&self) -> Option<f32> {
        self.amount_of("Calories").map(|n| n.amount)
    }
}

/// Search-phase partial record: what ingredient search knows about a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub title: String,
    pub image: String,
    pub used_ingredients: Vec<String>,
    pub missed_ingredients: Vec<String>,
}

/// Enrichment-phase partial record fetched by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetails {
    pub id: RecipeId,
    pub nutrition: Nutrition,
    pub servings: u32,
    pub source_url: String,
}

/// A fully enriched recipe. Only obtainable through [`Recipe::merge`], so
/// nutrition, servings and source URL are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    id: RecipeId,
    title: String,
    image: String,
    nutrition: Nutrition,
    used_ingredients: Vec<String>,
    missed_ingredients: Vec<String>,
    servings: NonZeroU32,
    source_url: String,
}

impl Recipe {
    /// Joins the two partial records on their id. Search-derived fields come
    /// from `summary`, enrichment-derived fields from `details`.
    pub fn merge(summary: RecipeSummary, details: RecipeDetails) -> Result<Self, ProviderError> {
        if summary.id != details.id {
            return Err(ProviderError::IdMismatch {
                expected: summary.id,
                actual: details.id,
            });
        }
        let servings = NonZeroU32::new(details.servings).ok_or_else(|| {
            ProviderError::InvalidResponse(format!("recipe {} reports zero servings", details.id))
        })?;

        Ok(Recipe {
            id: summary.id,
            title: summary.title,
            image: summary.image,
            nutrition: details.nutrition,
            used_ingredients: summary.used_ingredients,
            missed_ingredients: summary.missed_ingredients,
            servings,
            source_url: details.source_url,
        })
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn nutrition(&self) -> &Nutrition {
        &self.nutrition
    }

    pub fn used_ingredients(&self) -> &[String] {
        &self.used_ingredients
    }

    pub fn missed_ingredients(&self) -> &[String] {
        &self.missed_ingredients
    }

    pub fn servings(&self) -> NonZeroU32 {
        self.servings
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn summary(id: u64, title: &str) -> RecipeSummary {
        RecipeSummary {
            id: RecipeId(id),
            title: title.to_string(),
            image: format!("https://img.example/{}.jpg", id),
            used_ingredients: vec!["potatoes".to_string()],
            missed_ingredients: vec!["butter".to_string(), "chives".to_string()],
        }
    }

    pub(crate) fn details(id: u64) -> RecipeDetails {
        RecipeDetails {
            id: RecipeId(id),
            nutrition: Nutrition {
                nutrients: vec![Nutrient {
                    name: "Calories".to_string(),
                    amount: 312.5,
                    unit: "kcal".to_string(),
                    percent_of_daily_needs: Some(15.6),
                }],
                caloric_breakdown: None,
            },
            servings: 4,
            source_url: format!("https://recipes.example/{}", id),
        }
    }

    pub(crate) fn recipe(id: u64, title: &str) -> Recipe {
        Recipe::merge(summary(id, title), details(id)).unwrap()
    }

    #[test]
    fn test_merge_keeps_fields_from_each_phase() {
        let merged = Recipe::merge(summary(7, "Mashed Potatoes"), details(7)).unwrap();
        assert_eq!(merged.id(), RecipeId(7));
        assert_eq!(merged.title(), "Mashed Potatoes");
        assert_eq!(merged.image(), "https://img.example/7.jpg");
        assert_eq!(merged.used_ingredients(), ["potatoes".to_string()]);
        assert_eq!(merged.missed_ingredients().len(), 2);
        assert_eq!(merged.servings().get(), 4);
        assert_eq!(merged.source_url(), "https://recipes.example/7");
        assert_eq!(merged.nutrition().calories(), Some(312.5));
    }

    #[test]
    fn test_merge_rejects_mismatched_ids() {
        let err = Recipe::merge(summary(1, "Stir Fry"), details(2)).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::IdMismatch { expected: RecipeId(1), actual: RecipeId(2) }
        ));
    }

    #[test]
    fn test_merge_rejects_zero_servings() {
        let mut zero = details(3);
        zero.servings = 0;
        let err = Recipe::merge(summary(3, "Soup"), zero).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[test]
    fn test_nutrient_lookup_is_case_insensitive() {
        let nutrition = details(1).nutrition;
        assert!(nutrition.amount_of("calories").is_some());
        assert!(nutrition.amount_of("Protein").is_none());
    }
}
