use serde::Deserialize;

use crate::recipe::{CaloricBreakdown, Nutrient, Nutrition, RecipeId, RecipeSummary};

pub const FIND_BY_INGREDIENTS_PATH: &str = "/recipes/findByIngredients";

pub fn recipe_information_path(id: RecipeId) -> String {
    format!("/recipes/{}/information", id)
}

#[derive(Debug, Deserialize, Clone)]
pub struct IngredientRef {
    pub name: String,
}

/// One element of the `findByIngredients` response array.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FindByIngredientsItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub used_ingredients: Vec<IngredientRef>,
    #[serde(default)]
    pub missed_ingredients: Vec<IngredientRef>,
}

impl From<FindByIngredientsItem> for RecipeSummary {
    fn from(item: FindByIngredientsItem) -> Self {
        RecipeSummary {
            id: RecipeId(item.id),
            title: item.title,
            image: item.image.unwrap_or_default(),
            used_ingredients: item.used_ingredients.into_iter().map(|i| i.name).collect(),
            missed_ingredients: item.missed_ingredients.into_iter().map(|i| i.name).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NutrientDto {
    pub name: String,
    pub amount: f32,
    pub unit: String,
    #[serde(default)]
    pub percent_of_daily_needs: Option<f32>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CaloricBreakdownDto {
    pub percent_protein: f32,
    pub percent_fat: f32,
    pub percent_carbs: f32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NutritionDto {
    #[serde(default)]
    pub nutrients: Vec<NutrientDto>,
    #[serde(default)]
    pub caloric_breakdown: Option<CaloricBreakdownDto>,
}

impl From<NutritionDto> for Nutrition {
    fn from(dto: NutritionDto) -> Self {
        Nutrition {
            nutrients: dto
                .nutrients
                .into_iter()
                .map(|n| Nutrient {
                    name: n.name,
                    amount: n.amount,
                    unit: n.unit,
                    percent_of_daily_needs: n.percent_of_daily_needs,
                })
                .collect(),
            caloric_breakdown: dto.caloric_breakdown.map(|c| CaloricBreakdown {
                percent_protein: c.percent_protein,
                percent_fat: c.percent_fat,
                percent_carbs: c.percent_carbs,
            }),
        }
    }
}

/// Subset of `/recipes/{id}/information?includeNutrition=true` we consume.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInformation {
    pub id: u64,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub spoonacular_source_url: Option<String>,
    #[serde(default)]
    pub nutrition: Option<NutritionDto>,
}

impl RecipeInformation {
    /// Publisher URL, or the provider's own page when the publisher is unknown.
    pub fn best_source_url(&self) -> Option<&str> {
        [&self.source_url, &self.spoonacular_source_url]
            .into_iter()
            .filter_map(|url| url.as_deref())
            .map(str::trim)
            .find(|url| !url.is_empty())
    }
}
