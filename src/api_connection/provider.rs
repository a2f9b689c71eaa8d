use async_trait::async_trait;

use super::connection::ProviderError;
use crate::config::{ApiKey, Ranking};
use crate::recipe::{RecipeDetails, RecipeId, RecipeSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub ingredients: Vec<String>,
    pub ranking: Ranking,
    pub limit: usize,
}

/// Source of recipe candidates and their nutrition detail.
///
/// The credential is handed in on every call so the aggregation service stays
/// the single owner of it.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    async fn search_by_ingredients(
        &self,
        api_key: &ApiKey,
        query: &SearchQuery,
    ) -> Result<Vec<RecipeSummary>, ProviderError>;

    async fn get_nutrition(
        &self,
        api_key: &ApiKey,
        id: RecipeId,
    ) -> Result<RecipeDetails, ProviderError>;
}
