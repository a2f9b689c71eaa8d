use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;
use tracing::debug;

use super::endpoints::{
    recipe_information_path, FindByIngredientsItem, RecipeInformation, FIND_BY_INGREDIENTS_PATH,
};
use super::provider::{RecipeProvider, SearchQuery};
use crate::config::{ApiKey, ClientConfig};
use crate::recipe::{RecipeDetails, RecipeId, RecipeSummary};

/// A failed provider call. Recoverable by the caller (retry or skip).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("provider rejected the credential ({status})")]
    Unauthorized { status: StatusCode },
    #[error("recipe {0} not found")]
    NotFound(RecipeId),
    #[error("API error {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("could not decode provider response: {0}")]
    Decode(String),
    #[error("incomplete provider response: {0}")]
    InvalidResponse(String),
    #[error("asked for recipe {expected} but provider answered with {actual}")]
    IdMismatch { expected: RecipeId, actual: RecipeId },
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(err.to_string())
    }
}

/// HTTP client for the Spoonacular recipe API.
#[derive(Debug, Clone)]
pub struct SpoonacularClient {
    http: Client,
    base_url: String,
}

impl SpoonacularClient {
    pub fn new(config: ClientConfig) -> Result<Self, ProviderError> {
        let http = Client::builder().timeout(config.http_timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn read_body(response: Response, missing: Option<RecipeId>) -> Result<String, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.text().await?);
        }
        match (status, missing) {
            (StatusCode::UNAUTHORIZED | StatusCode::PAYMENT_REQUIRED | StatusCode::FORBIDDEN, _) => {
                Err(ProviderError::Unauthorized { status })
            }
            (StatusCode::NOT_FOUND, Some(id)) => Err(ProviderError::NotFound(id)),
            _ => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Failed to read error body".to_string());
                Err(ProviderError::Api { status, body })
            }
        }
    }
}

#[async_trait]
impl RecipeProvider for SpoonacularClient {
    async fn search_by_ingredients(
        &self,
        api_key: &ApiKey,
        query: &SearchQuery,
    ) -> Result<Vec<RecipeSummary>, ProviderError> {
        let url = format!("{}{}", self.base_url, FIND_BY_INGREDIENTS_PATH);
        debug!(ingredients = ?query.ingredients, limit = query.limit, "searching recipes by ingredients");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("ingredients", query.ingredients.join(",")),
                ("ranking", query.ranking.code().to_string()),
                ("number", query.limit.to_string()),
                ("ignorePantry", "false".to_string()),
                ("apiKey", api_key.expose().to_string()),
            ])
            .send()
            .await?;

        let body = Self::read_body(response, None).await?;
        let items: Vec<FindByIngredientsItem> = serde_json::from_str(&body)?;
        Ok(items.into_iter().map(RecipeSummary::from).collect())
    }

    async fn get_nutrition(
        &self,
        api_key: &ApiKey,
        id: RecipeId,
    ) -> Result<RecipeDetails, ProviderError> {
        let url = format!("{}{}", self.base_url, recipe_information_path(id));
        debug!(recipe_id = %id, "fetching recipe nutrition");

        let response = self
            .http
            .get(&url)
            .query(&[("includeNutrition", "true"), ("apiKey", api_key.expose())])
            .send()
            .await?;

        let body = Self::read_body(response, Some(id)).await?;
        let info: RecipeInformation = serde_json::from_str(&body)?;

        let actual = RecipeId(info.id);
        if actual != id {
            return Err(ProviderError::IdMismatch { expected: id, actual });
        }
        let source_url = info
            .best_source_url()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::InvalidResponse(format!("recipe {} has no source URL", id)))?;
        let servings = info
            .servings
            .ok_or_else(|| ProviderError::InvalidResponse(format!("recipe {} has no servings", id)))?;
        let nutrition = info
            .nutrition
            .filter(|n| !n.nutrients.is_empty())
            .ok_or_else(|| ProviderError::InvalidResponse(format!("recipe {} has no nutrition", id)))?;

        Ok(RecipeDetails {
            id,
            nutrition: nutrition.into(),
            servings,
            source_url,
        })
    }
}
