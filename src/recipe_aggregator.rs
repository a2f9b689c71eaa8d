use futures_util::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use std::future::Future;
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::api_connection::connection::ProviderError;
use crate::api_connection::provider::{RecipeProvider, SearchQuery};
use crate::config::{EnrichmentPolicy, ServiceConfig};
use crate::errors::{AggregationError, ConfigurationError, InvariantViolation};
use crate::recipe::{Recipe, RecipeId, RecipeSummary};
use crate::saved::SavedRecipeSet;

#[derive(Serialize)]
struct FailureView<'a> {
    id: RecipeId,
    title: &'a str,
    error: String,
}

/// A candidate that was found by search but could not be enriched.
#[derive(Debug)]
pub struct EnrichmentFailure {
    pub id: RecipeId,
    pub title: String,
    pub error: ProviderError,
}

#[derive(Debug, Default)]
pub struct RecipeSearchOutcome {
    /// Fully enriched recipes, in search order.
    pub recipes: Vec<Recipe>,
    /// Candidates whose enrichment failed, in search order.
    pub failures: Vec<EnrichmentFailure>,
}

impl RecipeSearchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let failures: Vec<FailureView<'_>> = self
            .failures
            .iter()
            .map(|f| FailureView {
                id: f.id,
                title: &f.title,
                error: f.error.to_string(),
            })
            .collect();
        serde_json::json!({
            "recipes": self.recipes,
            "failures": failures,
        })
    }
}

/// Turns pantry ingredients into enriched recipes and keeps the user's saved set.
pub struct RecipeAggregationService<P> {
    config: ServiceConfig,
    provider: P,
    saved: SavedRecipeSet,
}

impl<P: RecipeProvider> RecipeAggregationService<P> {
    pub fn new(config: ServiceConfig, provider: P) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            config,
            provider,
            saved: SavedRecipeSet::new(),
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Searches with the configured request timeout (if any) as the deadline.
    pub async fn find_recipes(
        &self,
        ingredients: &[String],
    ) -> Result<RecipeSearchOutcome, AggregationError> {
        let deadline = self.config.request_timeout.map(|t| Instant::now() + t);
        self.find(ingredients, deadline).await
    }

    /// Like [`find_recipes`](Self::find_recipes) but bounded by `deadline`
    /// across both the search and the enrichment calls.
    pub async fn find_recipes_until(
        &self,
        ingredients: &[String],
        deadline: Instant,
    ) -> Result<RecipeSearchOutcome, AggregationError> {
        self.find(ingredients, Some(deadline)).await
    }

    async fn find(
        &self,
        ingredients: &[String],
        deadline: Option<Instant>,
    ) -> Result<RecipeSearchOutcome, AggregationError> {
        self.verify_invariants()?;
        if ingredients.is_empty() {
            warn!("searching recipes with an empty ingredient list");
        }

        let query = SearchQuery {
            ingredients: ingredients.to_vec(),
            ranking: self.config.ranking,
            limit: self.config.result_limit,
        };
        info!(ingredients = ?query.ingredients, "searching recipes");
        let candidates = within(
            deadline,
            self.provider.search_by_ingredients(&self.config.api_key, &query),
        )
        .await
        .map_err(AggregationError::Search)?;
        info!(count = candidates.len(), "search returned candidates");

        let outcome = match self.config.enrichment_policy {
            EnrichmentPolicy::Isolate => self.enrich_isolated(candidates, deadline).await,
            EnrichmentPolicy::FailFast => RecipeSearchOutcome {
                recipes: self.enrich_all_or_nothing(candidates, deadline).await?,
                failures: Vec::new(),
            },
        };

        info!(
            enriched = outcome.recipes.len(),
            failed = outcome.failures.len(),
            "recipe search finished"
        );
        Ok(outcome)
    }

    async fn enrich_one(
        &self,
        summary: RecipeSummary,
        deadline: Option<Instant>,
    ) -> (RecipeSummary, Result<Recipe, ProviderError>) {
        let id = summary.id;
        let result = match within(deadline, self.provider.get_nutrition(&self.config.api_key, id)).await {
            Ok(details) => Recipe::merge(summary.clone(), details),
            Err(e) => Err(e),
        };
        (summary, result)
    }

    async fn enrich_isolated(
        &self,
        candidates: Vec<RecipeSummary>,
        deadline: Option<Instant>,
    ) -> RecipeSearchOutcome {
        let results: Vec<_> = stream::iter(candidates)
            .map(|summary| self.enrich_one(summary, deadline))
            .buffered(self.config.max_concurrent_enrichments)
            .collect()
            .await;

        let mut outcome = RecipeSearchOutcome::default();
        for (summary, result) in results {
            match result {
                Ok(recipe) => outcome.recipes.push(recipe),
                Err(error) => {
                    warn!(recipe_id = %summary.id, %error, "enrichment failed");
                    outcome.failures.push(EnrichmentFailure {
                        id: summary.id,
                        title: summary.title,
                        error,
                    });
                }
            }
        }
        outcome
    }

    async fn enrich_all_or_nothing(
        &self,
        candidates: Vec<RecipeSummary>,
        deadline: Option<Instant>,
    ) -> Result<Vec<Recipe>, AggregationError> {
        stream::iter(candidates)
            .map(|summary| async move {
                let (summary, result) = self.enrich_one(summary, deadline).await;
                result.map_err(|source| {
                    warn!(recipe_id = %summary.id, error = %source, "enrichment failed, aborting search");
                    AggregationError::Enrichment {
                        id: summary.id,
                        source,
                    }
                })
            })
            .buffered(self.config.max_concurrent_enrichments)
            .try_collect()
            .await
    }

    /// Saves every recipe not already saved (by id). Returns how many were new.
    pub fn add_saved(
        &mut self,
        recipes: impl IntoIterator<Item = Recipe>,
    ) -> Result<usize, InvariantViolation> {
        self.verify_invariants()?;
        let added = self.saved.add_all(recipes);
        self.verify_invariants()?;
        Ok(added)
    }

    pub fn remove_saved(&mut self, id: impl Into<RecipeId>) -> Result<bool, InvariantViolation> {
        self.verify_invariants()?;
        let removed = self.saved.remove(id.into());
        self.verify_invariants()?;
        Ok(removed)
    }

    pub fn clear_saved(&mut self) -> Result<(), InvariantViolation> {
        let before = self.verify_invariants();
        self.saved.clear();
        before?;
        self.verify_invariants()
    }

    pub fn saved(&self) -> &[Recipe] {
        self.saved.as_slice()
    }

    pub fn shopping_list(&self) -> Vec<String> {
        self.saved.shopping_list()
    }

    /// Always-on consistency check: unique saved ids and a usable credential.
    pub fn verify_invariants(&self) -> Result<(), InvariantViolation> {
        let result = if self.config.api_key.expose().trim().is_empty() {
            Err(InvariantViolation::MissingCredential)
        } else {
            self.saved.check_unique()
        };
        if let Err(violation) = &result {
            error!(%violation, "service invariant violated");
        }
        result
    }
}

async fn within<T>(
    deadline: Option<Instant>,
    call: impl Future<Output = Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, call)
            .await
            .unwrap_or(Err(ProviderError::Timeout)),
        None => call.await,
    }
}
