use thiserror::Error;

use crate::api_connection::connection::ProviderError;
use crate::recipe::RecipeId;

/// Misconfiguration detected while building a service. Not retryable.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),
    #[error("API key is empty")]
    EmptyApiKey,
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

/// Internal consistency check failure. Indicates a defect, not bad input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("saved recipes contain duplicate id {0}")]
    DuplicateSavedRecipe(RecipeId),
    #[error("provider credential is missing or blank")]
    MissingCredential,
}

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("recipe search failed: {0}")]
    Search(#[source] ProviderError),
    #[error("enrichment failed for recipe {id}: {source}")]
    Enrichment {
        id: RecipeId,
        #[source]
        source: ProviderError,
    },
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl AggregationError {
    /// Id of the recipe whose enrichment failed, if the failure was per-item.
    pub fn failed_recipe(&self) -> Option<RecipeId> {
        match self {
            AggregationError::Enrichment { id, .. } => Some(*id),
            _ => None,
        }
    }
}
