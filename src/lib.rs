pub mod api_connection;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod pantry;
pub mod recipe;
pub mod recipe_aggregator;
pub mod saved;

pub use api_connection::{ProviderError, RecipeProvider, SearchQuery, SpoonacularClient};
pub use config::{ApiKey, ClientConfig, EnrichmentPolicy, Ranking, ServiceConfig};
pub use errors::{AggregationError, ConfigurationError, InvariantViolation};
pub use recipe::{Nutrition, Recipe, RecipeDetails, RecipeId, RecipeSummary};
pub use recipe_aggregator::{EnrichmentFailure, RecipeAggregationService, RecipeSearchOutcome};
pub use saved::SavedRecipeSet;
