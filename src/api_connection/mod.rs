pub mod connection;
pub mod endpoints;
pub mod provider;

pub use connection::{ProviderError, SpoonacularClient};
pub use provider::{RecipeProvider, SearchQuery};
