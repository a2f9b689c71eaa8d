use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;

use crate::errors::ConfigurationError;

pub const API_KEY_ENV_VAR: &str = "SPOONACULAR_API_KEY";
pub const BASE_URL_ENV_VAR: &str = "SPOONACULAR_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

pub const DEFAULT_RESULT_LIMIT: usize = 6;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Opaque provider credential. Never empty once constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigurationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigurationError::EmptyApiKey);
        }
        Ok(ApiKey(key))
    }

    pub fn from_env(var_name: &str) -> Result<Self, ConfigurationError> {
        dotenv().ok();
        let key = env::var(var_name)
            .map_err(|_| ConfigurationError::MissingApiKey(var_name.to_string()))?;
        ApiKey::new(key)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// How search results are ranked. Values are the provider's `ranking` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum Ranking {
    /// Prefer recipes that use as many of the given ingredients as possible.
    MaximizeUsed,
    /// Prefer recipes that need as few extra ingredients as possible.
    #[default]
    MinimizeMissing,
}

impl Ranking {
    pub fn code(self) -> u8 {
        match self {
            Ranking::MaximizeUsed => 1,
            Ranking::MinimizeMissing => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnrichmentPolicy {
    /// Collect per-recipe enrichment failures and return the rest.
    #[default]
    Isolate,
    /// Abort the whole search on the first enrichment failure.
    FailFast,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub api_key: ApiKey,
    pub ranking: Ranking,
    pub result_limit: usize,
    pub max_concurrent_enrichments: usize,
    pub request_timeout: Option<Duration>,
    pub enrichment_policy: EnrichmentPolicy,
}

impl ServiceConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigurationError> {
        Ok(Self::with_key(ApiKey::new(api_key)?))
    }

    pub fn with_key(api_key: ApiKey) -> Self {
        Self {
            api_key,
            ranking: Ranking::default(),
            result_limit: DEFAULT_RESULT_LIMIT,
            max_concurrent_enrichments: DEFAULT_RESULT_LIMIT,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            enrichment_policy: EnrichmentPolicy::default(),
        }
    }

    /// Loads `.env` if present and reads the key from `SPOONACULAR_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Ok(Self::with_key(ApiKey::from_env(API_KEY_ENV_VAR)?))
    }

    pub fn with_ranking(mut self, ranking: Ranking) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    pub fn with_max_concurrent_enrichments(mut self, max: usize) -> Self {
        self.max_concurrent_enrichments = max;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_enrichment_policy(mut self, policy: EnrichmentPolicy) -> Self {
        self.enrichment_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.api_key.expose().trim().is_empty() {
            return Err(ConfigurationError::EmptyApiKey);
        }
        if self.result_limit == 0 {
            return Err(ConfigurationError::InvalidSetting {
                name: "result_limit",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_concurrent_enrichments == 0 {
            return Err(ConfigurationError::InvalidSetting {
                name: "max_concurrent_enrichments",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Transport settings for the Spoonacular HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub http_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenv().ok();
        let base_url = env::var(BASE_URL_ENV_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }
}
