use crate::error::CiteError;

const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";
const TAVILY_KEY_ENV: &str = "TAVILY_API_KEY";
const SEARCH_ENDPOINT_ENV: &str = "DEEPCITE_SEARCH_ENDPOINT";

/// Process configuration sourced from the environment at startup.
///
/// Missing keys are tolerated as empty strings; failure is deferred to the
/// first collaborator call that actually needs the secret.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub gemini_api_key: String,
    pub tavily_api_key: String,
    pub search_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: std::env::var(GEMINI_KEY_ENV).unwrap_or_default(),
            tavily_api_key: std::env::var(TAVILY_KEY_ENV).unwrap_or_default(),
            search_endpoint: std::env::var(SEARCH_ENDPOINT_ENV)
                .ok()
                .filter(|value| !value.trim().is_empty()),
        }
    }

    /// Resolve a secret that has become load-bearing.
    pub fn require(value: &str, env_name: &str) -> Result<String, CiteError> {
        if value.trim().is_empty() {
            return Err(CiteError::MissingSecret(env_name.to_string()));
        }
        Ok(value.to_string())
    }

    pub fn require_tavily_key(&self) -> Result<String, CiteError> {
        Self::require(&self.tavily_api_key, TAVILY_KEY_ENV)
    }

    pub fn require_gemini_key(&self) -> Result<String, CiteError> {
        Self::require(&self.gemini_api_key, GEMINI_KEY_ENV)
    }
}
