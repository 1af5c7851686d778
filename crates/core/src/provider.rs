pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Environment variable the front end reads the API key from.
pub const API_KEY_ENV_VAR: &str = "ANTHROPIC_API_KEY";

/// Connection settings for the analysis provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub api_version: String,
    /// Forwarded verbatim when present. A missing key is not checked locally;
    /// the provider's rejection surfaces as a request failure.
    pub api_key: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key: None,
        }
    }
}

impl ProviderConfig {
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
