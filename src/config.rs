use std::env;
use std::path::PathBuf;

/// Environment-provided configuration. Everything has a local-development
/// default; the two SDK keys are public client keys, not secrets.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub maps_api_key: Option<String>,
    pub stripe_publishable_key: Option<String>,
    pub token_file: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("STAYHUB_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            maps_api_key: env::var("STAYHUB_MAPS_KEY").ok(),
            stripe_publishable_key: env::var("STAYHUB_STRIPE_KEY").ok(),
            token_file: env::var("STAYHUB_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".stayhub_token")),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
