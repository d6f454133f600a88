// Client configuration: base URL and bearer token.
//
// The values below are placeholders and must be edited (or overridden via
// `GESTOR_API_URL` / `GESTOR_API_TOKEN`) before the CLI will talk to a
// server. Validation happens once, in `main`, never inside the client.

use crate::error::ConfigError;

/// Base URL of the deployed app, e.g. `https://my-app.vercel.app`.
pub const BASE_URL: &str = "https://TU_APP.vercel.app";
/// Token generated in the app under Settings > API & Developers.
pub const API_TOKEN: &str = "sk_live_TU_TOKEN_AQUI";

const URL_PLACEHOLDER: &str = "TU_APP";
const TOKEN_PLACEHOLDER: &str = "TU_TOKEN";

pub const URL_ENV: &str = "GESTOR_API_URL";
pub const TOKEN_ENV: &str = "GESTOR_API_TOKEN";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub token: String,
}

impl Config {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Config {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Build from the compiled-in constants, letting the environment
    /// variables `GESTOR_API_URL` and `GESTOR_API_TOKEN` override them.
    pub fn from_env() -> Self {
        let base_url = std::env::var(URL_ENV).unwrap_or_else(|_| BASE_URL.into());
        let token = std::env::var(TOKEN_ENV).unwrap_or_else(|_| API_TOKEN.into());
        Config::new(base_url, token)
    }

    /// Reject configurations that still carry the shipped placeholders.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.contains(URL_PLACEHOLDER) {
            return Err(ConfigError::Placeholder { field: "base URL" });
        }
        if self.token.contains(TOKEN_PLACEHOLDER) {
            return Err(ConfigError::Placeholder { field: "API token" });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(BASE_URL, API_TOKEN)
    }
}
