use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for environment overrides, nested keys separated by `__`
/// (e.g. `INBOX_SERVER__PORT=9000`).
const ENV_PREFIX: &str = "INBOX_";

/// Legacy variable name used by the automation deployment for the webhook URL.
const WEBHOOK_URL_ENV: &str = "N8N_WEBHOOK_URL";

fn with_env_overrides(figment: Figment) -> Figment {
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(
            Env::raw()
                .only(&[WEBHOOK_URL_ENV])
                .map(|_| "webhook.url".into()),
        )
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    with_env_overrides(Figment::new().merge(Toml::file(path)))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from built-in defaults and environment variables only
pub fn load_config_from_env() -> Result<Config, ConfigError> {
    with_env_overrides(Figment::new())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
