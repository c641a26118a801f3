use reqwest::header::HeaderValue;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Webhook URL is an http(s) URL and the timeout is non-zero
/// - CORS origins are non-empty, not `*`, and valid header values
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let url = config.webhook.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "webhook.url must be an http(s) URL, got '{}'",
            config.webhook.url
        )));
    }

    if config.webhook.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "webhook.timeout_secs cannot be 0".to_string(),
        ));
    }

    for origin in &config.cors.allowed_origins {
        validate_origin(origin)?;
    }

    Ok(())
}

/// Credentialed CORS cannot use a wildcard, so only concrete origins are accepted.
fn validate_origin(origin: &str) -> Result<(), ConfigError> {
    let trimmed = origin.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "cors.allowed_origins contains an empty entry: '{}'",
            origin
        )));
    }
    if trimmed == "*" {
        return Err(ConfigError::ValidationError(
            "cors.allowed_origins cannot contain '*' when credentials are allowed".to_string(),
        ));
    }
    if HeaderValue::from_str(trimmed).is_err() {
        return Err(ConfigError::ValidationError(format!(
            "cors.allowed_origins entry is not a valid header value: {:?}",
            origin
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = Config::default();
        config.server.port = 0;
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_non_http_webhook_fails() {
        let mut config = Config::default();
        config.webhook.url = "ftp://example.com/hook".to_string();
        assert!(validate_config(&config).is_err());

        config.webhook.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut config = Config::default();
        config.webhook.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_origin_fails() {
        let mut config = Config::default();
        config.cors.allowed_origins.push("  ".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_wildcard_origin_fails() {
        let mut config = Config::default();
        config.cors.allowed_origins = vec!["*".to_string()];
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(msg)) if msg.contains("'*'")));
    }

    #[test]
    fn test_validate_origin_with_control_character_fails() {
        let mut config = Config::default();
        config.cors.allowed_origins = vec!["http://local\u{7}host:5173".to_string()];
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_concrete_origins_pass() {
        let mut config = Config::default();
        config.cors.allowed_origins = vec![
            "https://inbox.example.com".to_string(),
            " http://localhost:3000 ".to_string(),
        ];
        assert!(validate_config(&config).is_ok());
    }
}
