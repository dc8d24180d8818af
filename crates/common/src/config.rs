use serde::Deserialize;

use crate::error::AppError;

/// Default Resend API endpoint for email delivery.
pub const DEFAULT_MAIL_API_URL: &str = "https://api.resend.com";

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection string
    pub database_url: String,

    /// Resend API key for email delivery
    pub resend_api_key: String,

    /// Email sender address
    pub email_from: String,

    /// Base URL of the mail provider API (default: Resend)
    pub mail_api_url: String,

    /// Timeout for a single delivery call in seconds (default: 10)
    pub mail_timeout_secs: u64,

    /// Maximum number of PostgreSQL connections in the pool (default: 20)
    pub db_max_connections: u32,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup. Split out from
    /// [`from_env`](Self::from_env) so parsing is testable without mutating
    /// process-wide environment state.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |key: &str| {
            get(key).ok_or_else(|| {
                AppError::Config(format!("{} environment variable is required", key))
            })
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            resend_api_key: required("RESEND_API_KEY")?,
            email_from: required("EMAIL_FROM")?,
            mail_api_url: get("MAIL_API_URL")
                .unwrap_or_else(|| DEFAULT_MAIL_API_URL.to_string()),
            mail_timeout_secs: get("MAIL_TIMEOUT_SECS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .map_err(|_| AppError::Config("MAIL_TIMEOUT_SECS must be a valid u64".to_string()))?,
            db_max_connections: get("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "20".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Config("DB_MAX_CONNECTIONS must be a valid u32".to_string())
                })?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_vars() -> HashMap<String, String> {
        HashMap::from([
            (
                "DATABASE_URL".to_string(),
                "postgres://localhost/courier".to_string(),
            ),
            ("RESEND_API_KEY".to_string(), "re_test".to_string()),
            ("EMAIL_FROM".to_string(), "courier@example.com".to_string()),
        ])
    }

    fn load(vars: &HashMap<String, String>) -> Result<AppConfig, AppError> {
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_applied_for_optional_vars() {
        let config = load(&base_vars()).unwrap();

        assert_eq!(config.mail_api_url, DEFAULT_MAIL_API_URL);
        assert_eq!(config.mail_timeout_secs, 10);
        assert_eq!(config.db_max_connections, 20);
    }

    #[test]
    fn test_required_vars_carried_through() {
        let config = load(&base_vars()).unwrap();

        assert_eq!(config.database_url, "postgres://localhost/courier");
        assert_eq!(config.resend_api_key, "re_test");
        assert_eq!(config.email_from, "courier@example.com");
    }

    #[test]
    fn test_missing_required_var_is_a_config_error() {
        for key in ["DATABASE_URL", "RESEND_API_KEY", "EMAIL_FROM"] {
            let mut vars = base_vars();
            vars.remove(key);

            let err = load(&vars).unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
            assert!(err.to_string().contains(key));
        }
    }

    #[test]
    fn test_optional_overrides_are_parsed() {
        let mut vars = base_vars();
        vars.insert("MAIL_API_URL".to_string(), "http://localhost:8800".to_string());
        vars.insert("MAIL_TIMEOUT_SECS".to_string(), "3".to_string());
        vars.insert("DB_MAX_CONNECTIONS".to_string(), "5".to_string());

        let config = load(&vars).unwrap();
        assert_eq!(config.mail_api_url, "http://localhost:8800");
        assert_eq!(config.mail_timeout_secs, 3);
        assert_eq!(config.db_max_connections, 5);
    }

    #[test]
    fn test_non_numeric_timeout_is_rejected() {
        let mut vars = base_vars();
        vars.insert("MAIL_TIMEOUT_SECS".to_string(), "soon".to_string());

        let err = load(&vars).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("MAIL_TIMEOUT_SECS"));
    }
}
