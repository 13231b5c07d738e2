//! Configuration management
//!
//! All configuration comes from the process environment, read once at
//! startup into an immutable `Config` that is passed explicitly to the
//! components that need it. Missing options are not an error at startup;
//! they surface as `Configuration` errors at the point of use.

use crate::domain::shared::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Default identity of the single well-known browser softphone client
pub const DEFAULT_CLIENT_IDENTITY: &str = "browser-client";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    /// Identity inbound calls are routed to and tokens are issued for
    pub client_identity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Publicly reachable base URL, used to build the callback URLs the
    /// provider fetches call instructions from
    pub public_base_url: Option<String>,
}

/// Telephony provider credentials and identifiers
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub twiml_app_sid: Option<String>,
    /// Origin phone number used as caller ID for outbound calls
    pub caller_number: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            public_base_url: None,
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: env_var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: env_var("PORT")
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(3000),
                public_base_url: env_var("SERVER_BASE_URL"),
            },
            provider: ProviderConfig {
                account_sid: env_var("TWILIO_ACCOUNT_SID"),
                auth_token: env_var("TWILIO_AUTH_TOKEN"),
                api_key: env_var("TWILIO_API_KEY"),
                api_secret: env_var("TWILIO_API_SECRET"),
                twiml_app_sid: env_var("TWILIO_TWIML_APP_SID"),
                caller_number: env_var("TWILIO_PHONE_NUMBER"),
            },
            client_identity: env_var("CLIENT_IDENTITY")
                .unwrap_or_else(|| DEFAULT_CLIENT_IDENTITY.to_string()),
        }
    }

    /// Build an absolute callback URL under the public base URL
    pub fn callback_url(&self, path: &str) -> Result<String> {
        let base = self
            .server
            .public_base_url
            .as_deref()
            .ok_or_else(|| DomainError::Configuration("SERVER_BASE_URL".to_string()))?;
        Ok(format!("{}{}", base.trim_end_matches('/'), path))
    }
}

impl ProviderConfig {
    pub fn account_sid(&self) -> Result<&str> {
        require(&self.account_sid, "TWILIO_ACCOUNT_SID")
    }

    pub fn auth_token(&self) -> Result<&str> {
        require(&self.auth_token, "TWILIO_AUTH_TOKEN")
    }

    pub fn api_key(&self) -> Result<&str> {
        require(&self.api_key, "TWILIO_API_KEY")
    }

    pub fn api_secret(&self) -> Result<&str> {
        require(&self.api_secret, "TWILIO_API_SECRET")
    }

    pub fn twiml_app_sid(&self) -> Result<&str> {
        require(&self.twiml_app_sid, "TWILIO_TWIML_APP_SID")
    }

    pub fn caller_number(&self) -> Result<&str> {
        require(&self.caller_number, "TWILIO_PHONE_NUMBER")
    }
}

fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| DomainError::Configuration(name.to_string()))
}

/// Read an environment variable, treating empty values as unset
fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_base_url(base: &str) -> Config {
        Config {
            server: ServerConfig {
                public_base_url: Some(base.to_string()),
                ..ServerConfig::default()
            },
            provider: ProviderConfig {
                account_sid: None,
                auth_token: None,
                api_key: None,
                api_secret: None,
                twiml_app_sid: None,
                caller_number: None,
            },
            client_identity: DEFAULT_CLIENT_IDENTITY.to_string(),
        }
    }

    #[test]
    fn test_server_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 3000);
        assert!(server.public_base_url.is_none());
    }

    #[test]
    fn test_callback_url_joins_path() {
        let config = config_with_base_url("https://example.com");
        assert_eq!(
            config.callback_url("/voice").unwrap(),
            "https://example.com/voice"
        );
    }

    #[test]
    fn test_callback_url_trims_trailing_slash() {
        let config = config_with_base_url("https://example.com/");
        assert_eq!(
            config.callback_url("/api/receive-call").unwrap(),
            "https://example.com/api/receive-call"
        );
    }

    #[test]
    fn test_missing_base_url_is_configuration_error() {
        let mut config = config_with_base_url("unused");
        config.server.public_base_url = None;
        let err = config.callback_url("/voice").unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn test_missing_credential_names_the_option() {
        let config = config_with_base_url("https://example.com");
        let err = config.provider.account_sid().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: missing TWILIO_ACCOUNT_SID"
        );
    }
}
