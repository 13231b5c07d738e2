//! Capability token issuance

use crate::config::Config;
use crate::domain::shared::Result;
use crate::domain::token::{CapabilityToken, SignedToken};
use crate::infrastructure::auth::AccessTokenSigner;
use std::sync::Arc;
use tracing::info;

/// Issues signed capability tokens for the browser softphone client
pub struct TokenIssuer {
    config: Arc<Config>,
    signer: AccessTokenSigner,
}

impl TokenIssuer {
    pub fn new(config: Arc<Config>) -> Self {
        let signer = AccessTokenSigner::new(config.clone());
        Self { config, signer }
    }

    /// Issue a token for `identity`, falling back to the configured
    /// browser-client identity when none is given.
    ///
    /// The token grants both inbound and outbound calling; its expiry is
    /// enforced by the provider. Issued tokens are not stored anywhere.
    pub fn issue(&self, identity: Option<&str>) -> Result<SignedToken> {
        let identity = identity
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(&self.config.client_identity);

        let token = CapabilityToken::for_identity(identity);
        let jwt = self.signer.sign(&token)?;

        info!("Issued capability token for {}", token.identity);

        Ok(SignedToken { token, jwt })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProviderConfig, ServerConfig, DEFAULT_CLIENT_IDENTITY};
    use crate::domain::shared::DomainError;

    fn issuer_config() -> Arc<Config> {
        Arc::new(Config {
            server: ServerConfig::default(),
            provider: ProviderConfig {
                account_sid: Some("AC123".to_string()),
                auth_token: Some("auth-token".to_string()),
                api_key: Some("SK456".to_string()),
                api_secret: Some("top-secret".to_string()),
                twiml_app_sid: Some("AP789".to_string()),
                caller_number: Some("+15550001111".to_string()),
            },
            client_identity: DEFAULT_CLIENT_IDENTITY.to_string(),
        })
    }

    #[test]
    fn test_default_identity_fallback() {
        let issuer = TokenIssuer::new(issuer_config());

        for missing in [None, Some(""), Some("   ")] {
            let signed = issuer.issue(missing).unwrap();
            assert_eq!(signed.token.identity, DEFAULT_CLIENT_IDENTITY);
        }
    }

    #[test]
    fn test_explicit_identity() {
        let issuer = TokenIssuer::new(issuer_config());
        let signed = issuer.issue(Some("agent-desk-2")).unwrap();
        assert_eq!(signed.token.identity, "agent-desk-2");
        assert!(signed.token.allows_incoming());
        assert!(signed.token.allows_outgoing());
    }

    #[test]
    fn test_missing_signing_credentials() {
        let mut config = issuer_config();
        Arc::get_mut(&mut config).unwrap().provider.api_key = None;
        let issuer = TokenIssuer::new(config);

        let err = issuer.issue(None).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }
}
