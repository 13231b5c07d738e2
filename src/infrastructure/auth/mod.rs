//! Capability token signing
//!
//! Produces the provider-format JWT access token the browser SDK presents
//! when registering for calls. The token is opaque to this system: it is
//! signed here and verified by the provider alone.

use crate::config::Config;
use crate::domain::shared::{DomainError, Result};
use crate::domain::token::CapabilityToken;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Content type marker the provider requires in the JWT header
const TOKEN_CONTENT_TYPE: &str = "twilio-fpa;v=1";

/// Signs capability tokens with the configured API key pair
pub struct AccessTokenSigner {
    config: Arc<Config>,
}

impl AccessTokenSigner {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Sign `token` into the provider's access-token JWT form.
    ///
    /// Fails with a `Configuration` error when any signing credential is
    /// missing; no credential value ever appears in the error.
    pub fn sign(&self, token: &CapabilityToken) -> Result<String> {
        let provider = &self.config.provider;
        let account_sid = provider.account_sid()?;
        let api_key = provider.api_key()?;
        let api_secret = provider.api_secret()?;

        let outgoing = if token.allows_outgoing() {
            Some(OutgoingVoiceClaim {
                application_sid: provider.twiml_app_sid()?.to_string(),
            })
        } else {
            None
        };
        let incoming = token
            .allows_incoming()
            .then_some(IncomingVoiceClaim { allow: true });

        let claims = AccessTokenClaims {
            jti: format!("{}-{}", api_key, token.issued_at.timestamp()),
            iss: api_key.to_string(),
            sub: account_sid.to_string(),
            iat: token.issued_at.timestamp(),
            exp: token.expires_at.timestamp(),
            grants: GrantsClaim {
                identity: token.identity.clone(),
                voice: VoiceGrantClaim { incoming, outgoing },
            },
        };

        let mut header = Header::new(Algorithm::HS256);
        header.cty = Some(TOKEN_CONTENT_TYPE.to_string());
        header.kid = Some(api_key.to_string());

        encode(
            &header,
            &claims,
            &EncodingKey::from_secret(api_secret.as_bytes()),
        )
        .map_err(|e| DomainError::Internal(format!("token signing failed: {}", e)))
    }
}

/// Provider access-token claim layout
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub jti: String,
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub grants: GrantsClaim,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GrantsClaim {
    pub identity: String,
    pub voice: VoiceGrantClaim,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceGrantClaim {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoming: Option<IncomingVoiceClaim>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outgoing: Option<OutgoingVoiceClaim>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IncomingVoiceClaim {
    pub allow: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OutgoingVoiceClaim {
    pub application_sid: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProviderConfig, ServerConfig, DEFAULT_CLIENT_IDENTITY};
    use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};

    fn signing_config() -> Arc<Config> {
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
    fn test_signed_token_claims() {
        let signer = AccessTokenSigner::new(signing_config());
        let token = CapabilityToken::for_identity("browser-client");

        let jwt = signer.sign(&token).unwrap();

        let decoded = decode::<AccessTokenClaims>(
            &jwt,
            &DecodingKey::from_secret(b"top-secret"),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();

        let claims = decoded.claims;
        assert_eq!(claims.iss, "SK456");
        assert_eq!(claims.sub, "AC123");
        assert_eq!(claims.grants.identity, "browser-client");
        assert!(claims.grants.voice.incoming.unwrap().allow);
        assert_eq!(
            claims.grants.voice.outgoing.unwrap().application_sid,
            "AP789"
        );
        assert_eq!(claims.exp - claims.iat, token.ttl_seconds());
    }

    #[test]
    fn test_signed_token_header() {
        let signer = AccessTokenSigner::new(signing_config());
        let jwt = signer
            .sign(&CapabilityToken::for_identity("browser-client"))
            .unwrap();

        let header = decode_header(&jwt).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
        assert_eq!(header.cty.as_deref(), Some(TOKEN_CONTENT_TYPE));
        assert_eq!(header.kid.as_deref(), Some("SK456"));
    }

    #[test]
    fn test_missing_secret_is_configuration_error() {
        let mut config = signing_config();
        Arc::get_mut(&mut config).unwrap().provider.api_secret = None;
        let signer = AccessTokenSigner::new(config);

        let err = signer
            .sign(&CapabilityToken::for_identity("browser-client"))
            .unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
        assert!(!err.to_string().contains("top-secret"));
    }
}
