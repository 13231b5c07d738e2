//! Call control orchestration
//!
//! Each operation translates one HTTP-level intent into exactly one
//! provider operation plus an acknowledgment. Nothing is retried: a retried
//! terminate could race a provider-side state change, so a single failure
//! propagates immediately. The provider stays the source of truth for call
//! state; sessions here live only for the duration of one request.

use crate::config::Config;
use crate::domain::call::CallSession;
use crate::domain::shared::{DomainError, Result};
use crate::domain::voice_response::VoiceResponse;
use crate::infrastructure::provider::{CallMutation, CreateCallParams, TelephonyProvider};
use std::sync::Arc;
use tracing::info;

/// Paths the provider fetches call instructions from
const OUTBOUND_VOICE_PATH: &str = "/voice";
const INBOUND_VOICE_PATH: &str = "/api/receive-call";

/// Maps call lifecycle events to provider operations and voice documents
pub struct CallControlService {
    config: Arc<Config>,
    provider: Arc<dyn TelephonyProvider>,
}

impl CallControlService {
    pub fn new(config: Arc<Config>, provider: Arc<dyn TelephonyProvider>) -> Self {
        Self { config, provider }
    }

    /// Place an outbound call to `phone_number`.
    ///
    /// The provider is pointed at this system's outbound handling endpoint
    /// for instructions and presents the configured origin number as caller
    /// ID. The returned session carries the provider-assigned SID verbatim.
    pub async fn dial(&self, phone_number: &str) -> Result<CallSession> {
        let number = phone_number.trim();
        if number.is_empty() {
            return Err(DomainError::Validation(
                "Phone number is required".to_string(),
            ));
        }

        let from = self.config.provider.caller_number()?.to_string();
        let instruction_url = self.config.callback_url(OUTBOUND_VOICE_PATH)?;

        let mut session = CallSession::outbound(number);
        let handle = self
            .provider
            .create_call(CreateCallParams {
                to: number.to_string(),
                from,
                instruction_url,
            })
            .await?;
        session.assign_sid(handle.sid);

        info!(
            "Dialed {} (call SID {})",
            session.counterparty,
            session.call_sid().unwrap_or("-")
        );

        Ok(session)
    }

    /// Trigger a call from the origin number to itself, pointed at the
    /// inbound handling endpoint. Exercises the inbound path without a real
    /// external caller.
    pub async fn simulate_inbound(&self) -> Result<CallSession> {
        let caller_number = self.config.provider.caller_number()?.to_string();
        let instruction_url = self.config.callback_url(INBOUND_VOICE_PATH)?;

        let mut session = CallSession::inbound(caller_number.clone());
        let handle = self
            .provider
            .create_call(CreateCallParams {
                to: caller_number.clone(),
                from: caller_number,
                instruction_url,
            })
            .await?;
        session.assign_sid(handle.sid);

        info!(
            "Simulated inbound call (call SID {})",
            session.call_sid().unwrap_or("-")
        );

        Ok(session)
    }

    /// Document returned when an outbound call connects
    pub fn outbound_connected(&self) -> VoiceResponse {
        VoiceResponse::outbound_greeting()
    }

    /// Document routing an inbound call to the browser client
    pub fn inbound_call(&self) -> VoiceResponse {
        VoiceResponse::inbound_routing(&self.config.client_identity)
    }

    /// Mute or unmute a call leg. Fire-and-forget: the same mute state can
    /// be set twice and both requests go to the provider unchanged.
    pub async fn set_mute(&self, call_sid: &str, muted: bool) -> Result<()> {
        self.provider
            .update_call(call_sid, CallMutation::SetMuted(muted))
            .await?;
        info!("Set mute={} on call {}", muted, call_sid);
        Ok(())
    }

    /// Move a call leg to its terminated status
    pub async fn hangup(&self, call_sid: &str) -> Result<()> {
        self.provider
            .update_call(call_sid, CallMutation::Terminate)
            .await?;
        info!("Hung up call {}", call_sid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProviderConfig, ServerConfig, DEFAULT_CLIENT_IDENTITY};
    use crate::domain::call::{CallDirection, CallState};
    use crate::domain::voice_response::VoiceInstruction;
    use crate::infrastructure::provider::{CallHandle, MockTelephonyProvider};

    fn dial_config() -> Arc<Config> {
        Arc::new(Config {
            server: ServerConfig {
                public_base_url: Some("https://softphone.example.com".to_string()),
                ..ServerConfig::default()
            },
            provider: ProviderConfig {
                account_sid: Some("AC123".to_string()),
                auth_token: Some("auth-token".to_string()),
                api_key: None,
                api_secret: None,
                twiml_app_sid: None,
                caller_number: Some("+15550001111".to_string()),
            },
            client_identity: DEFAULT_CLIENT_IDENTITY.to_string(),
        })
    }

    fn service(provider: MockTelephonyProvider) -> CallControlService {
        CallControlService::new(dial_config(), Arc::new(provider))
    }

    #[tokio::test]
    async fn test_dial_requires_phone_number() {
        // No expectations: any provider call would panic the mock
        let service = service(MockTelephonyProvider::new());

        for number in ["", "   "] {
            let err = service.dial(number).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_dial_passes_sid_through() {
        let mut provider = MockTelephonyProvider::new();
        provider
            .expect_create_call()
            .withf(|params| {
                params.to == "+15551234567"
                    && params.from == "+15550001111"
                    && params.instruction_url == "https://softphone.example.com/voice"
            })
            .times(1)
            .returning(|_| {
                Ok(CallHandle {
                    sid: "CA0011".to_string(),
                })
            });

        let session = service(provider).dial("+15551234567").await.unwrap();
        assert_eq!(session.call_sid(), Some("CA0011"));
        assert_eq!(session.direction, CallDirection::Outbound);
        assert_eq!(session.state, CallState::Requested);
    }

    #[tokio::test]
    async fn test_dial_surfaces_provider_error() {
        let mut provider = MockTelephonyProvider::new();
        provider
            .expect_create_call()
            .times(1)
            .returning(|_| Err(DomainError::Provider("The 'To' number is not valid.".to_string())));

        let err = service(provider).dial("+15551234567").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Provider error: The 'To' number is not valid."
        );
    }

    #[tokio::test]
    async fn test_dial_without_caller_number() {
        let mut config = dial_config();
        Arc::get_mut(&mut config).unwrap().provider.caller_number = None;
        let service = CallControlService::new(config, Arc::new(MockTelephonyProvider::new()));

        let err = service.dial("+15551234567").await.unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_simulate_inbound_calls_own_number() {
        let mut provider = MockTelephonyProvider::new();
        provider
            .expect_create_call()
            .withf(|params| {
                params.to == "+15550001111"
                    && params.from == "+15550001111"
                    && params.instruction_url == "https://softphone.example.com/api/receive-call"
            })
            .times(1)
            .returning(|_| {
                Ok(CallHandle {
                    sid: "CA0022".to_string(),
                })
            });

        let session = service(provider).simulate_inbound().await.unwrap();
        assert_eq!(session.call_sid(), Some("CA0022"));
        assert_eq!(session.direction, CallDirection::Inbound);
    }

    #[tokio::test]
    async fn test_set_mute_forwards_mutation() {
        let mut provider = MockTelephonyProvider::new();
        provider
            .expect_update_call()
            .withf(|sid, mutation| sid == "CA0033" && *mutation == CallMutation::SetMuted(true))
            .times(1)
            .returning(|_, _| Ok(()));

        service(provider).set_mute("CA0033", true).await.unwrap();
    }

    #[tokio::test]
    async fn test_mute_is_not_deduplicated() {
        let mut provider = MockTelephonyProvider::new();
        provider
            .expect_update_call()
            .withf(|_, mutation| *mutation == CallMutation::SetMuted(false))
            .times(2)
            .returning(|_, _| Ok(()));

        let service = service(provider);
        service.set_mute("CA0033", false).await.unwrap();
        service.set_mute("CA0033", false).await.unwrap();
    }

    #[tokio::test]
    async fn test_hangup_forwards_terminate() {
        let mut provider = MockTelephonyProvider::new();
        provider
            .expect_update_call()
            .withf(|sid, mutation| sid == "CA0044" && *mutation == CallMutation::Terminate)
            .times(1)
            .returning(|_, _| Ok(()));

        service(provider).hangup("CA0044").await.unwrap();
    }

    #[tokio::test]
    async fn test_hangup_surfaces_provider_error() {
        let mut provider = MockTelephonyProvider::new();
        provider
            .expect_update_call()
            .times(1)
            .returning(|_, _| Err(DomainError::Provider("call not found".to_string())));

        let err = service(provider).hangup("").await.unwrap_err();
        assert!(matches!(err, DomainError::Provider(_)));
    }

    #[test]
    fn test_outbound_connected_is_pure() {
        let service = CallControlService::new(
            dial_config(),
            Arc::new(MockTelephonyProvider::new()),
        );
        assert_eq!(service.outbound_connected(), service.outbound_connected());
        assert_eq!(service.outbound_connected().instructions().len(), 1);
    }

    #[test]
    fn test_inbound_call_targets_configured_identity() {
        let mut config = dial_config();
        Arc::get_mut(&mut config).unwrap().client_identity = "front-desk".to_string();
        let service = CallControlService::new(config, Arc::new(MockTelephonyProvider::new()));

        let response = service.inbound_call();
        assert_eq!(
            response.instructions().last(),
            Some(&VoiceInstruction::DialClient {
                identity: "front-desk".to_string()
            })
        );
    }
}
