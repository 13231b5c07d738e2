//! Twilio Voice REST API gateway

use super::{CallHandle, CallMutation, CreateCallParams, TelephonyProvider};
use crate::config::Config;
use crate::domain::shared::{DomainError, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Production API base URL
pub const DEFAULT_API_BASE: &str = "https://api.twilio.com";

const API_VERSION: &str = "2010-04-01";

/// `TelephonyProvider` implementation backed by the Twilio Voice REST API.
///
/// One `reqwest::Client` is built at construction and reused for every
/// request. Timeouts are whatever the client defaults to; nothing is
/// enforced locally.
pub struct TwilioGateway {
    http: reqwest::Client,
    config: Arc<Config>,
    api_base: String,
}

impl TwilioGateway {
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_api_base(config, DEFAULT_API_BASE)
    }

    /// Point the gateway at a non-default API base (test servers)
    pub fn with_api_base(config: Arc<Config>, api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            api_base: api_base.into(),
        }
    }

    fn calls_url(&self, account_sid: &str) -> String {
        format!(
            "{}/{}/Accounts/{}/Calls.json",
            self.api_base, API_VERSION, account_sid
        )
    }

    fn call_instance_url(&self, account_sid: &str, call_sid: &str) -> String {
        format!(
            "{}/{}/Accounts/{}/Calls/{}.json",
            self.api_base, API_VERSION, account_sid, call_sid
        )
    }

    async fn post_form(&self, url: &str, params: &[(&str, String)]) -> Result<reqwest::Response> {
        let provider = &self.config.provider;
        let account_sid = provider.account_sid()?;
        let auth_token = provider.auth_token()?;

        debug!("Provider POST {}", url);

        let response = self
            .http
            .post(url)
            .basic_auth(account_sid, Some(auth_token))
            .form(params)
            .send()
            .await
            .map_err(|e| DomainError::Provider(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(DomainError::Provider(error_message(status, &body)))
        }
    }
}

#[async_trait::async_trait]
impl TelephonyProvider for TwilioGateway {
    async fn create_call(&self, params: CreateCallParams) -> Result<CallHandle> {
        let account_sid = self.config.provider.account_sid()?.to_string();
        let url = self.calls_url(&account_sid);
        let form = [
            ("To", params.to),
            ("From", params.from),
            ("Url", params.instruction_url),
        ];

        let response = self.post_form(&url, &form).await?;
        let resource: CallResource = response
            .json()
            .await
            .map_err(|e| DomainError::Provider(format!("unreadable call resource: {}", e)))?;

        Ok(CallHandle { sid: resource.sid })
    }

    async fn update_call(&self, call_sid: &str, mutation: CallMutation) -> Result<()> {
        let account_sid = self.config.provider.account_sid()?.to_string();
        let url = self.call_instance_url(&account_sid, call_sid);
        let form = mutation.form_params();

        self.post_form(&url, &form).await?;
        Ok(())
    }
}

/// Subset of the provider's call resource this system reads
#[derive(Debug, Deserialize)]
struct CallResource {
    sid: String,
}

/// Error payload the provider returns on failed requests
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Normalize a failed provider response into a single message, preferring
/// the provider's own `message` field when the body carries one.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ProviderErrorBody>(body) {
        Ok(error) => error.message,
        Err(_) => format!("provider returned {}", status),
    }
}
