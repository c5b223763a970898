//! OTP delivery via a transactional SMS gateway.
//!
//! [`SmsClient`] wraps the gateway's JSON-over-HTTPS sending endpoint.
//! Configuration is loaded from environment variables; if `SMS_API_URL` is
//! not set, [`SmsConfig::from_env`] returns `None` and no client should be
//! constructed.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for SMS delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("SMS transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway accepted the request but reported a delivery failure.
    #[error("SMS gateway rejected the message: {0}")]
    Rejected(String),
}

// ---------------------------------------------------------------------------
// SmsConfig
// ---------------------------------------------------------------------------

/// Configuration for the SMS gateway client.
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Gateway sending endpoint.
    pub api_url: String,
    /// Gateway account username.
    pub username: String,
    /// Gateway API key.
    pub api_key: String,
    /// Registered sender name shown to recipients.
    pub sender_name: String,
}

impl SmsConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMS_API_URL` is not set, signalling that SMS
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable          | Required | Default      |
    /// |-------------------|----------|--------------|
    /// | `SMS_API_URL`     | yes      | —            |
    /// | `SMS_USERNAME`    | no       | empty        |
    /// | `SMS_API_KEY`     | no       | empty        |
    /// | `SMS_SENDER_NAME` | no       | `"carelink"` |
    pub fn from_env() -> Option<Self> {
        let api_url = std::env::var("SMS_API_URL").ok()?;
        Some(Self {
            api_url,
            username: std::env::var("SMS_USERNAME").unwrap_or_default(),
            api_key: std::env::var("SMS_API_KEY").unwrap_or_default(),
            sender_name: std::env::var("SMS_SENDER_NAME")
                .unwrap_or_else(|_| "carelink".to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// SmsClient
// ---------------------------------------------------------------------------

/// Request body expected by the gateway's sending endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendRequest<'a> {
    user_name: &'a str,
    apikey: &'a str,
    mobile_number: &'a str,
    campaign_id: &'a str,
    sender_name: &'a str,
    transaction_type: &'a str,
    message: String,
}

/// The subset of the gateway response we act on.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendResponse {
    status_code: String,
    #[serde(default)]
    response_result: String,
}

/// Sends one-time codes through the SMS gateway.
pub struct SmsClient {
    config: SmsConfig,
    http: reqwest::Client,
}

impl SmsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SmsConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Send a one-time code to a mobile number.
    ///
    /// The gateway signals failure in-band with a non-"200" `statusCode`,
    /// which is mapped to [`SmsError::Rejected`].
    pub async fn send_otp(&self, mobile: &str, code: &str) -> Result<(), SmsError> {
        let body = SendRequest {
            user_name: &self.config.username,
            apikey: &self.config.api_key,
            mobile_number: mobile,
            campaign_id: "null",
            sender_name: &self.config.sender_name,
            // "T" = transactional message class.
            transaction_type: "T",
            message: format!("Your OTP is: {code}. Valid for 5 minutes."),
        };

        let response: SendResponse = self
            .http
            .post(&self.config.api_url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.status_code != "200" {
            return Err(SmsError::Rejected(response.response_result));
        }

        tracing::info!(mobile, "OTP SMS dispatched");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
