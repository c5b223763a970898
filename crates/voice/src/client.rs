//! HTTP client for the voice-cloning provider.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::json;

/// Locale used for trained voices.
const VOICE_LOCALE: &str = "en-US";

/// Output format requested from the synthesis endpoint.
const OUTPUT_FORMAT: &str = "audio-16khz-32kbitrate-mono-mp3";

/// Errors that can occur when talking to the voice service.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("Voice service transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Voice service returned {status}: {body}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Configuration for the voice-cloning client.
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// Subscription key sent with every request.
    pub api_key: String,
    /// Service region (selects the endpoint hosts).
    pub region: String,
}

impl VoiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless both `VOICE_API_KEY` and `VOICE_REGION` are
    /// set, signalling that the integration is disabled.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("VOICE_API_KEY").ok()?;
        let region = std::env::var("VOICE_REGION").ok()?;
        Some(Self { api_key, region })
    }
}

/// Client for the provider's training and synthesis endpoints.
pub struct VoiceClient {
    config: VoiceConfig,
    http: reqwest::Client,
}

impl VoiceClient {
    /// Create a new client with the given configuration.
    pub fn new(config: VoiceConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn training_url(&self) -> String {
        format!(
            "https://{}.customvoice.api.speech.microsoft.com/api/texttospeech/v3.1-preview1/voices/add",
            self.config.region
        )
    }

    fn synthesis_url(&self) -> String {
        format!(
            "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
            self.config.region
        )
    }

    /// Submit an audio sample to train a custom voice.
    ///
    /// The sample is base64-embedded in the JSON payload as the provider
    /// requires. Returns the provider's response body verbatim so the
    /// caller can relay training status to the client.
    pub async fn train_voice(
        &self,
        voice_name: &str,
        audio: &[u8],
    ) -> Result<serde_json::Value, VoiceError> {
        let body = json!({
            "name": voice_name,
            "description": "Custom trained voice",
            "locale": VOICE_LOCALE,
            "properties": {
                "VoiceData": BASE64.encode(audio),
            },
        });

        let response = self
            .http
            .post(self.training_url())
            .header("Ocp-Apim-Subscription-Key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        tracing::info!(voice_name, "voice training submitted");
        Ok(response.json().await?)
    }

    /// Synthesize speech with a trained voice, returning MP3 bytes.
    pub async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, VoiceError> {
        let response = self
            .http
            .post(self.synthesis_url())
            .header("Ocp-Apim-Subscription-Key", &self.config.api_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .body(build_ssml(text, voice_id))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Turn a non-success response into [`VoiceError::Upstream`].
async fn upstream_error(response: reqwest::Response) -> VoiceError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    VoiceError::Upstream { status, body }
}

/// Build the SSML document for a synthesis request.
fn build_ssml(text: &str, voice_id: &str) -> String {
    format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='{VOICE_LOCALE}'>\
         <voice name='{}'>{}</voice></speak>",
        escape_xml(voice_id),
        escape_xml(text),
    )
}

/// Escape the five XML special characters in user-supplied text.
fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}
