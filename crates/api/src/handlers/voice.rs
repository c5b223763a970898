//! Handlers for the voice-cloning integration.
//!
//! Thin relay to the hosted voice service: `/voice/train` forwards an
//! uploaded audio sample, `/voice/generate` synthesizes speech and serves
//! the MP3 back from the upload directory.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use carelink_core::uploads::{validate_extension, validate_size, AUDIO_EXTENSIONS};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::uploads::save_generated;

/// Voice used when the client does not name one.
const DEFAULT_VOICE_ID: &str = "MyCustomVoice";

/// Request body for `POST /voice/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateVoiceRequest {
    pub text: String,
    pub voice_id: Option<String>,
}

/// Response for `POST /voice/generate`.
#[derive(Debug, Serialize)]
pub struct GeneratedVoice {
    /// Public path of the stored MP3.
    pub audio_url: String,
}

/// POST /api/v1/voice/train
///
/// Multipart with a `file` audio sample and an optional `voice_name`
/// text field. The provider's response is relayed verbatim.
pub async fn train(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let client = state.voice.clone().ok_or_else(|| {
        AppError::ServiceUnavailable("Voice cloning is not configured".into())
    })?;

    let mut voice_name = DEFAULT_VOICE_ID.to_string();
    let mut audio: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "voice_name" => {
                voice_name = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "file" => {
                let original = field.file_name().unwrap_or("sample").to_string();
                validate_extension(&original, AUDIO_EXTENSIONS)?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                validate_size(data.len())?;
                audio = Some(data.to_vec());
            }
            _ => {}
        }
    }

    let audio = audio.ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;

    let upstream = client.train_voice(&voice_name, &audio).await?;
    Ok(Json(DataResponse { data: upstream }))
}

/// POST /api/v1/voice/generate
///
/// Synthesizes `text` with the named voice, stores the MP3 under the
/// upload directory, and returns its public URL.
pub async fn generate(
    State(state): State<AppState>,
    Json(input): Json<GenerateVoiceRequest>,
) -> AppResult<Json<GeneratedVoice>> {
    let client = state.voice.clone().ok_or_else(|| {
        AppError::ServiceUnavailable("Voice cloning is not configured".into())
    })?;

    if input.text.trim().is_empty() {
        return Err(AppError::BadRequest("No text provided".into()));
    }
    let voice_id = input.voice_id.unwrap_or_else(|| DEFAULT_VOICE_ID.to_string());

    let audio = client.synthesize(&input.text, &voice_id).await?;

    let saved = save_generated(&state.config.upload_dir, "output", "mp3", &audio).await?;
    Ok(Json(GeneratedVoice {
        audio_url: saved.public_path,
    }))
}
