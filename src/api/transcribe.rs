use axum::extract::{Multipart, State};
use axum::Json;

use crate::error::AppError;
use crate::llm::transcribe::transcribe as stt_transcribe;
use crate::models::TranscriptResponse;
use crate::state::AppState;

/// POST /transcribe — convert an uploaded audio file (multipart field
/// `audio`) to text via the hosted speech-to-text API. A missing or empty
/// field is rejected before the provider is ever contacted.
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscriptResponse>, AppError> {
    let mut audio: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("audio") {
            // bytes() consumes the field, so grab the filename first
            let filename = field
                .file_name()
                .unwrap_or("audio.wav")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read audio field: {e}")))?;
            audio = Some((data.to_vec(), filename));
            break;
        }
    }

    let (data, filename) = match audio {
        Some((data, _)) if data.is_empty() => {
            return Err(AppError::Validation("No audio file uploaded".to_string()))
        }
        Some(pair) => pair,
        None => return Err(AppError::Validation("No audio file uploaded".to_string())),
    };

    tracing::debug!("Audio file received: {filename} ({} bytes)", data.len());

    let transcript = stt_transcribe(&state.http_client, &state.config.stt, data, &filename)
        .await
        .map_err(AppError::Transcription)?;

    Ok(Json(TranscriptResponse { transcript }))
}
