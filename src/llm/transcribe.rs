use anyhow::{Context, Result};
use reqwest::multipart;

use crate::config::SttConfig;

/// Transcribe an audio buffer via the hosted speech-to-text API
/// (OpenAI-compatible `/v1/audio/transcriptions`, e.g. Groq Whisper).
///
/// The audio bytes are held in memory for the duration of the call; there is
/// no on-disk spill to clean up on failure paths.
pub async fn transcribe(
    client: &reqwest::Client,
    config: &SttConfig,
    audio: Vec<u8>,
    filename: &str,
) -> Result<String> {
    let url = format!("{}/v1/audio/transcriptions", config.base_url);

    let part = multipart::Part::bytes(audio)
        .file_name(filename.to_string())
        .mime_str("audio/wav")
        .context("Failed to build audio form part")?;

    let form = multipart::Form::new()
        .part("file", part)
        .text("model", config.model.clone())
        .text("response_format", "text")
        .text("language", config.language.clone());

    let api_key = config.api_key.as_deref().unwrap_or_default();

    let resp = client
        .post(&url)
        .header("Authorization", format!("Bearer {api_key}"))
        .multipart(form)
        .send()
        .await
        .context("Failed to call transcription API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("Transcription API returned {status}: {body}");
    }

    // response_format=text returns the transcript as a plain-text body
    let transcript = resp
        .text()
        .await
        .context("Failed to read transcription response")?;
    Ok(transcript.trim().to_string())
}
