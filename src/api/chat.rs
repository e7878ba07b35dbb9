use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use crate::api::DEFAULT_SESSION;
use crate::error::AppError;
use crate::models::{ChatRequest, ChatResponse, ResetRequest, ResetResponse};
use crate::state::AppState;

/// POST /chat — answer one question with retrieved context and the
/// session's conversation history.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    // Bound concurrent generations; excess requests queue here.
    let _permit = state
        .chat_semaphore
        .clone()
        .acquire_owned()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("chat semaphore closed: {e}")))?;

    let session = session_or_default(req.session_id.as_deref());
    let result = state.orchestrator.answer(&session, &req.question).await?;

    Ok(Json(ChatResponse {
        answer: result.answer,
        sources: result.sources,
    }))
}

/// POST /reset — forget a session's conversation history. The body is
/// optional; without one the shared default session is cleared.
pub async fn reset(State(state): State<AppState>, body: Bytes) -> Json<ResetResponse> {
    let session_id = serde_json::from_slice::<ResetRequest>(&body)
        .ok()
        .and_then(|r| r.session_id);
    let session = session_or_default(session_id.as_deref());

    state.orchestrator.reset(&session);

    Json(ResetResponse {
        success: true,
        message: "Memory reset.".to_string(),
    })
}

fn session_or_default(session_id: Option<&str>) -> String {
    match session_id.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => DEFAULT_SESSION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_defaults_when_absent() {
        assert_eq!(session_or_default(None), DEFAULT_SESSION);
    }

    #[test]
    fn test_session_defaults_when_blank() {
        assert_eq!(session_or_default(Some("   ")), DEFAULT_SESSION);
    }

    #[test]
    fn test_session_passes_through() {
        assert_eq!(session_or_default(Some("alice")), "alice");
    }
}
