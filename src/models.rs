use serde::{Deserialize, Serialize};

/// A unit of retrieved reference text, owned by the passage index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub source_id: String,
    pub text: String,
}

/// One message in the chat completion request (role is "system", "user"
/// or "assistant").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// The orchestrator's result for one question.
#[derive(Debug, Clone)]
pub struct AnswerResult {
    pub answer: String,
    pub sources: Vec<Passage>,
}

/// Chat request
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub question: String,
    /// Conversation to append to; omitted means the shared default session
    pub session_id: Option<String>,
}

/// Chat response
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub sources: Vec<Passage>,
}

/// Reset request (body is optional on the wire)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetRequest {
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptResponse {
    pub transcript: String,
}

/// Registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_question_defaults_to_empty() {
        // An absent question must deserialize (and fail validation later as
        // an empty string) instead of rejecting the body outright.
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.question.is_empty());
        assert!(req.session_id.is_none());
    }

    #[test]
    fn test_chat_request_with_session() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"question":"hi","session_id":"abc"}"#).unwrap();
        assert_eq!(req.question, "hi");
        assert_eq!(req.session_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_register_request_missing_fields_default() {
        let req: RegisterRequest = serde_json::from_str(r#"{"username":"a"}"#).unwrap();
        assert_eq!(req.username, "a");
        assert!(req.email.is_empty());
        assert!(req.password.is_empty());
    }

    #[test]
    fn test_passage_round_trips() {
        let p = Passage {
            source_id: "encyclopedia.pdf#42".into(),
            text: "Aspirin thins the blood.".into(),
        };
        let json = serde_json::to_string(&p).unwrap();
        let back: Passage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
