use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the passage index and user records are stored
    pub data_dir: PathBuf,
    /// Server bind address
    pub bind_addr: String,
    /// LLM provider configuration (chat + query embeddings)
    pub llm: LlmConfig,
    /// Speech-to-text provider configuration
    pub stt: SttConfig,
    /// Session token configuration
    pub auth: AuthConfig,
    /// Number of passages retrieved per question
    pub top_k: usize,
    /// Maximum prior turns included in a prompt (0 = unlimited)
    pub max_history_turns: usize,
    /// Maximum concurrent chat generations
    pub max_concurrent_chats: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "ollama" or "openai"
    pub provider: String,
    /// Base URL for the LLM API
    pub base_url: String,
    /// Model name for answer generation
    pub chat_model: String,
    /// Model name for question embeddings
    pub embedding_model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
    /// Embedding vector dimension
    pub embedding_dim: usize,
    /// Sampling temperature for answer generation
    pub temperature: f32,
    /// Completion token cap
    pub max_tokens: u32,
}

/// Configuration for the hosted speech-to-text API (OpenAI-compatible
/// `/v1/audio/transcriptions`, e.g. Groq Whisper).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SttConfig {
    /// Base URL for the transcription API
    pub base_url: String,
    /// Transcription model name
    pub model: String,
    /// API key
    pub api_key: Option<String>,
    /// Spoken language hint
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for signing session tokens
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_expiry_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            bind_addr: "127.0.0.1:8000".to_string(),
            llm: LlmConfig::default(),
            stt: SttConfig::default(),
            auth: AuthConfig::default(),
            top_k: 7,
            max_history_turns: 10,
            max_concurrent_chats: 3,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            base_url: "http://localhost:11434".to_string(),
            chat_model: "llama3.2".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            api_key: None,
            embedding_dim: 768,
            temperature: 0.4,
            max_tokens: 512,
        }
    }
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai".to_string(),
            model: "whisper-large-v3-turbo".to_string(),
            api_key: None,
            language: "en".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "super-secret-key".to_string(),
            token_expiry_secs: 7 * 24 * 60 * 60,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("MEDIBOT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(addr) = std::env::var("MEDIBOT_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(val) = std::env::var("MEDIBOT_TOP_K") {
            if let Ok(v) = val.parse() {
                config.top_k = v;
            }
        }
        if let Ok(val) = std::env::var("MEDIBOT_MAX_HISTORY_TURNS") {
            if let Ok(v) = val.parse() {
                config.max_history_turns = v;
            }
        }
        if let Ok(val) = std::env::var("MEDIBOT_MAX_CONCURRENT_CHATS") {
            if let Ok(v) = val.parse() {
                config.max_concurrent_chats = v;
            }
        }

        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            config.llm.provider = provider;
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            config.llm.base_url = url;
        }
        if let Ok(model) = std::env::var("LLM_CHAT_MODEL") {
            config.llm.chat_model = model;
        }
        if let Ok(model) = std::env::var("LLM_EMBEDDING_MODEL") {
            config.llm.embedding_model = model;
        }
        if let Ok(key) = std::env::var("LLM_API_KEY") {
            config.llm.api_key = Some(key);
        }
        if let Ok(dim) = std::env::var("LLM_EMBEDDING_DIM") {
            if let Ok(d) = dim.parse() {
                config.llm.embedding_dim = d;
            }
        }
        if let Ok(val) = std::env::var("LLM_TEMPERATURE") {
            if let Ok(t) = val.parse() {
                config.llm.temperature = t;
            }
        }
        if let Ok(val) = std::env::var("LLM_MAX_TOKENS") {
            if let Ok(n) = val.parse() {
                config.llm.max_tokens = n;
            }
        }

        if let Ok(url) = std::env::var("STT_BASE_URL") {
            config.stt.base_url = url;
        }
        if let Ok(model) = std::env::var("STT_MODEL") {
            config.stt.model = model;
        }
        if let Ok(key) = std::env::var("STT_API_KEY") {
            config.stt.api_key = Some(key);
        }
        if let Ok(lang) = std::env::var("STT_LANGUAGE") {
            config.stt.language = lang;
        }

        if let Ok(secret) = std::env::var("MEDIBOT_JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Ok(val) = std::env::var("MEDIBOT_TOKEN_EXPIRY_SECS") {
            if let Ok(v) = val.parse() {
                config.auth.token_expiry_secs = v;
            }
        }

        config
    }

    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join("passages.json")
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }
}
