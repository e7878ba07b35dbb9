//! # medibot
//!
//! Web backend for a retrieval-augmented medical-assistant chatbot: accepts
//! patient questions (typed or transcribed from audio), retrieves relevant
//! passages from a pre-built document index, and produces a grounded answer
//! through a hosted LLM, alongside basic user registration/login.
//!
//! ## Request flow
//!
//! ```text
//! POST /chat {question, session_id?}
//!        │
//!        ▼
//! ┌──────────────┐   embed question    ┌─────────────────┐
//! │ Orchestrator │ ──────────────────▶ │  PassageIndex   │
//! │              │ ◀────────────────── │ (cosine top-k)  │
//! │              │   ranked passages   └─────────────────┘
//! │              │
//! │              │   instructions + passages + history
//! │              │ ──────────────────▶ hosted chat completion
//! │              │ ◀────────────────── answer text
//! │              │
//! │              │ ──▶ ConversationMemory (append turn)
//! └──────┬───────┘
//!        ▼
//! 200 {answer, sources}
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server, providers, and auth
//! - [`models`] - Shared data types: `Passage`, `ChatMessage`, request/response types
//! - [`error`] - Application error taxonomy mapped to HTTP status codes
//! - [`retrieval`] - Pre-built passage index with cosine similarity search
//! - [`chat::memory`] - Session-keyed conversation history
//! - [`chat::prompt`] - Prompt assembly: instructions, context block, message array
//! - [`chat::orchestrator`] - The RAG flow: retrieve → assemble → generate → remember
//! - [`llm`] - Hosted API clients: chat completion, embeddings, speech-to-text
//! - [`auth`] - User store (bcrypt password hashes) and JWT session tokens
//! - [`api`] - Axum HTTP handlers
//! - [`state`] - Shared application state built once at startup

pub mod api;
pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod retrieval;
pub mod state;
