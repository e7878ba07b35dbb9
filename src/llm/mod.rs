//! Clients for the hosted model APIs: chat completion, question
//! embeddings, and speech-to-text.

pub mod chat;
pub mod embeddings;
pub mod transcribe;
