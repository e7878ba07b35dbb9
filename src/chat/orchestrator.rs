use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::chat::memory::{ConversationMemory, Turn};
use crate::chat::prompt;
use crate::config::LlmConfig;
use crate::error::AppError;
use crate::models::{AnswerResult, ChatMessage, Passage};
use crate::retrieval::PassageIndex;

/// Longest question accepted into a prompt.
const MAX_QUESTION_LEN: usize = 2_000;

/// Finds the passages most relevant to a question.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<Passage>>;
}

/// Produces answer text from an assembled message array.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String>;
}

/// Production retriever: embed the question via the hosted API, then search
/// the in-process passage index.
pub struct EmbeddingRetriever {
    client: reqwest::Client,
    config: LlmConfig,
    index: Arc<PassageIndex>,
}

impl EmbeddingRetriever {
    pub fn new(client: reqwest::Client, config: LlmConfig, index: Arc<PassageIndex>) -> Self {
        Self {
            client,
            config,
            index,
        }
    }
}

#[async_trait]
impl Retriever for EmbeddingRetriever {
    async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<Passage>> {
        let embedding =
            crate::llm::embeddings::embed_single(&self.client, &self.config, question).await?;
        Ok(self.index.search(&embedding, k))
    }
}

/// Production generator: hosted chat completion.
pub struct ChatCompletionGenerator {
    client: reqwest::Client,
    config: LlmConfig,
}

impl ChatCompletionGenerator {
    pub fn new(client: reqwest::Client, config: LlmConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Generator for ChatCompletionGenerator {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        crate::llm::chat::complete_chat(&self.client, &self.config, messages).await
    }
}

/// Coordinates one question through retrieval, prompt assembly, generation
/// and memory.
pub struct Orchestrator {
    retriever: Arc<dyn Retriever>,
    generator: Arc<dyn Generator>,
    memory: ConversationMemory,
    top_k: usize,
    max_history_turns: usize,
}

impl Orchestrator {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        generator: Arc<dyn Generator>,
        top_k: usize,
        max_history_turns: usize,
    ) -> Self {
        Self {
            retriever,
            generator,
            memory: ConversationMemory::new(),
            top_k,
            max_history_turns,
        }
    }

    /// Answer one question within a session.
    ///
    /// A generation failure surfaces immediately and leaves the session
    /// history untouched; only a successful answer appends a turn. There is
    /// no retry or caching of any external call.
    pub async fn answer(&self, session: &str, question: &str) -> Result<AnswerResult, AppError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::Validation("Question is required".to_string()));
        }
        let question =
            prompt::sanitize_for_prompt(&prompt::truncate_to_char_boundary(question, MAX_QUESTION_LEN));

        let history = self.memory.snapshot(session);

        let passages = self
            .retriever
            .retrieve(&question, self.top_k)
            .await
            .map_err(AppError::Retrieval)?;

        let context_block = prompt::build_context_block(&passages);
        let recent = prompt::recent_history(&history, self.max_history_turns);
        let messages =
            prompt::build_messages(prompt::build_system_prompt(), recent, &context_block, &question);

        let answer = self
            .generator
            .complete(messages)
            .await
            .map_err(AppError::Generation)?;

        self.memory.append(
            session,
            Turn {
                question,
                answer: answer.clone(),
            },
        );

        Ok(AnswerResult {
            answer,
            sources: passages,
        })
    }

    /// Forget the session's history.
    pub fn reset(&self, session: &str) {
        self.memory.clear(session);
    }

    /// Current history of a session, oldest first.
    pub fn history(&self, session: &str) -> Vec<Turn> {
        self.memory.snapshot(session)
    }
}
