use std::sync::Arc;

use crate::auth::token::TokenManager;
use crate::auth::users::UserStore;
use crate::chat::orchestrator::{ChatCompletionGenerator, EmbeddingRetriever, Orchestrator};
use crate::config::Config;
use crate::retrieval::PassageIndex;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub orchestrator: Arc<Orchestrator>,
    pub users: Arc<UserStore>,
    pub tokens: Arc<TokenManager>,
    pub http_client: reqwest::Client,
    pub chat_semaphore: Arc<tokio::sync::Semaphore>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        // Hosted calls share one client; its timeouts bound every external
        // request so a hung upstream cannot hang a handler forever.
        let http_client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        // The index is required at startup; failing to load it is fatal.
        let index = Arc::new(PassageIndex::load(&config.index_path())?);
        tracing::info!(
            "Loaded {} passages from {}",
            index.len(),
            config.index_path().display()
        );
        if let Some(dim) = index.embedding_dim() {
            if dim != config.llm.embedding_dim {
                tracing::warn!(
                    "Index embeddings are {dim}-dimensional but LLM_EMBEDDING_DIM is {}; \
                     retrieval will return nothing until they match",
                    config.llm.embedding_dim
                );
            }
        }

        let users = Arc::new(UserStore::open_or_create(&config.users_path())?);

        let retriever = Arc::new(EmbeddingRetriever::new(
            http_client.clone(),
            config.llm.clone(),
            index,
        ));
        let generator = Arc::new(ChatCompletionGenerator::new(
            http_client.clone(),
            config.llm.clone(),
        ));
        let orchestrator = Arc::new(Orchestrator::new(
            retriever,
            generator,
            config.top_k,
            config.max_history_turns,
        ));

        let tokens = Arc::new(TokenManager::new(
            &config.auth.jwt_secret,
            config.auth.token_expiry_secs,
        ));
        let max_concurrent_chats = config.max_concurrent_chats;

        Ok(Self {
            config,
            orchestrator,
            users,
            tokens,
            http_client,
            chat_semaphore: Arc::new(tokio::sync::Semaphore::new(max_concurrent_chats)),
        })
    }
}
