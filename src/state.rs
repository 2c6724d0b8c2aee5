// src/state.rs
use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::services::metrics::MetricsManager;
use crate::services::provider::{CompletionProvider, GeminiClient};
use crate::services::sessions::SessionManager;
use crate::services::storage::{FileStore, KeyValueStore, MemoryStore};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: AppConfig,
    /// None when no provider credential is configured; the chat handler then
    /// only has the keyword fallback to offer.
    pub provider: Option<Arc<dyn CompletionProvider>>,
    pub sessions: SessionManager,
    pub metrics: MetricsManager,
    /// Outbound client for the symptom-analysis proxy.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let provider: Option<Arc<dyn CompletionProvider>> = match config.gemini_api_key.as_deref()
        {
            Some(key) => Some(Arc::new(GeminiClient::new(
                key,
                &config.gemini_model,
                &config.gemini_base_url,
            )?)),
            None => None,
        };
        Self::with_provider(config, provider)
    }

    /// Build state around an explicit provider; lets tests drive the chat
    /// pipeline with scripted providers.
    pub fn with_provider(
        config: AppConfig,
        provider: Option<Arc<dyn CompletionProvider>>,
    ) -> anyhow::Result<Self> {
        let store: Arc<dyn KeyValueStore> = match &config.store_path {
            Some(path) => Arc::new(
                FileStore::open(path)
                    .with_context(|| format!("opening session store at {}", path.display()))?,
            ),
            None => Arc::new(MemoryStore::default()),
        };
        let sessions = SessionManager::new(config.session_ttl, store);
        let http = reqwest::Client::builder()
            .user_agent("healthbot-backend/0.1")
            .build()
            .context("building http client")?;

        Ok(Self {
            config,
            provider,
            sessions,
            metrics: MetricsManager::new(),
            http,
        })
    }
}
