use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::pdf::RenderClient;
use crate::store::{CvStore, UserStore};

/// Shared application state injected into all route handlers via Axum
/// extractors. Stores are trait objects so tests can swap the Postgres
/// backends for in-memory ones.
#[derive(Clone)]
pub struct AppState {
    pub cvs: Arc<dyn CvStore>,
    pub users: Arc<dyn UserStore>,
    pub llm: LlmClient,
    pub renderer: RenderClient,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// Memory-backed state for handler tests. The HTTP clients are real but
    /// never called by the tests that use this.
    pub fn for_tests() -> Self {
        use crate::store::memory::{MemoryCvStore, MemoryUserStore};

        let config = Config::for_tests();
        AppState {
            cvs: Arc::new(MemoryCvStore::new()),
            users: Arc::new(MemoryUserStore::new()),
            llm: LlmClient::new(config.llm_api_key.clone()),
            renderer: RenderClient::new(config.renderer_url.clone()),
            config,
        }
    }
}
