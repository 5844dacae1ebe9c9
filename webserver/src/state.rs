//! Shared application state handed to every handler

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use engine::{BatchPipeline, InMemoryStore, PipelineConfig, ProgressNotifier};
use shared::ProviderId;

/// Handler state: the store plus the engine services built over it
///
/// Cloned per request; everything inside is behind an `Arc`. Provider API
/// keys are fixed at startup from the environment.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryStore>,
    pub pipeline: Arc<BatchPipeline<InMemoryStore>>,
    pub notifier: Arc<ProgressNotifier<InMemoryStore>>,
    pub api_keys: Arc<HashMap<ProviderId, String>>,
}

impl AppState {
    /// Wire the engine services over one store
    pub fn new(
        store: Arc<InMemoryStore>,
        config: PipelineConfig,
        poll_interval: Duration,
        api_keys: HashMap<ProviderId, String>,
    ) -> Self {
        let pipeline = Arc::new(BatchPipeline::new(Arc::clone(&store), None, config));
        let notifier = Arc::new(ProgressNotifier::new(Arc::clone(&store), poll_interval));

        Self {
            store,
            pipeline,
            notifier,
            api_keys: Arc::new(api_keys),
        }
    }

    /// Configured API key for a provider, if any
    pub fn api_key(&self, provider: &ProviderId) -> Option<&str> {
        self.api_keys.get(provider).map(String::as_str)
    }
}
