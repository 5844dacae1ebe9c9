//! Common test utilities for engine integration tests

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use engine::{BatchPipeline, ContentStore, Generator, GenerationRequest, GenerationResponse, InMemoryStore, PipelineConfig};
use shared::{ContentType, DraftItem, ItemId, ProviderFailure, ProviderId};

/// Scripted generator for pipeline tests
///
/// Outcomes are keyed by item title, which always appears in the built
/// prompt. Unscripted titles succeed with canned copy. The in-flight
/// high-water mark records how much parallelism the pipeline actually
/// used.
pub struct FakeGenerator {
    outcomes: HashMap<String, Result<String, ProviderFailure>>,
    delay: Duration,
    in_flight: AtomicUsize,
    high_water: AtomicUsize,
    calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            high_water: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn fail_for(mut self, title: &str, failure: ProviderFailure) -> Self {
        self.outcomes.insert(title.to_string(), Err(failure));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Completion calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Most completion calls ever in flight at once
    pub fn high_water(&self) -> usize {
        self.high_water.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    fn provider(&self) -> ProviderId {
        ProviderId::OpenAI
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.high_water.fetch_max(in_flight, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let outcome = self
            .outcomes
            .iter()
            .find(|(title, _)| request.prompt.contains(title.as_str()))
            .map(|(_, outcome)| outcome.clone());

        match outcome {
            Some(Ok(content)) => Ok(GenerationResponse {
                content,
                tokens_used: Some(321),
            }),
            Some(Err(failure)) => Err(failure),
            None => Ok(GenerationResponse {
                content: "<h1>Generated</h1><p>Canned test copy.</p>".to_string(),
                tokens_used: Some(123),
            }),
        }
    }
}

/// Sync one draft per title and return the ids in title order
pub async fn seed_drafts(store: &InMemoryStore, titles: &[&str]) -> Vec<ItemId> {
    let drafts: Vec<DraftItem> = titles
        .iter()
        .map(|title| DraftItem {
            id: Some(ItemId::new()),
            title: title.to_string(),
            content_type: ContentType::BlogPost,
            service_area: None,
            target_audience: None,
            geolocation: None,
            target_keywords: None,
            include_cta: true,
        })
        .collect();

    let saved = store.sync_draft_items(drafts).await.expect("seeding drafts failed");
    titles
        .iter()
        .map(|title| {
            saved
                .iter()
                .find(|item| item.title == *title)
                .expect("seeded item missing")
                .id
                .clone()
        })
        .collect()
}

/// Pipeline over a fresh in-memory store with the given dispatch width
pub fn pipeline(store: &Arc<InMemoryStore>, chunk_size: usize) -> BatchPipeline<InMemoryStore> {
    BatchPipeline::new(Arc::clone(store), None, PipelineConfig { chunk_size })
}
