//! Content-generation engine
//!
//! This library fans batches of content items out to LLM providers with
//! bounded concurrency, tracks per-item and per-batch lifecycle state,
//! isolates per-item failures, and retries only the failed remainder of
//! a batch on request.

pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use crate::core::{BatchPipeline, ItemProcessor, ProgressEvent, ProgressNotifier};
pub use crate::core::{PROMPT_TEMPLATES, TopicRequest, build_content_prompt, build_topic_prompt, suggest_topics};
pub use error::{EngineError, EngineResult};
pub use services::{InMemoryStore, create_adapter};
pub use traits::*;
pub use types::*;
