//! Service implementations backing the engine traits

pub mod memory_store;
pub mod providers;

pub use memory_store::InMemoryStore;
pub use providers::{AnthropicAdapter, GeminiAdapter, OpenAIAdapter, create_adapter};
