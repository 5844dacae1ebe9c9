//! Engine core business logic

pub mod orchestrator;
pub mod processor;
pub mod progress;
pub mod prompt;
pub mod retry;
pub mod topics;

pub use orchestrator::BatchPipeline;
pub use processor::{ItemProcessor, strip_code_fences};
pub use progress::{ProgressEvent, ProgressNotifier};
pub use prompt::{PROMPT_TEMPLATES, PromptTemplate, TopicRequest, build_content_prompt, build_topic_prompt};
pub use topics::suggest_topics;
