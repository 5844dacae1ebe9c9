//! HTTP surface for the content generation pipeline
//!
//! A thin axum layer over the engine crate: camelCase wire DTOs in and
//! out, one handler per route, and engine errors mapped onto HTTP
//! statuses with a `{"error": ...}` envelope.

pub mod error;
pub mod state;
pub mod types;
pub mod web;

// Re-export main types
pub use error::{ApiError, ApiResult};
pub use state::AppState;
pub use types::*;
pub use web::build_router;
