//! Shared types for the content generation pipeline
//!
//! Contains the domain model used by both the engine and the web layer:
//! identifiers, item/batch records and their statuses, provider identifiers
//! and failure reasons. Component-internal types (engine configuration,
//! wire DTOs) are kept in their respective crates.

pub mod logging;
pub mod types;

pub use types::*;
