//! Request handlers, one module per route group

pub mod batches;
pub mod generate;
pub mod health;
pub mod items;
pub mod topics;
