//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the migration core and an
//! external system (the filesystem and the code-generation service).
//! Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod llm;

pub use filesystem::FileSystem;
pub use llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};
