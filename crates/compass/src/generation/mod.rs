//! AI Generation Pipeline
//!
//! Turns domain entities into completion prompts, invokes a
//! [`CompletionProvider`](crate::ports::CompletionProvider), maps the raw text
//! back into typed results, and degrades to deterministic fallback content when
//! the provider fails or returns something unparsable. Side effects are written
//! after the caller already has its result, by the deferred writer.
//!
//! Pipeline per call:
//!
//! ```text
//! request + context -> prompt -> provider -> mapper ok  -> model-derived result
//!                                         -> mapper err -> fallback result
//!                               provider err            -> fallback result
//! ```
//!
//! No branch errors out to the caller; only entity resolution at the boundary
//! can fail a request.

pub mod context;
pub mod engine;
pub mod fallback;
pub mod mapper;
pub mod persist;
pub mod prompt;
pub mod request;
pub mod result;

pub use context::*;
pub use engine::*;
pub use persist::*;
pub use prompt::CompletionPrompt;
pub use request::*;
pub use result::*;
