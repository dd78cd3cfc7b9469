//! Error types for the SocialNexus content wizard.
//!
//! This crate provides the error taxonomy shared by every SocialNexus crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The three generative failure classes (research, draft generation, image
//! render/edit) live in [`ContentErrorKind`]. Transport problems talking to the
//! Gemini API are [`GeminiError`]s and get folded into a [`ContentError`] by
//! the client before they reach an orchestrator.
//!
//! # Examples
//!
//! ```
//! use socialnexus_error::{NexusResult, PostError, PostErrorKind};
//!
//! fn schedule() -> NexusResult<()> {
//!     Err(PostError::new(PostErrorKind::EmptyPlatforms))?
//! }
//!
//! assert!(schedule().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod content;
mod error;
mod gemini;
mod json;
mod post;
mod storage;
mod workflow;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use content::{ContentError, ContentErrorKind};
pub use error::{NexusError, NexusErrorKind, NexusResult};
pub use gemini::{GeminiError, GeminiErrorKind, RetryableError};
pub use json::JsonError;
pub use post::{PostError, PostErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use workflow::{WorkflowError, WorkflowErrorKind};
