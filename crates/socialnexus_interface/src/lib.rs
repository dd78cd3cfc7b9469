//! Trait definitions for the SocialNexus generative backends.
//!
//! The workflow crates only ever talk to a [`ContentGenerator`]; the Gemini
//! client in `socialnexus_models` is one implementation, test mocks are others.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ContentGenerator, ContentResult};
