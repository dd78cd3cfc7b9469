//! Gemini REST client for the SocialNexus content wizard.
//!
//! [`GeminiClient`] implements [`socialnexus_interface::ContentGenerator`] on
//! top of the `generateContent` endpoint. Each trait method is exactly one
//! HTTP request; replies are validated here so callers only ever see a
//! well-formed [`socialnexus_core::MarketAnalysis`] or six well-formed drafts.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod metrics;

pub use gemini::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GeminiClient,
    GenerationConfig, GroundingChunk, GroundingMetadata, ImageConfig, InlineData,
    InlineDataPart, Part, TextPart, Tool, UsageMetadata, WebSource, draft_prompt,
    draft_schema, research_prompt, research_schema,
};
pub use metrics::{LlmMetrics, classify_error};
