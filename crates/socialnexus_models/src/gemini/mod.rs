//! Gemini `generateContent` integration.

mod client;
mod dto;
mod prompts;

pub use client::GeminiClient;
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    GroundingChunk, GroundingMetadata, ImageConfig, InlineData, InlineDataPart, Part, TextPart,
    Tool, UsageMetadata, WebSource,
};
pub use prompts::{draft_prompt, draft_schema, research_prompt, research_schema};
