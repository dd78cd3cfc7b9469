//! Wire types for the Gemini `generateContent` REST endpoint.
//!
//! Field names follow the API's camelCase JSON. Only the fields SocialNexus
//! reads or writes are modelled; unknown response fields are ignored.

use serde::{Deserialize, Serialize};

//
// ─── REQUEST ────────────────────────────────────────────────────────────────
//

/// Body of a `models/{model}:generateContent` call.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents; SocialNexus always sends a single user turn
    pub contents: Vec<Content>,

    /// Generation parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,

    /// Tools available to the model
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

impl GenerateContentRequest {
    /// A request with one user turn made of the given parts.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            ..Self::default()
        }
    }

    /// Constrain the reply to JSON matching `schema`.
    pub fn with_json_schema(mut self, schema: serde_json::Value) -> Self {
        let config = self.generation_config.get_or_insert_with(Default::default);
        config.response_mime_type = Some("application/json".to_string());
        config.response_schema = Some(schema);
        self
    }

    /// Request images with the given aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        let config = self.generation_config.get_or_insert_with(Default::default);
        config.image_config = Some(ImageConfig {
            aspect_ratio: aspect_ratio.into(),
        });
        self
    }

    /// Enable Google Search grounding.
    pub fn with_google_search(mut self) -> Self {
        self.tools.push(Tool::google_search());
        self
    }
}

/// Generation configuration parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// MIME type of the reply (e.g., "application/json")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,

    /// JSON schema the reply must follow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,

    /// Image output settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

/// Image output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    /// Aspect ratio such as "1:1"
    pub aspect_ratio: String,
}

/// Tool declaration. Only Google Search grounding is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Google Search grounding; serialized as an empty object
    pub google_search: serde_json::Value,
}

impl Tool {
    /// The `{"googleSearch": {}}` tool.
    pub fn google_search() -> Self {
        Self {
            google_search: serde_json::json!({}),
        }
    }
}

/// A conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Role ("user", "model")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Content parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Content part (text, inline data, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Text content
    Text(TextPart),
    /// Inline data (images)
    InlineData(InlineDataPart),
    /// Any part kind SocialNexus does not use
    Other(serde_json::Value),
}

impl Part {
    /// A text part.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(TextPart { text: text.into() })
    }

    /// An inline data part.
    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Part::InlineData(InlineDataPart {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        })
    }
}

/// Text content part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPart {
    /// The text
    pub text: String,
}

/// Inline data content part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineDataPart {
    /// The inline payload
    pub inline_data: InlineData,
}

/// Inline data with MIME type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type, e.g. "image/png"
    #[serde(default)]
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

//
// ─── RESPONSE ───────────────────────────────────────────────────────────────
//

/// Reply from `generateContent`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate replies; SocialNexus reads only the first
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    /// Token accounting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// The first candidate, if any.
    pub fn first_candidate(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Concatenated text of the first candidate's text parts.
    pub fn text(&self) -> Option<String> {
        let candidate = self.first_candidate()?;
        let text: String = candidate
            .parts()
            .filter_map(|part| match part {
                Part::Text(TextPart { text }) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// The first inline data part of the first candidate.
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.first_candidate()?.parts().find_map(|part| match part {
            Part::InlineData(InlineDataPart { inline_data }) => Some(inline_data),
            _ => None,
        })
    }
}

/// One candidate reply.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Reply content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    /// Why generation stopped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,

    /// Search grounding details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_metadata: Option<GroundingMetadata>,
}

impl Candidate {
    /// Iterate over content parts, empty when the candidate has no content.
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.content.iter().flat_map(|content| content.parts.iter())
    }
}

/// Search grounding details.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    /// Sources the reply was grounded on
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// One grounding source.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroundingChunk {
    /// Web source; absent for other chunk kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

/// A web page used for grounding.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WebSource {
    /// Page URI
    #[serde(default)]
    pub uri: String,
    /// Page title
    #[serde(default)]
    pub title: String,
}

/// Token counts for a call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_token_count: u64,
    /// Reply tokens
    #[serde(default)]
    pub candidates_token_count: u64,
    /// Total tokens
    #[serde(default)]
    pub total_token_count: u64,
}
