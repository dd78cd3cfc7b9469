//! Gemini REST client.
//!
//! # Example
//!
//! ```no_run
//! use socialnexus_core::{BrandDetails, GeminiConfig};
//! use socialnexus_interface::ContentGenerator;
//! use socialnexus_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new(GeminiConfig::default())?;
//! let brand = BrandDetails::builder()
//!     .name("EcoSpark")
//!     .industry("Sustainable Energy")
//!     .target_audience("Homeowners")
//!     .unique_value_proposition("Installed in a day")
//!     .build()?;
//!
//! let analysis = client.perform_research(&brand).await?;
//! for pillar in analysis.content_pillars() {
//!     println!("{}: {}", pillar.title(), pillar.description());
//! }
//! # Ok(())
//! # }
//! ```

use super::dto::{GenerateContentRequest, GenerateContentResponse, Part};
use super::prompts::{draft_prompt, draft_schema, research_prompt, research_schema};
use crate::metrics::{LlmMetrics, classify_error};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use socialnexus_core::{
    BrandDetails, Citation, ContentPillar, GeminiConfig, GeneratedPost, ImagePayload,
    MarketAnalysis, POSTS_PER_RUN, PostContent, PostType,
};
use socialnexus_error::{ContentError, ContentErrorKind, GeminiError, GeminiErrorKind};
use socialnexus_interface::{ContentGenerator, ContentResult};
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

const PROVIDER: &str = "gemini";
const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Research reply as constrained by [`research_schema`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResearchReply {
    competitors_analysis: String,
    market_opportunities: String,
    brand_positioning_advice: String,
    content_pillars: Vec<ContentPillar>,
}

/// Gemini API client.
///
/// Holds one pooled HTTP client; cheap to clone and safe to share across tasks.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    config: GeminiConfig,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.config.base_url)
            .field("text_model", &self.config.text_model)
            .field("image_model", &self.config.image_model)
            .finish()
    }
}

impl GeminiClient {
    /// Create a client, resolving the API key from the config or environment.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is available or the HTTP client cannot
    /// be built.
    #[instrument(name = "gemini_client_new", skip(config), fields(text_model = %config.text_model, image_model = %config.image_model))]
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        let api_key = config.resolve_api_key()?;
        Self::with_api_key(config, api_key)
    }

    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_api_key(
        config: GeminiConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, GeminiError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        debug!(base_url = %config.base_url, "Created Gemini client");
        Ok(Self {
            http,
            api_key: api_key.into(),
            config,
        })
    }

    /// Connection settings in use.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Send one `generateContent` request. No retries.
    #[instrument(skip(self, request), fields(model = %model))]
    pub async fn generate_content(
        &self,
        operation: &'static str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let metrics = LlmMetrics::get();
        let started = Instant::now();

        let result = self.send(model, request).await;

        metrics.record_request(PROVIDER, model, operation, started.elapsed().as_secs_f64());
        match &result {
            Ok(response) => {
                if let Some(usage) = response.usage_metadata {
                    metrics.record_tokens(model, usage.total_token_count);
                }
            }
            Err(e) => metrics.record_error(PROVIDER, model, operation, classify_error(e)),
        }
        result
    }

    async fn send(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        debug!("Sending request to Gemini API");

        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Gemini API");
                let message = if e.is_timeout() {
                    format!("request timed out: {}", e)
                } else {
                    format!("Request failed: {}", e)
                };
                GeminiError::new(GeminiErrorKind::ApiRequest(message))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Gemini API returned error");
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message: body,
            }));
        }

        let reply: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Gemini response");
            GeminiError::new(GeminiErrorKind::ResponseDecode(e.to_string()))
        })?;

        debug!(candidates = reply.candidates.len(), "Received response from Gemini");
        Ok(reply)
    }

    /// The reply text, or why there is none.
    fn reply_text(response: &GenerateContentResponse) -> Result<String, GeminiError> {
        if response.candidates.is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::EmptyCandidates));
        }
        response
            .text()
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::MissingText))
    }

    /// The first inline image of the reply.
    fn reply_image(response: &GenerateContentResponse) -> Result<ImagePayload, GeminiError> {
        if response.candidates.is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::EmptyCandidates));
        }
        let inline = response
            .first_inline_data()
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::MissingInlineImage))?;
        let mime_type = if inline.mime_type.is_empty() {
            DEFAULT_IMAGE_MIME
        } else {
            inline.mime_type.as_str()
        };
        Ok(ImagePayload::new(mime_type, inline.data.clone()))
    }

    fn citations(response: &GenerateContentResponse) -> Vec<Citation> {
        response
            .first_candidate()
            .and_then(|candidate| candidate.grounding_metadata.as_ref())
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .map(|web| Citation::new(web.uri.clone(), web.title.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Parse and validate a research reply.
    fn parse_research(response: &GenerateContentResponse) -> ContentResult<MarketAnalysis> {
        let text = Self::reply_text(response)
            .map_err(|e| ContentError::from_gemini(ContentErrorKind::Research, e))?;

        let reply: ResearchReply = serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, "Research reply is not valid analysis JSON");
            ContentError::new(ContentErrorKind::Research(format!(
                "malformed analysis: {}",
                e
            )))
        })?;

        MarketAnalysis::new(
            reply.competitors_analysis,
            reply.market_opportunities,
            reply.brand_positioning_advice,
            reply.content_pillars,
            Self::citations(response),
        )
        .map_err(|e| ContentError::new(ContentErrorKind::Research(e.kind().to_string())))
    }

    /// Parse and validate a drafts reply.
    fn parse_drafts(
        response: &GenerateContentResponse,
        post_type: PostType,
    ) -> ContentResult<Vec<GeneratedPost>> {
        let text = Self::reply_text(response)
            .map_err(|e| ContentError::from_gemini(ContentErrorKind::Generation, e))?;

        let items: Vec<PostContent> = serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, "Draft reply is not valid post JSON");
            ContentError::new(ContentErrorKind::Generation(format!(
                "malformed drafts: {}",
                e
            )))
        })?;

        if items.len() != POSTS_PER_RUN {
            return Err(ContentError::new(ContentErrorKind::Generation(format!(
                "expected {} drafts, got {}",
                POSTS_PER_RUN,
                items.len()
            ))));
        }

        if let Some((index, violation)) = items
            .iter()
            .enumerate()
            .find_map(|(i, item)| item.violation().map(|v| (i, v)))
        {
            return Err(ContentError::new(ContentErrorKind::Generation(format!(
                "draft {}: {}",
                index + 1,
                violation
            ))));
        }

        Ok(items
            .into_iter()
            .map(|content| GeneratedPost::draft(content, post_type))
            .collect())
    }

    /// Inline part for an existing image, tolerating a `data:` URL in the data.
    fn source_image_part(image: &ImagePayload) -> Part {
        match ImagePayload::from_data_url(image.data()) {
            Some(inner) => Part::inline(inner.mime_type().clone(), inner.data().clone()),
            None => Part::inline(image.mime_type().clone(), image.data().clone()),
        }
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    #[instrument(skip(self, brand), fields(brand = %brand.name(), industry = %brand.industry()))]
    async fn perform_research(&self, brand: &BrandDetails) -> ContentResult<MarketAnalysis> {
        let request = GenerateContentRequest::user(vec![Part::text(research_prompt(brand))])
            .with_json_schema(research_schema())
            .with_google_search();

        let response = self
            .generate_content("research", &self.config.text_model, &request)
            .await
            .map_err(|e| ContentError::from_gemini(ContentErrorKind::Research, e))?;

        let analysis = Self::parse_research(&response)?;
        info!(
            pillars = analysis.content_pillars().len(),
            citations = analysis.citations().len(),
            "Market research complete"
        );
        Ok(analysis)
    }

    #[instrument(skip(self, brand, analysis), fields(brand = %brand.name(), post_type = %post_type))]
    async fn generate_drafts(
        &self,
        brand: &BrandDetails,
        analysis: &MarketAnalysis,
        post_type: PostType,
    ) -> ContentResult<Vec<GeneratedPost>> {
        let request =
            GenerateContentRequest::user(vec![Part::text(draft_prompt(brand, analysis, post_type))])
                .with_json_schema(draft_schema());

        let response = self
            .generate_content("drafts", &self.config.text_model, &request)
            .await
            .map_err(|e| ContentError::from_gemini(ContentErrorKind::Generation, e))?;

        let posts = Self::parse_drafts(&response, post_type)?;
        info!(count = posts.len(), "Drafts generated");
        Ok(posts)
    }

    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn render_image(&self, prompt: &str) -> ContentResult<ImagePayload> {
        let request = GenerateContentRequest::user(vec![Part::text(prompt)])
            .with_aspect_ratio(self.config.aspect_ratio.clone());

        let response = self
            .generate_content("render_image", &self.config.image_model, &request)
            .await
            .map_err(|e| ContentError::from_gemini(ContentErrorKind::Image, e))?;

        Self::reply_image(&response)
            .map_err(|e| ContentError::from_gemini(ContentErrorKind::Image, e))
    }

    #[instrument(skip(self, image, prompt), fields(mime_type = %image.mime_type(), prompt_len = prompt.len()))]
    async fn edit_image(&self, image: &ImagePayload, prompt: &str) -> ContentResult<ImagePayload> {
        let request = GenerateContentRequest::user(vec![
            Self::source_image_part(image),
            Part::text(prompt),
        ]);

        let response = self
            .generate_content("edit_image", &self.config.image_model, &request)
            .await
            .map_err(|e| ContentError::from_gemini(ContentErrorKind::Image, e))?;

        Self::reply_image(&response)
            .map_err(|e| ContentError::from_gemini(ContentErrorKind::Image, e))
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
