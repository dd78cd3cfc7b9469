//! The generative capability seam.

use async_trait::async_trait;
use socialnexus_core::{BrandDetails, GeneratedPost, ImagePayload, MarketAnalysis, PostType};
use socialnexus_error::ContentError;
use std::sync::Arc;

/// Result of a single generative request.
pub type ContentResult<T> = Result<T, ContentError>;

/// The four request kinds the wizard sends to a generative service.
///
/// Every method is one request and one reply. Implementations validate the
/// reply before returning it: a [`MarketAnalysis`] always has four pillars and
/// draft generation always yields six posts, or the call fails.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Research the brand's market and propose four content pillars.
    ///
    /// # Errors
    ///
    /// Fails with a `Research` error on transport failure or a malformed reply.
    async fn perform_research(&self, brand: &BrandDetails) -> ContentResult<MarketAnalysis>;

    /// Write six draft posts of the given type.
    ///
    /// Each returned post has a fresh id, `Draft` status and no image.
    ///
    /// # Errors
    ///
    /// Fails with a `Generation` error on transport failure or a malformed reply.
    async fn generate_drafts(
        &self,
        brand: &BrandDetails,
        analysis: &MarketAnalysis,
        post_type: PostType,
    ) -> ContentResult<Vec<GeneratedPost>>;

    /// Render an image from a text prompt.
    ///
    /// # Errors
    ///
    /// Fails with an `Image` error when no image comes back.
    async fn render_image(&self, prompt: &str) -> ContentResult<ImagePayload>;

    /// Produce a new image by applying a text instruction to an existing one.
    ///
    /// # Errors
    ///
    /// Fails with an `Image` error when no image comes back.
    async fn edit_image(&self, image: &ImagePayload, prompt: &str) -> ContentResult<ImagePayload>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<T: ContentGenerator + ?Sized> ContentGenerator for Arc<T> {
    async fn perform_research(&self, brand: &BrandDetails) -> ContentResult<MarketAnalysis> {
        (**self).perform_research(brand).await
    }

    async fn generate_drafts(
        &self,
        brand: &BrandDetails,
        analysis: &MarketAnalysis,
        post_type: PostType,
    ) -> ContentResult<Vec<GeneratedPost>> {
        (**self).generate_drafts(brand, analysis, post_type).await
    }

    async fn render_image(&self, prompt: &str) -> ContentResult<ImagePayload> {
        (**self).render_image(prompt).await
    }

    async fn edit_image(&self, image: &ImagePayload, prompt: &str) -> ContentResult<ImagePayload> {
        (**self).edit_image(image, prompt).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
