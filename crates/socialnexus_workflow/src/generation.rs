//! Draft generation and the concurrent image fan-out.
//!
//! A run has two phases. The drafts are generated and published to the
//! board first. Then one task per draft renders its image, and every result
//! is sent over a channel to a single reducer that applies it to the board by
//! post id. Completion order does not matter.

use chrono::{DateTime, Utc};
use socialnexus_core::{
    BrandDetails, GeneratedPost, ImagePayload, ImageRetryPolicy, MarketAnalysis, PostId,
    PostType,
};
use socialnexus_error::{NexusResult, PostError, PostErrorKind, RetryableError};
use socialnexus_interface::{ContentGenerator, ContentResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{Instrument, debug, info, info_span, instrument, warn};

use crate::PostCollection;

/// Result of one image task, addressed by post id.
#[derive(Debug)]
pub struct ImageOutcome {
    /// Post the image belongs to
    pub id: PostId,
    /// Rendered image or the reason there is none
    pub result: ContentResult<ImagePayload>,
}

/// Render one image under `policy`.
///
/// With retries disabled this is exactly one call. Otherwise transient
/// failures are retried with jittered exponential backoff; permanent
/// failures return immediately.
pub async fn render_with_retry<G>(
    generator: &G,
    prompt: &str,
    policy: ImageRetryPolicy,
) -> ContentResult<ImagePayload>
where
    G: ContentGenerator + ?Sized,
{
    if !policy.is_enabled() {
        return generator.render_image(prompt).await;
    }

    use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};

    let strategy = ExponentialBackoff::from_millis(policy.initial_backoff_ms)
        .factor(2)
        .max_delay(Duration::from_secs(policy.max_delay_secs))
        .map(jitter)
        .take(policy.max_retries);

    Retry::spawn(strategy, move || async move {
        match generator.render_image(prompt).await {
            Ok(image) => Ok(image),
            Err(e) if e.is_retryable() => {
                warn!(error = %e, "Transient image failure, will retry");
                Err(RetryError::Transient {
                    err: e,
                    retry_after: None,
                })
            }
            Err(e) => Err(RetryError::Permanent(e)),
        }
    })
    .await
}

/// Owns the generation board for one wizard run.
pub struct ContentGenerationOrchestrator<G: ContentGenerator + 'static> {
    generator: Arc<G>,
    retry: ImageRetryPolicy,
    board: watch::Sender<PostCollection>,
}

impl<G: ContentGenerator + 'static> ContentGenerationOrchestrator<G> {
    /// Create an orchestrator with an empty board.
    pub fn new(generator: Arc<G>, retry: ImageRetryPolicy) -> Self {
        let (board, _) = watch::channel(PostCollection::default());
        Self {
            generator,
            retry,
            board,
        }
    }

    /// Watch the board. Each change is a whole collection.
    pub fn subscribe(&self) -> watch::Receiver<PostCollection> {
        self.board.subscribe()
    }

    /// Current board contents.
    pub fn snapshot(&self) -> PostCollection {
        self.board.borrow().clone()
    }

    /// Generate drafts, then render every image.
    ///
    /// Returns the board once every image task has reported. Individual
    /// image failures are recorded on their post, not returned.
    ///
    /// # Errors
    ///
    /// Returns the `Generation` error when drafts cannot be produced. No
    /// image is requested in that case and the board is left as it was.
    #[instrument(
        skip(self, brand, analysis),
        fields(brand = %brand.name(), post_type = %post_type, provider = self.generator.provider_name())
    )]
    pub async fn run(
        &self,
        brand: &BrandDetails,
        analysis: &MarketAnalysis,
        post_type: PostType,
    ) -> ContentResult<PostCollection> {
        let drafts = self
            .generator
            .generate_drafts(brand, analysis, post_type)
            .await?;
        info!(count = drafts.len(), "Drafts generated");

        let jobs: Vec<(PostId, String)> = drafts
            .iter()
            .map(|post| (*post.id(), post.content().image_prompt().clone()))
            .collect();
        self.board.send_replace(PostCollection::new(drafts));

        let (tx, mut rx) = mpsc::channel::<ImageOutcome>(jobs.len().max(1));
        for (id, prompt) in jobs {
            let generator = Arc::clone(&self.generator);
            let tx = tx.clone();
            let policy = self.retry;
            tokio::spawn(
                async move {
                    let result = render_with_retry(generator.as_ref(), &prompt, policy).await;
                    // Receiver gone means the run was abandoned
                    let _ = tx.send(ImageOutcome { id, result }).await;
                }
                .instrument(info_span!("render_image", post_id = %id)),
            );
        }
        drop(tx);

        while let Some(outcome) = rx.recv().await {
            self.apply(outcome);
        }

        let board = self.snapshot();
        info!(
            rendered = board.iter().filter(|p| p.image().is_some()).count(),
            total = board.len(),
            "Image phase complete"
        );
        Ok(board)
    }

    fn apply(&self, outcome: ImageOutcome) {
        let ImageOutcome { id, result } = outcome;
        self.board.send_if_modified(|board| match result {
            Ok(image) => {
                debug!(post_id = %id, "Image ready");
                board.replace_image(id, image)
            }
            Err(e) => {
                warn!(post_id = %id, error = %e, "Image failed");
                board.record_image_failure(id, e.kind.to_string())
            }
        });
    }

    /// Apply an edit instruction to a post's current image.
    ///
    /// # Errors
    ///
    /// Blank prompts, unknown posts and posts without an image fail with a
    /// [`PostError`] before the generator is called. A failed edit returns the
    /// `Image` error and records it on the post, whose image is unchanged.
    #[instrument(skip(self, prompt), fields(post_id = %id))]
    pub async fn edit_image(&self, id: PostId, prompt: &str) -> NexusResult<GeneratedPost> {
        if prompt.trim().is_empty() {
            return Err(PostError::new(PostErrorKind::EmptyEditPrompt).into());
        }

        let source = {
            let board = self.board.borrow();
            let post = board
                .get(id)
                .ok_or_else(|| PostError::new(PostErrorKind::NotFound(id.to_string())))?;
            post.image()
                .clone()
                .ok_or_else(|| PostError::new(PostErrorKind::MissingImage(id.to_string())))?
        };

        match self.generator.edit_image(&source, prompt).await {
            Ok(image) => {
                let mut updated = None;
                self.board.send_if_modified(|board| {
                    let replaced = board.replace_image(id, image);
                    updated = board.get(id).cloned();
                    replaced
                });
                info!("Image edited");
                updated.ok_or_else(|| PostError::new(PostErrorKind::NotFound(id.to_string())).into())
            }
            Err(e) => {
                warn!(error = %e, "Image edit failed");
                let message = e.kind.to_string();
                self.board
                    .send_if_modified(|board| board.record_image_failure(id, message));
                Err(e.into())
            }
        }
    }

    /// Schedule a post on the board. Never calls the generator.
    ///
    /// # Errors
    ///
    /// See [`PostCollection::mark_scheduled`].
    #[instrument(skip(self, platforms), fields(post_id = %id, at = %at))]
    pub fn schedule<I, S>(
        &self,
        id: PostId,
        at: DateTime<Utc>,
        platforms: I,
    ) -> Result<GeneratedPost, PostError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut outcome = None;
        self.board.send_if_modified(|board| {
            let result = board.mark_scheduled(id, at, platforms);
            let modified = result.is_ok();
            outcome = Some(result);
            modified
        });
        let post = outcome
            .unwrap_or_else(|| Err(PostError::new(PostErrorKind::NotFound(id.to_string()))))?;
        info!(platforms = ?post.schedule().as_ref().map(|s| s.platforms()), "Post scheduled");
        Ok(post)
    }
}
