//! The wizard controller.

use chrono::{DateTime, Utc};
use socialnexus_core::{
    BrandDetails, GeneratedPost, ImageRetryPolicy, MarketAnalysis, NexusConfig, PostId, PostType,
};
use socialnexus_error::{NexusResult, WorkflowError, WorkflowErrorKind};
use socialnexus_interface::ContentGenerator;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{info, instrument};

use crate::{
    ContentGenerationOrchestrator, MarketResearchOrchestrator, PostCollection, ResearchProgress,
    ScheduledPosts, Stage, WorkflowEvent, WorkflowState,
};

/// Drives one user through brand → research → pillars → post type →
/// generation, and keeps every post they schedule.
///
/// The state machine decides what is allowed; the orchestrators do the
/// remote work. Scheduled posts outlive [`Wizard::start_over`].
pub struct Wizard<G: ContentGenerator + 'static> {
    generator: Arc<G>,
    retry: ImageRetryPolicy,
    state: WorkflowState,
    research: MarketResearchOrchestrator<G>,
    generation: ContentGenerationOrchestrator<G>,
    scheduled: ScheduledPosts,
}

impl<G: ContentGenerator + 'static> Wizard<G> {
    /// Create a wizard at the brand stage.
    pub fn new(generator: Arc<G>, config: &NexusConfig) -> Self {
        Self {
            research: MarketResearchOrchestrator::new(Arc::clone(&generator), config.research),
            generation: ContentGenerationOrchestrator::new(Arc::clone(&generator), config.images),
            retry: config.images,
            generator,
            state: WorkflowState::new(),
            scheduled: ScheduledPosts::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.state.stage()
    }

    fn transition(&mut self, event: WorkflowEvent) -> Result<Stage, WorkflowError> {
        let from = self.state.stage();
        let event_name = event.name();
        self.state = self.state.apply(event)?;
        info!(from = %from, to = %self.state.stage(), event = event_name, "Stage transition");
        Ok(self.state.stage())
    }

    fn require(&self, stage: Stage, operation: &str) -> Result<(), WorkflowError> {
        if let Some(message) = self.state.research_failure() {
            return Err(WorkflowError::new(WorkflowErrorKind::ResearchFailed(
                message.to_string(),
            )));
        }
        if self.state.stage() != stage {
            return Err(WorkflowError::invalid_transition(
                self.state.stage(),
                operation,
            ));
        }
        Ok(())
    }

    /// Submit brand details and move to research.
    ///
    /// # Errors
    ///
    /// Fails on blank required fields or when not at the brand stage.
    pub fn submit_brand(&mut self, brand: BrandDetails) -> NexusResult<Stage> {
        brand.validate()?;
        Ok(self.transition(WorkflowEvent::SubmitBrand(brand))?)
    }

    /// Run market research for the submitted brand.
    ///
    /// On failure the run is marked failed and the error is returned; from
    /// then on only [`Wizard::start_over`] and [`Wizard::view_dashboard`]
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns the research error, or a workflow error when not at the
    /// research stage.
    #[instrument(skip(self, progress))]
    pub async fn run_research(
        &mut self,
        progress: Option<mpsc::Sender<ResearchProgress>>,
    ) -> NexusResult<MarketAnalysis> {
        self.require(Stage::Research, "run research")?;
        let brand = self
            .state
            .brand()
            .cloned()
            .ok_or_else(|| WorkflowError::new(WorkflowErrorKind::MissingBrand))?;

        match self.research.run(&brand, progress).await {
            Ok(analysis) => {
                self.transition(WorkflowEvent::ResearchCompleted(analysis.clone()))?;
                Ok(analysis)
            }
            Err(e) => {
                self.transition(WorkflowEvent::ResearchFailed(e.kind.to_string()))?;
                Err(e.into())
            }
        }
    }

    /// Accept the proposed content pillars.
    ///
    /// # Errors
    ///
    /// Fails when not at the pillars stage.
    pub fn accept_pillars(&mut self) -> NexusResult<Stage> {
        Ok(self.transition(WorkflowEvent::AcceptPillars)?)
    }

    /// Choose the post format for generation.
    ///
    /// # Errors
    ///
    /// Fails when not at the type selection stage.
    pub fn select_post_type(&mut self, post_type: PostType) -> NexusResult<Stage> {
        Ok(self.transition(WorkflowEvent::SelectPostType(post_type))?)
    }

    /// Generate six posts and their images.
    ///
    /// Runs once per generation stage. Progress is visible through
    /// [`Wizard::posts`] while this runs.
    ///
    /// # Errors
    ///
    /// Fails outside the generation stage, when generation already ran in
    /// this run, or when drafts cannot be produced.
    #[instrument(skip(self))]
    pub async fn generate(&mut self) -> NexusResult<PostCollection> {
        self.require(Stage::Generation, "generate")?;
        self.transition(WorkflowEvent::GenerationStarted)?;
        let brand = self
            .state
            .brand()
            .ok_or_else(|| WorkflowError::new(WorkflowErrorKind::MissingBrand))?;
        let analysis = self
            .state
            .analysis()
            .ok_or_else(|| WorkflowError::new(WorkflowErrorKind::MissingAnalysis))?;
        let post_type = self
            .state
            .post_type()
            .ok_or_else(|| WorkflowError::new(WorkflowErrorKind::MissingPostType))?;

        Ok(self.generation.run(brand, analysis, post_type).await?)
    }

    fn require_posts(&self, operation: &str) -> Result<(), WorkflowError> {
        self.require(Stage::Generation, operation)?;
        if self.generation.snapshot().is_empty() {
            return Err(WorkflowError::new(WorkflowErrorKind::NoGeneratedPosts));
        }
        Ok(())
    }

    /// Edit a generated post's image with a text instruction.
    ///
    /// # Errors
    ///
    /// Fails outside the generation stage, before any posts exist, or as
    /// described in [`ContentGenerationOrchestrator::edit_image`].
    pub async fn edit_post_image(&mut self, id: PostId, prompt: &str) -> NexusResult<GeneratedPost> {
        self.require_posts("edit image")?;
        self.generation.edit_image(id, prompt).await
    }

    /// Schedule a generated post and add it to the dashboard.
    ///
    /// # Errors
    ///
    /// Fails outside the generation stage, before any posts exist, or as
    /// described in [`PostCollection::mark_scheduled`].
    pub fn schedule_post<I, S>(
        &mut self,
        id: PostId,
        at: DateTime<Utc>,
        platforms: I,
    ) -> NexusResult<GeneratedPost>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.require_posts("schedule post")?;
        let post = self.generation.schedule(id, at, platforms)?;
        self.scheduled.push(post.clone());
        Ok(post)
    }

    /// Discard the current run and return to the brand stage.
    ///
    /// Scheduled posts are kept. Subscribers of the old board stop seeing
    /// updates; call [`Wizard::posts`] again for the new one.
    ///
    /// # Errors
    ///
    /// Never fails in practice; starting over is accepted from every stage.
    pub fn start_over(&mut self) -> NexusResult<Stage> {
        let stage = self.transition(WorkflowEvent::StartOver)?;
        self.generation =
            ContentGenerationOrchestrator::new(Arc::clone(&self.generator), self.retry);
        info!(scheduled = self.scheduled.len(), "Started over");
        Ok(stage)
    }

    /// Jump to the dashboard.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the dashboard is reachable from every stage.
    pub fn view_dashboard(&mut self) -> NexusResult<Stage> {
        Ok(self.transition(WorkflowEvent::ViewDashboard)?)
    }

    /// Every post scheduled in this session.
    pub fn dashboard(&self) -> &ScheduledPosts {
        &self.scheduled
    }

    /// Watch the current generation board.
    pub fn posts(&self) -> watch::Receiver<PostCollection> {
        self.generation.subscribe()
    }
}
