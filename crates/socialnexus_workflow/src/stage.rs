//! Wizard stages and their transitions.
//!
//! [`WorkflowState::apply`] is the only way to move between stages. It does
//! no I/O: the orchestrators do the work and report back through events.

use socialnexus_core::{BrandDetails, MarketAnalysis, PostType};
use socialnexus_error::{WorkflowError, WorkflowErrorKind};
use tracing::debug;

/// A step of the wizard.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
pub enum Stage {
    /// Entering brand details
    #[default]
    #[display("brand")]
    Brand,
    /// Market research in flight (or failed)
    #[display("research")]
    Research,
    /// Reviewing the content pillars
    #[display("pillars")]
    Pillars,
    /// Choosing a post type
    #[display("type selection")]
    TypeSelection,
    /// Drafts, images, edits and scheduling
    #[display("generation")]
    Generation,
    /// Scheduled posts overview
    #[display("dashboard")]
    Dashboard,
}

/// Something that happened, to be applied to a [`WorkflowState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// User submitted the brand form
    SubmitBrand(BrandDetails),
    /// Research returned an analysis
    ResearchCompleted(MarketAnalysis),
    /// Research failed; the message is shown to the user
    ResearchFailed(String),
    /// User accepted the pillars
    AcceptPillars,
    /// User picked a post type
    SelectPostType(PostType),
    /// Draft generation was requested for this generation stage
    GenerationStarted,
    /// Discard everything and return to the brand form
    StartOver,
    /// Jump to the dashboard
    ViewDashboard,
}

impl WorkflowEvent {
    /// Short name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowEvent::SubmitBrand(_) => "submit brand",
            WorkflowEvent::ResearchCompleted(_) => "research completed",
            WorkflowEvent::ResearchFailed(_) => "research failed",
            WorkflowEvent::AcceptPillars => "accept pillars",
            WorkflowEvent::SelectPostType(_) => "select post type",
            WorkflowEvent::GenerationStarted => "generation started",
            WorkflowEvent::StartOver => "start over",
            WorkflowEvent::ViewDashboard => "view dashboard",
        }
    }
}

/// Current stage plus everything earlier stages produced.
///
/// # Examples
///
/// ```
/// use socialnexus_core::BrandDetails;
/// use socialnexus_workflow::{Stage, WorkflowEvent, WorkflowState};
///
/// let brand = BrandDetails::builder()
///     .name("EcoSpark")
///     .industry("Sustainable Energy")
///     .target_audience("Homeowners")
///     .unique_value_proposition("Installed in a day")
///     .build()
///     .unwrap();
///
/// let state = WorkflowState::new()
///     .apply(WorkflowEvent::SubmitBrand(brand))
///     .unwrap();
/// assert_eq!(state.stage(), Stage::Research);
///
/// // Pillars cannot be accepted before research completes
/// assert!(state.apply(WorkflowEvent::AcceptPillars).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowState {
    stage: Stage,
    brand: Option<BrandDetails>,
    analysis: Option<MarketAnalysis>,
    post_type: Option<PostType>,
    research_failure: Option<String>,
    generation_started: bool,
}

impl WorkflowState {
    /// A fresh run at the brand stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Submitted brand, from the research stage on.
    pub fn brand(&self) -> Option<&BrandDetails> {
        self.brand.as_ref()
    }

    /// Research result, from the pillars stage on.
    pub fn analysis(&self) -> Option<&MarketAnalysis> {
        self.analysis.as_ref()
    }

    /// Selected post type, from the generation stage on.
    pub fn post_type(&self) -> Option<PostType> {
        self.post_type
    }

    /// Why research failed, if it did.
    pub fn research_failure(&self) -> Option<&str> {
        self.research_failure.as_deref()
    }

    /// Whether this run is stuck on a failed research call.
    pub fn is_research_failed(&self) -> bool {
        self.research_failure.is_some()
    }

    /// Whether drafts have already been requested in this run.
    pub fn is_generation_started(&self) -> bool {
        self.generation_started
    }

    /// Compute the state that follows `event`.
    ///
    /// `self` is left untouched; on error the caller keeps the old state.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowErrorKind::InvalidTransition`] for an event the
    /// current stage does not accept, or [`WorkflowErrorKind::ResearchFailed`]
    /// for anything but an escape after research failed, or
    /// [`WorkflowErrorKind::GenerationAlreadyStarted`] when drafts were
    /// already requested in this run.
    pub fn apply(&self, event: WorkflowEvent) -> Result<Self, WorkflowError> {
        debug!(stage = %self.stage, event = event.name(), "Applying workflow event");

        match event {
            WorkflowEvent::StartOver => return Ok(Self::new()),
            WorkflowEvent::ViewDashboard => {
                return Ok(Self {
                    stage: Stage::Dashboard,
                    ..self.clone()
                });
            }
            _ => {}
        }

        if let Some(message) = &self.research_failure {
            return Err(WorkflowError::new(WorkflowErrorKind::ResearchFailed(
                message.clone(),
            )));
        }

        match (self.stage, event) {
            (Stage::Brand, WorkflowEvent::SubmitBrand(brand)) => Ok(Self {
                stage: Stage::Research,
                brand: Some(brand),
                ..Self::new()
            }),
            (Stage::Research, WorkflowEvent::ResearchCompleted(analysis)) => Ok(Self {
                stage: Stage::Pillars,
                analysis: Some(analysis),
                ..self.clone()
            }),
            (Stage::Research, WorkflowEvent::ResearchFailed(message)) => Ok(Self {
                research_failure: Some(message),
                ..self.clone()
            }),
            (Stage::Pillars, WorkflowEvent::AcceptPillars) => Ok(Self {
                stage: Stage::TypeSelection,
                ..self.clone()
            }),
            (Stage::TypeSelection, WorkflowEvent::SelectPostType(post_type)) => Ok(Self {
                stage: Stage::Generation,
                post_type: Some(post_type),
                ..self.clone()
            }),
            (Stage::Generation, WorkflowEvent::GenerationStarted) => {
                if self.generation_started {
                    return Err(WorkflowError::new(
                        WorkflowErrorKind::GenerationAlreadyStarted,
                    ));
                }
                Ok(Self {
                    generation_started: true,
                    ..self.clone()
                })
            }
            (stage, event) => Err(WorkflowError::invalid_transition(stage, event.name())),
        }
    }
}
