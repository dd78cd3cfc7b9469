//! Workflow state machine error types.

/// Specific error conditions for stage transitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum WorkflowErrorKind {
    /// Event is not accepted in the current stage
    #[display("Cannot apply '{}' while in stage '{}'", event, stage)]
    InvalidTransition {
        /// Stage the workflow was in
        stage: String,
        /// Event that was rejected
        event: String,
    },
    /// Research failed for this run; only starting over is possible
    #[display("Research failed for this run, start over to continue: {}", _0)]
    ResearchFailed(String),
    /// Operation needs brand details that have not been submitted
    #[display("Brand details have not been submitted")]
    MissingBrand,
    /// Operation needs a market analysis that has not been produced
    #[display("Market analysis is not available")]
    MissingAnalysis,
    /// Operation needs a post type that has not been selected
    #[display("No post type has been selected")]
    MissingPostType,
    /// Drafts were already requested in this run
    #[display("Posts have already been generated in this run, start over for a new set")]
    GenerationAlreadyStarted,
    /// Operation needs generated posts that do not exist yet
    #[display("No posts have been generated in this run")]
    NoGeneratedPosts,
}

/// Error type for workflow operations.
///
/// # Examples
///
/// ```
/// use socialnexus_error::{WorkflowError, WorkflowErrorKind};
///
/// let err = WorkflowError::new(WorkflowErrorKind::MissingBrand);
/// assert!(format!("{}", err).contains("Brand details"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Workflow Error: {} at line {} in {}", kind, line, file)]
pub struct WorkflowError {
    /// The specific error condition
    pub kind: WorkflowErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl WorkflowError {
    /// Create a new WorkflowError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: WorkflowErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for an invalid transition.
    #[track_caller]
    pub fn invalid_transition(stage: impl ToString, event: impl ToString) -> Self {
        Self::new(WorkflowErrorKind::InvalidTransition {
            stage: stage.to_string(),
            event: event.to_string(),
        })
    }
}
