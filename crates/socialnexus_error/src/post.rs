//! Errors from mutating individual posts.

/// Why a post mutation was refused.
///
/// All of these are detected locally, before any remote call is made.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PostErrorKind {
    /// No post with this id in the collection
    #[display("Post '{}' not found", _0)]
    NotFound(String),
    /// Post has already been scheduled
    #[display("Post '{}' is already scheduled", _0)]
    AlreadyScheduled(String),
    /// Schedule request named no platforms
    #[display("At least one platform is required to schedule a post")]
    EmptyPlatforms,
    /// Edit requested for a post that has no image yet
    #[display("Post '{}' has no image to edit", _0)]
    MissingImage(String),
    /// Edit prompt was empty
    #[display("Edit prompt must not be empty")]
    EmptyEditPrompt,
}

/// Post mutation error with location tracking.
///
/// # Examples
///
/// ```
/// use socialnexus_error::{PostError, PostErrorKind};
///
/// let err = PostError::new(PostErrorKind::AlreadyScheduled("post-1".into()));
/// assert_eq!(err.kind, PostErrorKind::AlreadyScheduled("post-1".into()));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Post Error: {} at line {} in {}", kind, line, file)]
pub struct PostError {
    /// The specific error condition
    pub kind: PostErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PostError {
    /// Create a new PostError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PostErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
