//! Failures of the three generative request kinds.

use crate::{GeminiError, RetryableError};

/// Which generative call failed, and why.
///
/// Each variant is terminal for its call site: research and draft failures
/// stop their stage, image failures stay scoped to one post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ContentErrorKind {
    /// Market research call failed or returned a malformed analysis
    #[display("Market research failed: {}", _0)]
    Research(String),
    /// Draft generation call failed or returned malformed drafts
    #[display("Content generation failed: {}", _0)]
    Generation(String),
    /// Image render or edit call failed or returned no image
    #[display("Image generation failed: {}", _0)]
    Image(String),
}

/// Error for a single generative request.
///
/// Carries the transport error that caused it (if any) so callers can decide
/// whether the failure is worth retrying.
///
/// # Examples
///
/// ```
/// use socialnexus_error::{
///     ContentError, ContentErrorKind, GeminiError, GeminiErrorKind, RetryableError,
/// };
///
/// let err = ContentError::new(ContentErrorKind::Research("expected 4 pillars, got 3".into()));
/// assert!(format!("{}", err).contains("4 pillars"));
/// assert!(!err.is_transient());
///
/// let http = |status_code| {
///     GeminiError::new(GeminiErrorKind::HttpError {
///         status_code,
///         message: String::new(),
///     })
/// };
/// assert!(ContentError::from_gemini(ContentErrorKind::Image, http(503)).is_retryable());
/// assert!(!ContentError::from_gemini(ContentErrorKind::Image, http(400)).is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Content Error: {} at line {} in {}", kind, line, file)]
pub struct ContentError {
    /// The specific error condition
    pub kind: ContentErrorKind,
    /// Underlying transport failure
    pub cause: Option<GeminiError>,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ContentError {
    /// Create a new ContentError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ContentErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            cause: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create a ContentError caused by a Gemini transport error.
    #[track_caller]
    pub fn from_gemini(kind: fn(String) -> ContentErrorKind, cause: GeminiError) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind: kind(cause.kind.to_string()),
            cause: Some(cause),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the underlying transport error is worth retrying.
    pub fn is_transient(&self) -> bool {
        self.cause.as_ref().is_some_and(|c| c.is_retryable())
    }
}

impl RetryableError for ContentError {
    fn is_retryable(&self) -> bool {
        self.is_transient()
    }
}
