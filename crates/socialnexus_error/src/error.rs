//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, ContentError, GeminiError, JsonError, PostError, StorageError,
    WorkflowError,
};

/// Every error a SocialNexus operation can produce.
///
/// # Examples
///
/// ```
/// use socialnexus_error::{NexusError, JsonError};
///
/// let json_err = JsonError::new("brand file", "missing field `name`");
/// let err: NexusError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum NexusErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Gemini transport error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Research, generation or image failure
    #[from(ContentError)]
    Content(ContentError),
    /// Workflow stage error
    #[from(WorkflowError)]
    Workflow(WorkflowError),
    /// Post mutation error
    #[from(PostError)]
    Post(PostError),
    /// Local file error
    #[from(StorageError)]
    Storage(StorageError),
}

/// SocialNexus error with kind discrimination.
///
/// # Examples
///
/// ```
/// use socialnexus_error::{NexusError, NexusErrorKind, NexusResult, ConfigError};
///
/// fn might_fail() -> NexusResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), NexusErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("SocialNexus Error: {}", _0)]
pub struct NexusError(Box<NexusErrorKind>);

impl NexusError {
    /// Create a new error from a kind.
    pub fn new(kind: NexusErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &NexusErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to NexusErrorKind
impl<T> From<T> for NexusError
where
    T: Into<NexusErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for SocialNexus operations.
pub type NexusResult<T> = std::result::Result<T, NexusError>;
