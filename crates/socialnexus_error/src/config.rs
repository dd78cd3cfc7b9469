//! Configuration error types.

/// Configuration loading or validation error.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Configuration source that failed, when known
    pub source_name: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use socialnexus_error::ConfigError;
    ///
    /// let err = ConfigError::new("images.max_retries must be a number");
    /// assert!(err.message.contains("max_retries"));
    /// assert!(err.source_name.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            source_name: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attach the name of the configuration source (usually a file path).
    pub fn with_source(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }
}
