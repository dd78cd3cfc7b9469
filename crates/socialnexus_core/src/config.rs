//! Layered configuration.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from socialnexus.toml)
//! - `~/.config/socialnexus/socialnexus.toml`
//! - `./socialnexus.toml`
//! - An explicit file, when one is given

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use socialnexus_error::{ConfigError, GeminiError, GeminiErrorKind, NexusError, NexusResult};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../socialnexus.toml");

/// Gemini API connection settings.
///
/// # Example
///
/// ```toml
/// [gemini]
/// text_model = "gemini-3-flash-preview"
/// image_model = "gemini-2.5-flash-image"
/// timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key; when unset the environment is consulted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model used for research and drafts
    pub text_model: String,
    /// Model used for image render and edit
    pub image_model: String,
    /// REST base URL, without trailing slash
    pub base_url: String,
    /// Aspect ratio requested for rendered images
    pub aspect_ratio: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            text_model: "gemini-3-flash-preview".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            aspect_ratio: "1:1".to_string(),
            timeout_secs: 120,
        }
    }
}

impl GeminiConfig {
    /// Resolve the API key: configured value, then `GEMINI_API_KEY`, then `API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::MissingApiKey`] when none is set.
    pub fn resolve_api_key(&self) -> Result<String, GeminiError> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// [`GeminiConfig::resolve_api_key`] against an arbitrary variable lookup.
    ///
    /// Blank values count as unset at every step.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Result<String, GeminiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &String| !key.trim().is_empty();
        self.api_key
            .clone()
            .filter(present)
            .or_else(|| lookup("GEMINI_API_KEY").filter(present))
            .or_else(|| lookup("API_KEY").filter(present))
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::MissingApiKey))
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Retry policy for per-post image renders.
///
/// The default makes exactly one attempt per post. With `max_retries > 0`,
/// transient failures are retried with jittered exponential backoff starting
/// at `initial_backoff_ms` and capped at `max_delay_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageRetryPolicy {
    /// Retries after the first attempt
    pub max_retries: usize,
    /// First backoff delay
    pub initial_backoff_ms: u64,
    /// Upper bound on any single delay
    pub max_delay_secs: u64,
}

impl Default for ImageRetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_backoff_ms: 1000,
            max_delay_secs: 30,
        }
    }
}

impl ImageRetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether any retry will be attempted.
    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }
}

/// Research stage settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// Interval between progress labels
    pub progress_interval_ms: u64,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            progress_interval_ms: 1500,
        }
    }
}

impl ResearchConfig {
    /// Progress interval as a [`Duration`].
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }
}

/// Top-level SocialNexus configuration.
///
/// # Example
///
/// ```no_run
/// use socialnexus_core::NexusConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = NexusConfig::load()?;
/// println!("Text model: {}", config.gemini.text_model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NexusConfig {
    /// Gemini connection settings
    pub gemini: GeminiConfig,
    /// Image retry policy
    pub images: ImageRetryPolicy,
    /// Research stage settings
    pub research: ResearchConfig,
}

impl NexusConfig {
    /// Load configuration from a single file, on top of the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> NexusResult<Self> {
        debug!("Loading configuration from file");

        let path = path.as_ref();
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path))
            .build()
            .map_err(|e| {
                NexusError::from(
                    ConfigError::new(format!("Failed to read configuration: {}", e))
                        .with_source(path.display().to_string()),
                )
            })?
            .try_deserialize()
            .map_err(|e| {
                NexusError::from(
                    ConfigError::new(format!("Failed to parse configuration: {}", e))
                        .with_source(path.display().to_string()),
                )
            })
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> NexusResult<Self> {
        Self::load_with(None)
    }

    /// Like [`NexusConfig::load`], with an explicit file applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing, or any source fails
    /// to parse.
    #[instrument(skip(explicit), fields(explicit = ?explicit.map(|p| p.display().to_string())))]
    pub fn load_with(explicit: Option<&Path>) -> NexusResult<Self> {
        debug!("Loading configuration with precedence: explicit > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/socialnexus/socialnexus.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("socialnexus").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: Self = builder
            .build()
            .map_err(|e| {
                NexusError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                NexusError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        debug!(
            text_model = %config.gemini.text_model,
            image_model = %config.gemini.image_model,
            image_retries = config.images.max_retries,
            "Configuration loaded"
        );
        Ok(config)
    }
}
