//! Metrics for generative API calls.
//!
//! OpenTelemetry instruments labelled by provider, model and operation
//! (`research`, `drafts`, `render_image`, `edit_image`).
//!
//! Instruments come from the global meter provider. Until the binary installs
//! one (see `--metrics`), every recording is a no-op.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use socialnexus_error::{GeminiError, GeminiErrorKind};
use std::sync::OnceLock;

static METRICS: OnceLock<LlmMetrics> = OnceLock::new();

/// Metrics for generative API interactions.
#[derive(Clone)]
pub struct LlmMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total API requests
    pub requests: Counter<u64>,
    /// Failed API requests
    pub errors: Counter<u64>,
    /// API call duration in seconds
    pub duration: Histogram<f64>,
    /// Total tokens used (prompt + completion)
    pub tokens_used: Counter<u64>,
}

impl LlmMetrics {
    fn init() -> Self {
        let meter = global::meter("socialnexus_llm");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("llm.requests")
                .with_description("Total generative API requests")
                .build(),
            errors: meter
                .u64_counter("llm.errors")
                .with_description("Failed generative API requests")
                .build(),
            duration: meter
                .f64_histogram("llm.duration")
                .with_unit("seconds")
                .with_description("Generative API call duration")
                .build(),
            tokens_used: meter
                .u64_counter("llm.tokens")
                .with_description("Total tokens used (prompt + completion)")
                .build(),
        }
    }

    /// Get the global metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    fn labels(provider: &str, model: &str, operation: &str) -> [KeyValue; 3] {
        [
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("operation", operation.to_string()),
        ]
    }

    /// Record a request attempt, successful or not.
    pub fn record_request(&self, provider: &str, model: &str, operation: &str, duration_secs: f64) {
        let labels = Self::labels(provider, model, operation);
        self.requests.add(1, &labels);
        self.duration.record(duration_secs, &labels);
    }

    /// Record a failed request. Failures are also counted by
    /// [`LlmMetrics::record_request`].
    pub fn record_error(&self, provider: &str, model: &str, operation: &str, error_type: &str) {
        let [provider, model, operation] = Self::labels(provider, model, operation);
        let labels = [
            provider,
            model,
            operation,
            KeyValue::new("error_type", error_type.to_string()),
        ];
        self.errors.add(1, &labels);
    }

    /// Record token usage reported by the API.
    pub fn record_tokens(&self, model: &str, total_tokens: u64) {
        self.tokens_used
            .add(total_tokens, &[KeyValue::new("model", model.to_string())]);
    }
}

impl Default for LlmMetrics {
    fn default() -> Self {
        Self::get().clone()
    }
}

/// Classify an error for metrics labelling.
///
/// Returns one of: "rate_limit", "auth", "network", "timeout",
/// "invalid_request", "server", "malformed_reply", "config".
pub fn classify_error(error: &GeminiError) -> &'static str {
    match &error.kind {
        GeminiErrorKind::HttpError { status_code, .. } => match *status_code {
            429 => "rate_limit",
            401 | 403 => "auth",
            408 => "timeout",
            500..=599 => "server",
            _ => "invalid_request",
        },
        GeminiErrorKind::ApiRequest(message) if message.contains("timed out") => "timeout",
        GeminiErrorKind::ApiRequest(_) => "network",
        GeminiErrorKind::MissingApiKey | GeminiErrorKind::ClientCreation(_) => "config",
        GeminiErrorKind::ResponseDecode(_)
        | GeminiErrorKind::EmptyCandidates
        | GeminiErrorKind::MissingText
        | GeminiErrorKind::MissingInlineImage => "malformed_reply",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status_code: u16) -> GeminiError {
        GeminiError::new(GeminiErrorKind::HttpError {
            status_code,
            message: String::new(),
        })
    }

    #[test]
    fn status_codes_are_classified() {
        assert_eq!(classify_error(&http(429)), "rate_limit");
        assert_eq!(classify_error(&http(403)), "auth");
        assert_eq!(classify_error(&http(503)), "server");
        assert_eq!(classify_error(&http(400)), "invalid_request");
    }

    #[test]
    fn missing_image_is_a_malformed_reply() {
        let err = GeminiError::new(GeminiErrorKind::MissingInlineImage);
        assert_eq!(classify_error(&err), "malformed_reply");
    }
}
