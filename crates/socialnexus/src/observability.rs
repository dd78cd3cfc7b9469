//! Logging and metrics setup for the command-line driver.
//!
//! Logs always go to stderr. Metrics are opt-in: without a meter provider the
//! client's OpenTelemetry instruments record nothing.

use opentelemetry::{KeyValue, global};
use opentelemetry_sdk::{
    Resource,
    metrics::{PeriodicReader, SdkMeterProvider},
};
use socialnexus_error::{ConfigError, NexusResult};
use std::env;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// How log output is produced.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name attached to startup logs
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Log filter used when `RUST_LOG` is unset (e.g., "info", "debug")
    pub log_level: String,
    /// Emit JSON lines instead of human-readable text
    pub json_logs: bool,
    /// Install a meter provider that exports to stdout
    pub stdout_metrics: bool,
}

impl ObservabilityConfig {
    /// Create a new configuration with the given service name.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            stdout_metrics: false,
        }
    }

    /// Set the fallback log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// Export request metrics to stdout.
    pub fn with_stdout_metrics(mut self, enabled: bool) -> Self {
        self.stdout_metrics = enabled;
        self
    }

    fn resource(&self) -> Resource {
        Resource::builder()
            .with_service_name(self.service_name.clone())
            .with_attribute(KeyValue::new("service.version", self.service_version.clone()))
            .build()
    }

    /// Filter from `RUST_LOG`, or the configured level when it is unset.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when neither directive parses.
    pub fn env_filter(&self) -> NexusResult<EnvFilter> {
        match env::var(EnvFilter::DEFAULT_ENV) {
            Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
                .map_err(|e| ConfigError::new(format!("Invalid RUST_LOG '{}': {}", directives, e)).into()),
            _ => EnvFilter::try_new(&self.log_level).map_err(|e| {
                ConfigError::new(format!("Invalid log level '{}': {}", self.log_level, e)).into()
            }),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

/// Keeps the meter provider alive. Dropping it flushes pending metrics.
#[derive(Debug, Default)]
pub struct ObservabilityGuard {
    meter_provider: Option<SdkMeterProvider>,
}

impl ObservabilityGuard {
    /// Whether a meter provider was installed.
    pub fn has_metrics(&self) -> bool {
        self.meter_provider.is_some()
    }
}

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.meter_provider.take() {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "Failed to flush metrics");
            }
        }
    }
}

/// Meter provider with a periodic stdout exporter.
pub fn stdout_meter_provider(config: &ObservabilityConfig) -> SdkMeterProvider {
    let reader = PeriodicReader::builder(opentelemetry_stdout::MetricExporter::default()).build();
    SdkMeterProvider::builder()
        .with_reader(reader)
        .with_resource(config.resource())
        .build()
}

/// Install the global tracing subscriber, and the meter provider when
/// metrics are enabled.
///
/// Logs go to stderr so command output on stdout stays clean. Exported
/// metrics are written to stdout.
///
/// # Errors
///
/// Returns a configuration error for an invalid filter or when a subscriber
/// is already installed.
pub fn init_observability(config: &ObservabilityConfig) -> NexusResult<ObservabilityGuard> {
    let env_filter = config.env_filter()?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to initialize logging: {}", e)))?;

    let mut guard = ObservabilityGuard::default();
    if config.stdout_metrics {
        let provider = stdout_meter_provider(config);
        global::set_meter_provider(provider.clone());
        guard.meter_provider = Some(provider);
    }

    tracing::debug!(
        service = %config.service_name,
        version = %config.service_version,
        json = config.json_logs,
        metrics = guard.has_metrics(),
        "Observability initialized"
    );
    Ok(guard)
}
