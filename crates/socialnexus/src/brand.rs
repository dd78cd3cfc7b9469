//! Brand files.

use socialnexus_core::BrandDetails;
use socialnexus_error::{ConfigError, NexusResult, StorageError, StorageErrorKind};
use std::path::Path;
use tracing::{debug, instrument};

/// Load and validate brand details from a TOML file.
///
/// Keys are the [`BrandDetails`] fields; `tone` is accepted for
/// `tone_of_voice` and takes either a preset label or free text.
///
/// ```toml
/// name = "EcoSpark"
/// industry = "Sustainable Energy"
/// target_audience = "Eco-conscious homeowners"
/// tone = "Witty & Sarcastic"
/// unique_value_proposition = "Solar kits installed in a day"
/// competitors = ["SunRun"]
/// ```
///
/// # Errors
///
/// Fails when the file cannot be read, is not valid TOML, lacks a field,
/// or has a blank required field.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_brand(path: &Path) -> NexusResult<BrandDetails> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    let brand: BrandDetails = toml::from_str(&text).map_err(|e| {
        ConfigError::new(format!("Invalid brand file: {}", e))
            .with_source(path.display().to_string())
    })?;
    validated(brand)
}

/// Parse and validate brand details from TOML text.
///
/// # Errors
///
/// Fails on invalid TOML, a missing field or a blank required field.
pub fn parse_brand(text: &str) -> NexusResult<BrandDetails> {
    let brand: BrandDetails = toml::from_str(text)
        .map_err(|e| ConfigError::new(format!("Invalid brand file: {}", e)))?;
    validated(brand)
}

fn validated(brand: BrandDetails) -> NexusResult<BrandDetails> {
    brand.validate()?;
    debug!(name = %brand.name(), tone = %brand.tone_of_voice(), "Loaded brand");
    Ok(brand)
}
