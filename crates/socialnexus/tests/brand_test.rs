//! Tests for brand file loading.

mod test_utils;

use socialnexus::{NexusErrorKind, Tone, load_brand, parse_brand};
use std::io::Write;
use test_utils::BRAND_TOML;

#[test]
fn test_brand_file_accepts_tone_alias() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(BRAND_TOML.as_bytes())?;

    let brand = load_brand(file.path())?;

    assert_eq!(brand.name(), "EcoSpark");
    assert_eq!(brand.tone_of_voice(), &Tone::WittySarcastic);
    assert_eq!(brand.competitors().len(), 2);
    Ok(())
}

#[test]
fn test_free_text_tone_is_kept() -> anyhow::Result<()> {
    let brand = parse_brand(
        r#"
        name = "Grind"
        industry = "Coffee"
        target_audience = "Students"
        tone_of_voice = "Sleepy but hopeful"
        unique_value_proposition = "Open all night"
        "#,
    )?;
    assert_eq!(brand.tone_of_voice(), &Tone::Custom("Sleepy but hopeful".into()));
    Ok(())
}

#[test]
fn test_missing_file_is_a_storage_error() {
    let err = load_brand(std::path::Path::new("/nonexistent/brand.toml")).unwrap_err();
    assert!(matches!(err.kind(), NexusErrorKind::Storage(_)));
}

#[test]
fn test_missing_field_is_a_config_error() {
    let err = parse_brand(r#"name = "Only a name""#).unwrap_err();
    assert!(matches!(err.kind(), NexusErrorKind::Config(_)));
}

#[test]
fn test_blank_field_is_rejected() {
    let err = parse_brand(
        r#"
        name = "Grind"
        industry = "   "
        target_audience = "Students"
        unique_value_proposition = "Open all night"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err.kind(), NexusErrorKind::Builder(_)));
}
