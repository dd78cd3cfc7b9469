//! Brand identity supplied by the user at the start of a run.

use serde::{Deserialize, Serialize};
use socialnexus_error::{BuilderError, BuilderErrorKind};

/// Tone of voice for all generated copy.
///
/// The five named tones match the choices offered in the brand form; anything
/// else is carried verbatim as [`Tone::Custom`].
///
/// # Examples
///
/// ```
/// use socialnexus_core::Tone;
///
/// assert_eq!(Tone::default(), Tone::ProfessionalFriendly);
/// assert_eq!(Tone::from_label("witty & sarcastic"), Tone::WittySarcastic);
/// assert_eq!(Tone::from_label("Calm"), Tone::Custom("Calm".to_string()));
/// assert_eq!(Tone::BoldAggressive.to_string(), "Bold & Aggressive");
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(from = "String", into = "String")]
pub enum Tone {
    /// Professional & Friendly
    #[default]
    #[display("Professional & Friendly")]
    ProfessionalFriendly,
    /// Witty & Sarcastic
    #[display("Witty & Sarcastic")]
    WittySarcastic,
    /// Inspirational & Uplifting
    #[display("Inspirational & Uplifting")]
    InspirationalUplifting,
    /// Minimalist & Elegant
    #[display("Minimalist & Elegant")]
    MinimalistElegant,
    /// Bold & Aggressive
    #[display("Bold & Aggressive")]
    BoldAggressive,
    /// Free-text tone
    #[display("{}", _0)]
    Custom(String),
}

impl Tone {
    /// The named tones, in the order the brand form lists them.
    pub const PRESETS: [Tone; 5] = [
        Tone::ProfessionalFriendly,
        Tone::WittySarcastic,
        Tone::InspirationalUplifting,
        Tone::MinimalistElegant,
        Tone::BoldAggressive,
    ];

    /// Match a label against the named tones, falling back to free text.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        Self::PRESETS
            .into_iter()
            .find(|tone| tone.to_string().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| Tone::Custom(trimmed.to_string()))
    }
}

impl From<String> for Tone {
    fn from(label: String) -> Self {
        Tone::from_label(&label)
    }
}

impl From<Tone> for String {
    fn from(tone: Tone) -> Self {
        tone.to_string()
    }
}

/// Brand details entered in the first wizard step.
///
/// Immutable once built. Use [`BrandDetails::builder`]; `build()` rejects
/// blank required fields.
///
/// # Examples
///
/// ```
/// use socialnexus_core::{BrandDetails, Tone};
///
/// let brand = BrandDetails::builder()
///     .name("EcoSpark")
///     .industry("Sustainable Energy")
///     .target_audience("Eco-conscious homeowners")
///     .unique_value_proposition("Solar kits installed in a day")
///     .build()
///     .unwrap();
///
/// assert_eq!(brand.name(), "EcoSpark");
/// assert_eq!(brand.tone_of_voice(), &Tone::ProfessionalFriendly);
/// assert!(brand.competitors().is_empty());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct BrandDetails {
    /// Brand name
    name: String,
    /// Industry or niche
    industry: String,
    /// Who the content is for
    target_audience: String,
    /// Tone of voice for generated copy
    #[builder(default)]
    #[serde(default, alias = "tone")]
    tone_of_voice: Tone,
    /// What sets the brand apart
    unique_value_proposition: String,
    /// Known competitors, possibly none
    #[builder(default, setter(each(name = "competitor", into)))]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    competitors: Vec<String>,
}

impl BrandDetails {
    /// Start building brand details.
    pub fn builder() -> BrandDetailsBuilder {
        BrandDetailsBuilder::default()
    }

    /// Check that every required field has content.
    pub fn validate(&self) -> Result<(), BuilderError> {
        let required = [
            ("name", &self.name),
            ("industry", &self.industry),
            ("target_audience", &self.target_audience),
            ("unique_value_proposition", &self.unique_value_proposition),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(BuilderError::new(BuilderErrorKind::BlankField(
                field.to_string(),
            ))),
            None => Ok(()),
        }
    }
}

impl BrandDetailsBuilder {
    /// Build the brand details.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or blank.
    pub fn build(&self) -> Result<BrandDetails, BuilderError> {
        let brand = self.build_internal().map_err(|e| match e {
            BrandDetailsBuilderError::UninitializedField(field) => {
                BuilderError::new(BuilderErrorKind::MissingField(field.to_string()))
            }
            BrandDetailsBuilderError::ValidationError(message) => {
                BuilderError::new(BuilderErrorKind::ValidationFailed(message))
            }
        })?;
        brand.validate()?;
        Ok(brand)
    }
}
