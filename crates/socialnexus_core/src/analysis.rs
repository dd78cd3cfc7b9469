//! Market research results.

use serde::{Deserialize, Serialize};
use socialnexus_error::{BuilderError, BuilderErrorKind};

/// Number of content pillars every analysis carries.
pub const PILLAR_COUNT: usize = 4;

/// A strategic theme that scopes generated content.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct ContentPillar {
    /// Short pillar title
    title: String,
    /// What content under this pillar covers
    description: String,
}

impl ContentPillar {
    /// Create a pillar.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A web source the research was grounded on.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct Citation {
    /// Source URI
    uri: String,
    /// Source page title
    title: String,
}

impl Citation {
    /// Create a citation.
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }
}

/// Output of the research stage.
///
/// Always holds exactly [`PILLAR_COUNT`] pillars; [`MarketAnalysis::new`]
/// refuses anything else so a malformed reply can never produce a partial
/// analysis.
///
/// # Examples
///
/// ```
/// use socialnexus_core::{ContentPillar, MarketAnalysis};
///
/// let pillars = (1..=4)
///     .map(|i| ContentPillar::new(format!("Pillar {}", i), "About it"))
///     .collect();
/// let analysis = MarketAnalysis::new("Rivals", "Gaps", "Be bold", pillars, vec![]).unwrap();
/// assert_eq!(analysis.content_pillars().len(), 4);
///
/// let too_few = vec![ContentPillar::new("Only", "One")];
/// assert!(MarketAnalysis::new("Rivals", "Gaps", "Be bold", too_few, vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    /// Who the competitors are and what they do
    competitors_analysis: String,
    /// Gaps and openings in the market
    market_opportunities: String,
    /// How the brand should position itself
    brand_positioning_advice: String,
    /// Exactly four content pillars
    content_pillars: Vec<ContentPillar>,
    /// Sources, in the order the research returned them
    #[serde(default)]
    citations: Vec<Citation>,
}

impl MarketAnalysis {
    /// Assemble an analysis, enforcing the pillar count.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly [`PILLAR_COUNT`] pillars are given.
    pub fn new(
        competitors_analysis: impl Into<String>,
        market_opportunities: impl Into<String>,
        brand_positioning_advice: impl Into<String>,
        content_pillars: Vec<ContentPillar>,
        citations: Vec<Citation>,
    ) -> Result<Self, BuilderError> {
        if content_pillars.len() != PILLAR_COUNT {
            return Err(BuilderError::new(BuilderErrorKind::ValidationFailed(
                format!(
                    "expected {} content pillars, got {}",
                    PILLAR_COUNT,
                    content_pillars.len()
                ),
            )));
        }
        Ok(Self {
            competitors_analysis: competitors_analysis.into(),
            market_opportunities: market_opportunities.into(),
            brand_positioning_advice: brand_positioning_advice.into(),
            content_pillars,
            citations,
        })
    }
}
