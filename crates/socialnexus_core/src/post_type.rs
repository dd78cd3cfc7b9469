//! Post formats offered in the type selection step.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// Format of the posts generated in a run.
///
/// # Examples
///
/// ```
/// use socialnexus_core::PostType;
///
/// assert_eq!(PostType::ContinuationCarousel.to_string(), "Continuation Carousel");
/// assert_eq!("continuation-carousel".parse::<PostType>(), Ok(PostType::ContinuationCarousel));
/// assert_eq!("GUIDE".parse::<PostType>(), Ok(PostType::Guide));
/// assert!("Reel".parse::<PostType>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum PostType {
    /// One standalone image
    #[display("Single Image")]
    #[serde(rename = "Single Image")]
    SingleImage,
    /// Multi-slide carousel
    #[display("Carousel")]
    Carousel,
    /// Carousel whose slides flow into each other
    #[display("Continuation Carousel")]
    #[serde(rename = "Continuation Carousel")]
    ContinuationCarousel,
    /// Data-driven visual
    #[display("Infographic")]
    Infographic,
    /// Step-by-step how-to
    #[display("Guide")]
    Guide,
}

impl PostType {
    /// One-line description shown next to the label.
    pub fn description(&self) -> &'static str {
        match self {
            PostType::SingleImage => "Impactful visuals with short descriptions.",
            PostType::Carousel => "Best for education and step-by-step guides.",
            PostType::ContinuationCarousel => "Stories that flow from slide to slide.",
            PostType::Infographic => "Data-driven, shareable knowledge.",
            PostType::Guide => "Deep dives into specific brand topics.",
        }
    }

    /// Every post type, in display order.
    pub fn all() -> Vec<PostType> {
        PostType::iter().collect()
    }
}

impl FromStr for PostType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', '_'], " ");
        PostType::iter()
            .find(|t| t.to_string().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("Unknown post type: {}", s))
    }
}
