//! Test utilities for SocialNexus facade tests.

#![allow(dead_code)]

use async_trait::async_trait;
use socialnexus::{
    BrandDetails, ContentError, ContentErrorKind, ContentGenerator, ContentPillar, ContentResult,
    GeneratedPost, ImagePayload, MarketAnalysis, PostContent, PostType,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// PNG signature, enough to tell exported bytes apart.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

pub const BRAND_TOML: &str = r#"
name = "EcoSpark"
industry = "Sustainable Energy"
target_audience = "Eco-conscious homeowners"
tone = "witty & sarcastic"
unique_value_proposition = "Solar kits installed in a day"
competitors = ["SunRun", "Tesla Energy"]
"#;

pub fn sample_brand() -> BrandDetails {
    socialnexus::parse_brand(BRAND_TOML).expect("valid brand")
}

/// Generator whose renders succeed except for the prompt `fail_prompt`.
#[derive(Default)]
pub struct StubGenerator {
    pub fail_prompt: Option<String>,
    pub renders: AtomicUsize,
}

impl StubGenerator {
    pub fn failing_on(prompt: &str) -> Self {
        Self {
            fail_prompt: Some(prompt.to_string()),
            ..Self::default()
        }
    }

    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentGenerator for StubGenerator {
    async fn perform_research(&self, _brand: &BrandDetails) -> ContentResult<MarketAnalysis> {
        let pillars = (1..=4)
            .map(|i| ContentPillar::new(format!("Pillar {}", i), "Theme"))
            .collect();
        Ok(MarketAnalysis::new("c", "o", "a", pillars, vec![]).expect("four pillars"))
    }

    async fn generate_drafts(
        &self,
        _brand: &BrandDetails,
        _analysis: &MarketAnalysis,
        post_type: PostType,
    ) -> ContentResult<Vec<GeneratedPost>> {
        Ok((0..6)
            .map(|i| {
                let content = PostContent::new(
                    format!("Title {}", i),
                    "Caption",
                    (0..10).map(|h| format!("#t{}", h)).collect(),
                    (0..5).map(|k| format!("k{}", k)).collect(),
                    format!("prompt-{}", i),
                );
                GeneratedPost::draft(content, post_type)
            })
            .collect())
    }

    async fn render_image(&self, prompt: &str) -> ContentResult<ImagePayload> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        if self.fail_prompt.as_deref() == Some(prompt) {
            return Err(ContentError::new(ContentErrorKind::Image(
                "no image returned".to_string(),
            )));
        }
        Ok(ImagePayload::from_bytes("image/png", PNG_BYTES))
    }

    async fn edit_image(&self, image: &ImagePayload, _prompt: &str) -> ContentResult<ImagePayload> {
        Ok(image.clone())
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}
