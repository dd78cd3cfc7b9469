//! Prompt text and response schemas for the text model.

use serde_json::{Value, json};
use socialnexus_core::{
    BrandDetails, HASHTAG_COUNT, KEYWORD_COUNT, MarketAnalysis, PILLAR_COUNT, POSTS_PER_RUN,
    PostType,
};

/// Research prompt for a brand.
pub fn research_prompt(brand: &BrandDetails) -> String {
    let competitors = if brand.competitors().is_empty() {
        String::new()
    } else {
        format!("\nKnown Competitors: {}.", brand.competitors().join(", "))
    };

    format!(
        "Conduct deep market research for a brand named \"{name}\" in the \"{industry}\" industry.
Target Audience: {audience}.
Tone: {tone}.
Unique Value Proposition: {uvp}.{competitors}

Please identify:
1. Main competitors and what is working for them.
2. Market opportunities for growth.
3. How to improve brand positioning.
4. {pillars} core content pillars for their social media strategy.

Format the output strictly as JSON.",
        name = brand.name(),
        industry = brand.industry(),
        audience = brand.target_audience(),
        tone = brand.tone_of_voice(),
        uvp = brand.unique_value_proposition(),
        competitors = competitors,
        pillars = PILLAR_COUNT,
    )
}

/// Schema of the research reply.
pub fn research_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "competitorsAnalysis": { "type": "STRING" },
            "marketOpportunities": { "type": "STRING" },
            "brandPositioningAdvice": { "type": "STRING" },
            "contentPillars": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" }
                    },
                    "required": ["title", "description"]
                }
            }
        },
        "required": [
            "competitorsAnalysis",
            "marketOpportunities",
            "brandPositioningAdvice",
            "contentPillars"
        ]
    })
}

/// Draft generation prompt.
pub fn draft_prompt(brand: &BrandDetails, analysis: &MarketAnalysis, post_type: PostType) -> String {
    // Pillars are embedded as JSON so titles with punctuation survive intact
    let pillars = serde_json::to_string(analysis.content_pillars()).unwrap_or_default();

    format!(
        "Based on the brand \"{name}\" and the content pillars {pillars},
generate {count} distinct {post_type} content options for social media.
Each option must include:
1. A catchy Title.
2. An engaging Caption.
3. {hashtags} relevant Hashtags.
4. {keywords} optimized Keywords.
5. A detailed AI Image Generation Prompt that captures the essence of the post.

The content should focus on {opportunities} and aim to improve positioning as per: {advice}.",
        name = brand.name(),
        pillars = pillars,
        count = POSTS_PER_RUN,
        post_type = post_type,
        hashtags = HASHTAG_COUNT,
        keywords = KEYWORD_COUNT,
        opportunities = analysis.market_opportunities(),
        advice = analysis.brand_positioning_advice(),
    )
}

/// Schema of the draft reply.
pub fn draft_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "caption": { "type": "STRING" },
                "hashtags": { "type": "ARRAY", "items": { "type": "STRING" } },
                "keywords": { "type": "ARRAY", "items": { "type": "STRING" } },
                "imagePrompt": { "type": "STRING" }
            },
            "required": ["title", "caption", "hashtags", "keywords", "imagePrompt"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use socialnexus_core::ContentPillar;

    fn brand() -> BrandDetails {
        BrandDetails::builder()
            .name("EcoSpark")
            .industry("Sustainable Energy")
            .target_audience("Homeowners")
            .unique_value_proposition("Installed in a day")
            .build()
            .unwrap()
    }

    #[test]
    fn research_prompt_names_brand_and_pillar_count() {
        let prompt = research_prompt(&brand());
        assert!(prompt.contains("\"EcoSpark\""));
        assert!(prompt.contains("\"Sustainable Energy\""));
        assert!(prompt.contains("4 core content pillars"));
        assert!(!prompt.contains("Known Competitors"));
    }

    #[test]
    fn draft_prompt_embeds_pillars_as_json() {
        let pillars = (1..=4)
            .map(|i| ContentPillar::new(format!("P{}", i), "d"))
            .collect();
        let analysis =
            MarketAnalysis::new("c", "rooftop growth", "be local", pillars, vec![]).unwrap();
        let prompt = draft_prompt(&brand(), &analysis, PostType::Carousel);

        assert!(prompt.contains(r#"{"title":"P1","description":"d"}"#));
        assert!(prompt.contains("6 distinct Carousel"));
        assert!(prompt.contains("rooftop growth"));
    }
}
