//! Test utilities for SocialNexus model tests.
//!
//! Fixtures for Gemini replies and a client pointed at a local mock server.

#![allow(dead_code)]

use serde_json::{Value, json};
use socialnexus_core::{BrandDetails, ContentPillar, GeminiConfig, MarketAnalysis};
use socialnexus_models::GeminiClient;

pub const TEST_KEY: &str = "test-key";
pub const TEXT_PATH: &str = "/models/gemini-3-flash-preview:generateContent";
pub const IMAGE_PATH: &str = "/models/gemini-2.5-flash-image:generateContent";

/// A client that talks to `base_url` with a fixed key and short timeout.
pub fn test_client(base_url: &str) -> GeminiClient {
    let config = GeminiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..GeminiConfig::default()
    };
    GeminiClient::with_api_key(config, TEST_KEY).expect("failed to build test GeminiClient")
}

pub fn sample_brand() -> BrandDetails {
    BrandDetails::builder()
        .name("EcoSpark")
        .industry("Sustainable Energy")
        .target_audience("Eco-conscious homeowners")
        .unique_value_proposition("Solar kits installed in a day")
        .build()
        .expect("valid brand")
}

pub fn sample_analysis() -> MarketAnalysis {
    let pillars = (1..=4)
        .map(|i| ContentPillar::new(format!("Pillar {}", i), format!("Theme {}", i)))
        .collect();
    MarketAnalysis::new(
        "Competitors lean on rebates",
        "Renters are underserved",
        "Own the one-day install",
        pillars,
        vec![],
    )
    .expect("valid analysis")
}

/// A reply whose first candidate carries `text`.
pub fn text_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 20, "totalTokenCount": 30}
    })
}

/// A research reply with `pillars` pillars and two grounding chunks, one without `web`.
pub fn research_reply(pillars: usize) -> Value {
    let analysis = json!({
        "competitorsAnalysis": "SunPower dominates premium installs",
        "marketOpportunities": "Community solar for renters",
        "brandPositioningAdvice": "Lead with speed",
        "contentPillars": (0..pillars)
            .map(|i| json!({"title": format!("Pillar {}", i + 1), "description": "About it"}))
            .collect::<Vec<_>>()
    });
    let mut reply = text_reply(&analysis.to_string());
    reply["candidates"][0]["groundingMetadata"] = json!({
        "groundingChunks": [
            {"web": {"uri": "https://example.com/solar", "title": "Solar trends"}},
            {"retrievedContext": {"uri": "gs://bucket/doc"}}
        ]
    });
    reply
}

/// One draft item.
pub fn draft_item(i: usize, hashtags: usize, keywords: usize, prompt: &str) -> Value {
    json!({
        "title": format!("Post {}", i + 1),
        "caption": format!("Caption {}", i + 1),
        "hashtags": (0..hashtags).map(|h| format!("#tag{}", h)).collect::<Vec<_>>(),
        "keywords": (0..keywords).map(|k| format!("kw{}", k)).collect::<Vec<_>>(),
        "imagePrompt": prompt
    })
}

/// A drafts reply with `count` well-formed items.
pub fn drafts_reply(count: usize) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| draft_item(i, 10, 5, &format!("Image prompt {}", i + 1)))
        .collect();
    text_reply(&Value::Array(items).to_string())
}

/// An image reply: a text part followed by two inline images.
pub fn image_reply(first: &str, second: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"parts": [
                {"text": "Here is your image"},
                {"inlineData": {"mimeType": "image/png", "data": first}},
                {"inlineData": {"mimeType": "image/png", "data": second}}
            ]}
        }]
    })
}
