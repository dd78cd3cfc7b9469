#![cfg(feature = "api")]

// Live tests against the real Gemini API.
//
// Run with: cargo test -p socialnexus_models --features api
// Requires GEMINI_API_KEY in the environment or a .env file.

mod test_utils;

use socialnexus_core::{GeminiConfig, PostType};
use socialnexus_interface::ContentGenerator;
use socialnexus_models::GeminiClient;
use test_utils::{sample_analysis, sample_brand};

#[tokio::test]
async fn test_live_research_returns_four_pillars() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let client = GeminiClient::new(GeminiConfig::default())?;

    let analysis = client.perform_research(&sample_brand()).await?;

    assert_eq!(analysis.content_pillars().len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_live_drafts_and_one_image() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let client = GeminiClient::new(GeminiConfig::default())?;

    let posts = client
        .generate_drafts(&sample_brand(), &sample_analysis(), PostType::SingleImage)
        .await?;
    assert_eq!(posts.len(), 6);

    let image = client.render_image(posts[0].content().image_prompt()).await?;
    assert!(!image.data().is_empty());
    Ok(())
}
