//! `post-types` and `research` command handlers.

use super::OutputFormat;
use socialnexus::{
    GeminiClient, JsonError, MarketAnalysis, MarketResearchOrchestrator, NexusConfig,
    NexusResult, PostType, ResearchProgress, load_brand,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Print the post formats with their descriptions.
pub fn list_post_types() {
    for post_type in PostType::all() {
        println!("{:<24} {}", post_type, post_type.description());
    }
}

/// Research a brand and print the analysis.
pub async fn research_brand(
    config: &NexusConfig,
    brand: &Path,
    format: OutputFormat,
) -> NexusResult<()> {
    let brand = load_brand(brand)?;
    let client = Arc::new(GeminiClient::new(config.gemini.clone())?);
    let orchestrator = MarketResearchOrchestrator::new(client, config.research);

    let (tx, printer) = progress_printer();
    let analysis = orchestrator.run(&brand, Some(tx)).await;
    let _ = printer.await;
    let analysis = analysis?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&analysis)
                .map_err(|e| JsonError::new("market analysis", e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => print_analysis(&analysis),
    }
    Ok(())
}

/// Spawn a task that prints research progress labels to stderr.
pub(crate) fn progress_printer() -> (
    mpsc::Sender<ResearchProgress>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::channel::<ResearchProgress>(8);
    let handle = tokio::spawn(async move {
        let mut last = "";
        while let Some(tick) = rx.recv().await {
            if tick.label != last {
                eprintln!("{}", tick.label);
                last = tick.label;
            }
        }
    });
    (tx, handle)
}

pub(crate) fn print_analysis(analysis: &MarketAnalysis) {
    println!("Competitor analysis");
    println!("  {}", analysis.competitors_analysis());
    println!();
    println!("Market opportunities");
    println!("  {}", analysis.market_opportunities());
    println!();
    println!("Positioning advice");
    println!("  {}", analysis.brand_positioning_advice());
    println!();
    println!("Content pillars");
    for (index, pillar) in analysis.content_pillars().iter().enumerate() {
        println!("  {}. {}: {}", index + 1, pillar.title(), pillar.description());
    }
    if !analysis.citations().is_empty() {
        println!();
        println!("Sources");
        for citation in analysis.citations() {
            println!("  - {} <{}>", citation.title(), citation.uri());
        }
    }
}
