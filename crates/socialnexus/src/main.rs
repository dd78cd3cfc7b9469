//! SocialNexus CLI binary.
//!
//! This binary provides command-line access to the SocialNexus wizard:
//! - List post formats
//! - Research a brand's market
//! - Generate, export and schedule a set of posts
//! - Edit an image with a text instruction

use clap::Parser;
use socialnexus::{CampaignPlan, NexusConfig, NexusResult, ObservabilityConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> NexusResult<()> {
    use cli::{Cli, Commands, edit_image, list_post_types, research_brand, run_wizard};

    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "info" };
    // Held until exit so pending metrics are flushed
    let _observability = init_observability(
        &ObservabilityConfig::default()
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs)
            .with_stdout_metrics(cli.metrics),
    )?;

    let config = NexusConfig::load_with(cli.config.as_deref())?;

    // Execute the requested command
    match cli.command {
        Commands::PostTypes => list_post_types(),

        Commands::Research { brand, format } => {
            research_brand(&config, &brand, format).await?;
        }

        Commands::Run {
            brand,
            post_type,
            out,
            schedule_at,
            platforms,
        } => {
            let plan = CampaignPlan {
                post_type,
                out_dir: out,
                schedule_at,
                platforms,
            };
            run_wizard(&config, &brand, plan).await?;
        }

        Commands::Edit { image, prompt, out } => {
            edit_image(&config, &image, &prompt, &out).await?;
        }
    }

    Ok(())
}
