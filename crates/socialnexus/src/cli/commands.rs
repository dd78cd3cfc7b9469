//! CLI command definitions.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use socialnexus::PostType;
use std::path::PathBuf;

/// SocialNexus - brand research, post generation and scheduling with Gemini
#[derive(Parser, Debug)]
#[command(name = "socialnexus")]
#[command(about = "Brand research, post generation and scheduling with Gemini", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Export request metrics to stdout
    #[arg(long, global = true)]
    pub metrics: bool,

    /// Configuration file layered over the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the post formats
    PostTypes,

    /// Research a brand's market and print the content pillars
    Research {
        /// Path to the brand TOML file
        #[arg(long)]
        brand: PathBuf,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Run the full wizard: research, generation and optional scheduling
    Run {
        /// Path to the brand TOML file
        #[arg(long)]
        brand: PathBuf,

        /// Post format (e.g. "carousel", "single-image")
        #[arg(long, value_parser = parse_post_type)]
        post_type: PostType,

        /// Directory to write rendered images into
        #[arg(long)]
        out: Option<PathBuf>,

        /// Schedule every rendered post at this RFC 3339 time
        #[arg(long, value_parser = parse_time)]
        schedule_at: Option<DateTime<Utc>>,

        /// Platform to schedule on (repeatable; defaults to Instagram and LinkedIn)
        #[arg(long = "platform", requires = "schedule_at")]
        platforms: Vec<String>,
    },

    /// Edit an image with a text instruction
    Edit {
        /// Source image file
        #[arg(long)]
        image: PathBuf,

        /// What to change
        #[arg(long)]
        prompt: String,

        /// Where to write the edited image
        #[arg(long)]
        out: PathBuf,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

fn parse_post_type(value: &str) -> Result<PostType, String> {
    value.parse()
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 time like 2026-11-02T09:30:00Z: {}", e))
}
