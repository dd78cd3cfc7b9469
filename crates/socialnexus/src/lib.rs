//! SocialNexus - AI content-marketing wizard
//!
//! SocialNexus takes a brand through a linear wizard: market research with
//! four content pillars, selection of a post format, generation of six posts
//! with AI-rendered images, optional image edits, and scheduling onto a
//! dashboard.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use socialnexus::{GeminiClient, NexusConfig, PostType, Wizard, load_brand};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> socialnexus::NexusResult<()> {
//!     let config = NexusConfig::load()?;
//!     let client = Arc::new(GeminiClient::new(config.gemini.clone())?);
//!     let mut wizard = Wizard::new(client, &config);
//!
//!     wizard.submit_brand(load_brand("brand.toml".as_ref())?)?;
//!     let analysis = wizard.run_research(None).await?;
//!     println!("{}", analysis.brand_positioning_advice());
//!
//!     wizard.accept_pillars()?;
//!     wizard.select_post_type(PostType::Carousel)?;
//!     let posts = wizard.generate().await?;
//!     println!("{} posts", posts.len());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `socialnexus_error` - Error types
//! - `socialnexus_core` - Domain types and configuration
//! - `socialnexus_interface` - The `ContentGenerator` trait
//! - `socialnexus_models` - Gemini REST client
//! - `socialnexus_workflow` - Stage machine, orchestrators and the wizard
//!
//! This crate re-exports everything for convenience and hosts the
//! command-line driver.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod brand;
mod campaign;
mod observability;

pub use brand::{load_brand, parse_brand};
pub use campaign::{CampaignPlan, CampaignReport, export_images, run_campaign};
pub use observability::{
    ObservabilityConfig, ObservabilityGuard, init_observability, stdout_meter_provider,
};

pub use socialnexus_core::*;
pub use socialnexus_error::*;
pub use socialnexus_interface::*;
pub use socialnexus_models::{GeminiClient, LlmMetrics};
pub use socialnexus_workflow::*;
