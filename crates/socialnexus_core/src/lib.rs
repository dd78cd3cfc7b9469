//! Core data types for the SocialNexus content wizard.
//!
//! This crate provides the records that flow between the workflow stages
//! (brand, market analysis, post types, generated posts) and the layered
//! configuration every other crate reads.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod brand;
mod config;
mod image;
mod post;
mod post_type;
mod schedule;

pub use analysis::{Citation, ContentPillar, MarketAnalysis, PILLAR_COUNT};
pub use brand::{BrandDetails, BrandDetailsBuilder, Tone};
pub use config::{GeminiConfig, ImageRetryPolicy, NexusConfig, ResearchConfig};
pub use image::ImagePayload;
pub use post::{GeneratedPost, HASHTAG_COUNT, KEYWORD_COUNT, POSTS_PER_RUN, PostContent, PostId};
pub use post_type::PostType;
pub use schedule::{DEFAULT_PLATFORMS, KNOWN_PLATFORMS, PostStatus, Schedule};
