//! Wizard state machine and content orchestration for SocialNexus.
//!
//! - [`WorkflowState`]: pure stage transitions (brand → research → pillars →
//!   type selection → generation → dashboard)
//! - [`MarketResearchOrchestrator`]: one research call with progress labels
//! - [`ContentGenerationOrchestrator`]: six drafts, then concurrent per-post
//!   image renders reconciled into a watch-channel board
//! - [`PostCollection`] / [`ScheduledPosts`]: by-id post mutation and the
//!   scheduled accumulator
//! - [`Wizard`]: the controller that owns all of the above

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod generation;
mod posts;
mod research;
mod stage;
mod wizard;

pub use generation::{ContentGenerationOrchestrator, ImageOutcome, render_with_retry};
pub use posts::{PostCollection, ScheduledPosts};
pub use research::{MarketResearchOrchestrator, PROGRESS_LABELS, ResearchProgress};
pub use stage::{Stage, WorkflowEvent, WorkflowState};
pub use wizard::Wizard;
