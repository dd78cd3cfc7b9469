//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the
//! socialnexus binary.

mod commands;
mod edit;
mod research;
mod run;

pub use commands::{Cli, Commands, OutputFormat};
pub use edit::edit_image;
pub use research::{list_post_types, research_brand};
pub use run::run_wizard;
