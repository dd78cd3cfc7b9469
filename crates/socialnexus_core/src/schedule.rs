//! Post lifecycle status and scheduling details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platforms offered by the scheduler.
pub const KNOWN_PLATFORMS: [&str; 5] = ["Instagram", "Facebook", "X", "Threads", "LinkedIn"];

/// Platforms selected when the user does not choose any.
pub const DEFAULT_PLATFORMS: [&str; 2] = ["Instagram", "LinkedIn"];

/// Lifecycle of a generated post. Only moves forward.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Generated, not yet scheduled
    #[default]
    #[display("draft")]
    Draft,
    /// Scheduled for a time and set of platforms
    #[display("scheduled")]
    Scheduled,
    /// Published; never produced locally
    #[display("published")]
    Published,
}

/// When and where a post is scheduled.
///
/// Platform names keep their first-seen order and duplicates are dropped.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use socialnexus_core::Schedule;
///
/// let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
/// let schedule = Schedule::new(at, ["Instagram", "LinkedIn", "Instagram"]);
/// assert_eq!(schedule.platforms(), &vec!["Instagram".to_string(), "LinkedIn".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct Schedule {
    /// Publication time
    at: DateTime<Utc>,
    /// Target platforms, ordered and duplicate-free
    platforms: Vec<String>,
}

impl Schedule {
    /// Create a schedule. Blank platform names are ignored.
    pub fn new<I, S>(at: DateTime<Utc>, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for platform in platforms {
            let platform = platform.into().trim().to_string();
            if !platform.is_empty() && !unique.contains(&platform) {
                unique.push(platform);
            }
        }
        Self {
            at,
            platforms: unique,
        }
    }
}
