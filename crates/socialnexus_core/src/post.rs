//! Generated posts.

use crate::{ImagePayload, PostStatus, PostType, Schedule};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Posts produced by every generation run.
pub const POSTS_PER_RUN: usize = 6;

/// Hashtags on every post.
pub const HASHTAG_COUNT: usize = 10;

/// SEO keywords on every post.
pub const KEYWORD_COUNT: usize = 5;

/// Identifier assigned to a post when it is created. Never reassigned.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::str::FromStr for PostId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// The copy of a post as written by the model.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(rename_all = "camelCase")]
pub struct PostContent {
    /// Headline
    title: String,
    /// Caption body
    caption: String,
    /// Hashtags, [`HASHTAG_COUNT`] of them
    hashtags: Vec<String>,
    /// SEO keywords, [`KEYWORD_COUNT`] of them
    keywords: Vec<String>,
    /// Prompt used to render the post image
    image_prompt: String,
}

impl PostContent {
    /// Create post content.
    pub fn new(
        title: impl Into<String>,
        caption: impl Into<String>,
        hashtags: Vec<String>,
        keywords: Vec<String>,
        image_prompt: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            caption: caption.into(),
            hashtags,
            keywords,
            image_prompt: image_prompt.into(),
        }
    }

    /// Describe the first way this content breaks the draft contract, if any.
    pub fn violation(&self) -> Option<String> {
        if self.hashtags.len() != HASHTAG_COUNT {
            return Some(format!(
                "expected {} hashtags, got {}",
                HASHTAG_COUNT,
                self.hashtags.len()
            ));
        }
        if self.keywords.len() != KEYWORD_COUNT {
            return Some(format!(
                "expected {} keywords, got {}",
                KEYWORD_COUNT,
                self.keywords.len()
            ));
        }
        if self.image_prompt.trim().is_empty() {
            return Some("image prompt is empty".to_string());
        }
        None
    }
}

/// A post produced by a generation run.
///
/// Updated only by full-record replacement: [`GeneratedPost::with_image`] and
/// [`GeneratedPost::scheduled`] consume the record and return the new one.
///
/// # Examples
///
/// ```
/// use socialnexus_core::{GeneratedPost, ImagePayload, PostContent, PostStatus, PostType};
///
/// let content = PostContent::new("Title", "Caption", vec![], vec![], "A sunrise");
/// let draft = GeneratedPost::draft(content, PostType::Carousel);
/// assert_eq!(draft.status(), &PostStatus::Draft);
/// assert!(draft.image().is_none());
///
/// let id = *draft.id();
/// let with_image = draft.with_image(ImagePayload::new("image/png", "AAAA"));
/// assert_eq!(with_image.id(), &id);
/// assert!(with_image.image().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPost {
    /// Client-assigned id
    id: PostId,
    /// Model-written copy
    content: PostContent,
    /// Format selected for the run
    post_type: PostType,
    /// Rendered image, once available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<ImagePayload>,
    /// Lifecycle status
    status: PostStatus,
    /// Present only once scheduled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schedule: Option<Schedule>,
}

impl GeneratedPost {
    /// Create a new draft with a fresh id and no image.
    pub fn draft(content: PostContent, post_type: PostType) -> Self {
        Self {
            id: PostId::new(),
            content,
            post_type,
            image: None,
            status: PostStatus::Draft,
            schedule: None,
        }
    }

    /// The same post with its image replaced.
    pub fn with_image(self, image: ImagePayload) -> Self {
        Self {
            image: Some(image),
            ..self
        }
    }

    /// The same post, scheduled.
    pub fn scheduled(self, schedule: Schedule) -> Self {
        Self {
            status: PostStatus::Scheduled,
            schedule: Some(schedule),
            ..self
        }
    }
}
