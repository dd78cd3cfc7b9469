//! The generation board and the scheduled-posts accumulator.

use chrono::{DateTime, Utc};
use socialnexus_core::{GeneratedPost, ImagePayload, PostId, PostStatus, Schedule};
use socialnexus_error::{PostError, PostErrorKind};
use std::collections::HashMap;

/// Posts of the current generation run, in draft order.
///
/// Every mutation addresses a post by id and swaps the whole record, so a
/// late image result can never land on the wrong post or clobber a schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostCollection {
    posts: Vec<GeneratedPost>,
    image_failures: HashMap<PostId, String>,
}

impl PostCollection {
    /// A board holding the given drafts.
    pub fn new(posts: Vec<GeneratedPost>) -> Self {
        Self {
            posts,
            image_failures: HashMap::new(),
        }
    }

    /// Look up a post.
    pub fn get(&self, id: PostId) -> Option<&GeneratedPost> {
        self.posts.iter().find(|post| *post.id() == id)
    }

    /// Posts in draft order.
    pub fn iter(&self) -> impl Iterator<Item = &GeneratedPost> {
        self.posts.iter()
    }

    /// Number of posts.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether the board is empty.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts with neither an image nor a recorded image failure.
    pub fn pending_images(&self) -> usize {
        self.posts
            .iter()
            .filter(|post| post.image().is_none() && !self.image_failures.contains_key(post.id()))
            .count()
    }

    /// Last image failure recorded for a post.
    pub fn image_failure(&self, id: PostId) -> Option<&str> {
        self.image_failures.get(&id).map(String::as_str)
    }

    fn position(&self, id: PostId) -> Result<usize, PostError> {
        self.posts
            .iter()
            .position(|post| *post.id() == id)
            .ok_or_else(|| PostError::new(PostErrorKind::NotFound(id.to_string())))
    }

    /// Replace a post's image and clear any earlier failure for it.
    ///
    /// Returns `false` when the post is not on this board, e.g. a result that
    /// arrived after the user started over.
    pub fn replace_image(&mut self, id: PostId, image: ImagePayload) -> bool {
        let Ok(index) = self.position(id) else {
            return false;
        };
        let post = self.posts[index].clone().with_image(image);
        self.posts[index] = post;
        self.image_failures.remove(&id);
        true
    }

    /// Record why a post's image could not be produced. Any existing image
    /// is kept.
    pub fn record_image_failure(&mut self, id: PostId, message: impl Into<String>) -> bool {
        if self.position(id).is_err() {
            return false;
        }
        self.image_failures.insert(id, message.into());
        true
    }

    /// Schedule a draft and return the updated record.
    ///
    /// # Errors
    ///
    /// - [`PostErrorKind::EmptyPlatforms`] when no non-blank platform is given
    /// - [`PostErrorKind::NotFound`] for an unknown id
    /// - [`PostErrorKind::AlreadyScheduled`] when the post left `Draft`
    pub fn mark_scheduled<I, S>(
        &mut self,
        id: PostId,
        at: DateTime<Utc>,
        platforms: I,
    ) -> Result<GeneratedPost, PostError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let schedule = Schedule::new(at, platforms);
        if schedule.platforms().is_empty() {
            return Err(PostError::new(PostErrorKind::EmptyPlatforms));
        }

        let index = self.position(id)?;
        if *self.posts[index].status() != PostStatus::Draft {
            return Err(PostError::new(PostErrorKind::AlreadyScheduled(
                id.to_string(),
            )));
        }

        let post = self.posts[index].clone().scheduled(schedule);
        self.posts[index] = post.clone();
        Ok(post)
    }
}

impl<'a> IntoIterator for &'a PostCollection {
    type Item = &'a GeneratedPost;
    type IntoIter = std::slice::Iter<'a, GeneratedPost>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}

/// Every post scheduled in this session, across runs. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduledPosts {
    posts: Vec<GeneratedPost>,
}

impl ScheduledPosts {
    /// An empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scheduled post.
    pub fn push(&mut self, post: GeneratedPost) {
        self.posts.push(post);
    }

    /// Scheduled posts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &GeneratedPost> {
        self.posts.iter()
    }

    /// Number of scheduled posts.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether nothing has been scheduled yet.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
