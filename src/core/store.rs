//! # Comment Store
//!
//! Append-only, in-memory list of comments. Ids come from a counter so they
//! are unique for the lifetime of the store.

use chrono::{DateTime, Local};
use log::{debug, info};

use crate::core::comment::Comment;
use crate::core::notifier::Notifier;

#[derive(Debug, Default)]
pub struct CommentStore {
    comments: Vec<Comment>,
    next_id: u64,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pre-existing comment (startup data). The id counter moves
    /// past its id so later submissions never collide with it.
    pub fn seed(&mut self, comment: Comment) {
        self.next_id = self.next_id.max(comment.id + 1);
        self.comments.push(comment);
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Post `draft` as a new comment.
    ///
    /// Whitespace-only drafts are ignored and nobody is notified. Otherwise
    /// every mention in the draft is notified, in order, with the new id and
    /// `now`, and the comment is appended.
    pub fn submit(
        &mut self,
        draft: &str,
        author: &str,
        notifier: &mut dyn Notifier,
        now: DateTime<Local>,
    ) -> Option<&Comment> {
        if draft.trim().is_empty() {
            debug!("Ignoring empty submission");
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;

        let comment = Comment::new(id, author, draft, now);
        for name in &comment.mentions {
            notifier.notify(name, id, now);
        }
        info!(
            "Comment #{} posted by {} ({} mentions)",
            id,
            author,
            comment.mentions.len()
        );

        self.comments.push(comment);
        self.comments.last()
    }
}
