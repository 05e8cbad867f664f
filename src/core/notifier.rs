//! # Notifier
//!
//! The seam where mention notifications leave the app. The store calls
//! `notify` once per mention when a comment is posted. Delivery is up to
//! the implementation: `LogNotifier` writes the message to the log and
//! remembers it for the status bar.

use chrono::{DateTime, Local};
use log::info;

/// Receives one call per mention in a posted comment.
pub trait Notifier {
    /// Fire and forget. There is no failure path.
    fn notify(&mut self, user: &str, comment_id: u64, at: DateTime<Local>);

    /// Most recent message, if the implementation keeps one.
    fn last_message(&self) -> Option<&str> {
        None
    }
}

/// Human-readable notification text.
pub fn format_notification(user: &str, author: &str, comment_id: u64, at: DateTime<Local>) -> String {
    format!(
        "Hey {user}, {author} mentioned you in Comment #{comment_id} on {}",
        at.format("%a %b %d %Y")
    )
}

/// Logs each notification at `info`.
pub struct LogNotifier {
    author: String,
    last: Option<String>,
}

impl LogNotifier {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            last: None,
        }
    }
}

impl Notifier for LogNotifier {
    fn notify(&mut self, user: &str, comment_id: u64, at: DateTime<Local>) {
        let message = format_notification(user, &self.author, comment_id, at);
        info!("{}", message);
        self.last = Some(message);
    }

    fn last_message(&self) -> Option<&str> {
        self.last.as_deref()
    }
}
