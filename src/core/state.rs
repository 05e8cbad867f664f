//! # Application State
//!
//! Core business state for Tagbox. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── directory: Directory            // mentionable users (fixed)
//! ├── store: CommentStore             // posted comments
//! ├── mention: MentionEngine          // autocomplete state machine
//! ├── notifier: Box<dyn Notifier>     // where mention notices go
//! ├── author: String                  // name on new comments
//! ├── directory_visible: bool         // directory overlay toggle
//! └── status_message: String          // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use chrono::{Local, TimeZone};
use log::warn;

use crate::core::comment::Comment;
use crate::core::config::ResolvedConfig;
use crate::core::directory::Directory;
use crate::core::mention::MentionEngine;
use crate::core::notifier::{LogNotifier, Notifier};
use crate::core::store::CommentStore;

pub struct App {
    pub directory: Directory,
    pub store: CommentStore,
    pub mention: MentionEngine,
    pub notifier: Box<dyn Notifier>,
    pub author: String,
    pub directory_visible: bool,
    pub status_message: String,
}

impl App {
    /// Build an app from injected collaborators.
    pub fn new(
        directory: Directory,
        store: CommentStore,
        notifier: Box<dyn Notifier>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            store,
            mention: MentionEngine::new(),
            notifier,
            author: author.into(),
            directory_visible: false,
            status_message: String::from("Type @ to mention someone"),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut store = CommentStore::new();
        if config.seed_comments {
            for comment in seed_comments() {
                store.seed(comment);
            }
        }
        Self::new(
            config.directory.clone(),
            store,
            Box::new(LogNotifier::new(config.author.clone())),
            config.author.clone(),
        )
    }
}

/// The two example comments a fresh board starts with.
pub fn seed_comments() -> Vec<Comment> {
    let seeds = [
        (0, "Jeff", "This task is really hard, I need help.", (10, 30)),
        (1, "Gabbey", "What do you need help with?", (11, 15)),
    ];
    seeds
        .into_iter()
        .filter_map(|(id, author, text, (hour, minute))| {
            match Local.with_ymd_and_hms(2024, 9, 13, hour, minute, 0).single() {
                Some(at) => Some(Comment::new(id, author, text, at)),
                None => {
                    warn!("Skipping seed comment #{}: ambiguous local time", id);
                    None
                }
            }
        })
        .collect()
}
