//! # Actions
//!
//! Everything that can happen in Tagbox becomes an `Action`.
//! User types a character? That's `Action::DraftChanged(text)`.
//! User presses Enter on an empty popup? That's `Action::Submit(draft)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` telling the adapter what to
//! do with its own widgets (replace the draft, clear it, quit).
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use chrono::Local;
use log::debug;

use crate::core::mention::Completion;
use crate::core::selection::{self, KeyOutcome, MentionKey};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Draft edited. Carries the text up to the caret.
    DraftChanged(String),
    /// Arrow/Enter while typing. `draft` is the full draft text.
    MentionKey { key: MentionKey, draft: String },
    /// Candidate row clicked.
    PickCandidate { index: usize, draft: String },
    /// Post the draft as a comment.
    Submit(String),
    /// Close the candidate list without inserting anything.
    DismissMention,
    /// Show or hide the directory overlay.
    ToggleDirectory,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Key handled by the candidate list; skip the field's default handling.
    Consumed,
    /// Key not handled; the field should apply its default.
    Unhandled,
    /// Replace the draft text and caret.
    ReplaceDraft(Completion),
    /// A comment was posted; empty the draft.
    ClearDraft,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::DraftChanged(text) => {
            app.mention.on_draft_changed(&text, &app.directory);
            Effect::None
        }
        Action::MentionKey { key, draft } => {
            match selection::handle_key(&mut app.mention, key, &draft) {
                KeyOutcome::Ignored => Effect::Unhandled,
                KeyOutcome::Moved => Effect::Consumed,
                KeyOutcome::Committed(completion) => Effect::ReplaceDraft(completion),
            }
        }
        Action::PickCandidate { index, draft } => app
            .mention
            .commit_index(index, &draft)
            .map_or(Effect::None, Effect::ReplaceDraft),
        Action::Submit(draft) => {
            let posted = app
                .store
                .submit(&draft, &app.author, app.notifier.as_mut(), Local::now())
                .map(|c| (c.id, c.mentions.len()));

            match posted {
                Some((id, mentions)) => {
                    app.mention.reset();
                    app.status_message = match (mentions, app.notifier.last_message()) {
                        (0, _) | (_, None) => format!("Posted comment #{id}"),
                        (n, Some(last)) => format!("Posted comment #{id}, notified {n}: {last}"),
                    };
                    Effect::ClearDraft
                }
                None => Effect::None,
            }
        }
        Action::DismissMention => {
            if app.mention.state().is_active() {
                app.mention.reset();
                Effect::Consumed
            } else {
                Effect::Unhandled
            }
        }
        Action::ToggleDirectory => {
            app.directory_visible = !app.directory_visible;
            debug!("Directory overlay visible: {}", app.directory_visible);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
