//! # Mention Engine
//!
//! Detects an in-progress `@name` token at the end of the draft and keeps
//! the list of directory users that match what has been typed so far.
//!
//! ```text
//!            "@" + letters at caret
//!   Inactive ───────────────────────▶ Active { token_start, fragment,
//!      ▲                                       candidates, selected }
//!      │  edit breaks the token / commit            │  Up / Down
//!      └────────────────────────────────────────────┘  (index only)
//! ```
//!
//! Candidates are always rebuilt from `(fragment, directory)` on every draft
//! change, never patched incrementally.

use log::debug;

use crate::core::directory::Directory;

/// Transient autocomplete state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MentionState {
    #[default]
    Inactive,
    Active(ActiveMention),
}

/// An `@token` currently being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveMention {
    /// Byte offset of the `@` in the draft
    pub token_start: usize,
    /// Letters typed after the `@`
    pub fragment: String,
    /// Matching display names, in directory order
    pub candidates: Vec<String>,
    /// Highlighted candidate, always within `candidates` bounds (0 when empty)
    pub selected: usize,
}

impl MentionState {
    pub fn is_active(&self) -> bool {
        matches!(self, MentionState::Active(_))
    }

    pub fn token_start(&self) -> Option<usize> {
        match self {
            MentionState::Active(m) => Some(m.token_start),
            MentionState::Inactive => None,
        }
    }

    pub fn typed_fragment(&self) -> &str {
        match self {
            MentionState::Active(m) => &m.fragment,
            MentionState::Inactive => "",
        }
    }

    pub fn candidates(&self) -> &[String] {
        match self {
            MentionState::Active(m) => &m.candidates,
            MentionState::Inactive => &[],
        }
    }

    pub fn selected_index(&self) -> usize {
        match self {
            MentionState::Active(m) => m.selected,
            MentionState::Inactive => 0,
        }
    }

    /// True if `index` is the highlighted candidate.
    pub fn is_selected(&self, index: usize) -> bool {
        self.is_active() && index == self.selected_index()
    }
}

/// New draft text and caret produced by committing a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    /// Byte offset just past the inserted `@name `
    pub caret: usize,
}

/// Find the trailing `@[A-Za-z]*` token.
///
/// Returns the byte offset of the `@` and the letters after it. Only the
/// last `@` can match, since the token must run to the end of `text`.
pub fn detect_token(text: &str) -> Option<(usize, &str)> {
    let letters_start = text
        .trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .len();
    text[..letters_start]
        .ends_with('@')
        .then(|| (letters_start - 1, &text[letters_start..]))
}

/// Owns the `MentionState` and every transition on it.
#[derive(Debug, Default)]
pub struct MentionEngine {
    state: MentionState,
}

impl MentionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MentionState {
        &self.state
    }

    /// Recompute the state for a changed draft.
    ///
    /// `text` is the draft up to the caret, so the token considered is the
    /// one the user is typing right now.
    pub fn on_draft_changed(&mut self, text: &str, directory: &Directory) -> &MentionState {
        match detect_token(text) {
            Some((token_start, fragment)) => {
                let candidates = directory.filter_prefix(fragment);
                // Keep the highlight when only the candidate list changed size
                let previous = match &self.state {
                    MentionState::Active(m) if m.token_start == token_start => m.selected,
                    _ => 0,
                };
                let selected = previous.min(candidates.len().saturating_sub(1));
                if !self.state.is_active() {
                    debug!("Mention started at {} (fragment {:?})", token_start, fragment);
                }
                self.state = MentionState::Active(ActiveMention {
                    token_start,
                    fragment: fragment.to_string(),
                    candidates,
                    selected,
                });
            }
            None => {
                if self.state.is_active() {
                    debug!("Mention cancelled");
                }
                self.state = MentionState::Inactive;
            }
        }
        &self.state
    }

    /// Move the highlight down one row. Returns `true` if it moved.
    pub fn select_next(&mut self) -> bool {
        match &mut self.state {
            MentionState::Active(m) if m.selected + 1 < m.candidates.len() => {
                m.selected += 1;
                true
            }
            _ => false,
        }
    }

    /// Move the highlight up one row. Returns `true` if it moved.
    pub fn select_previous(&mut self) -> bool {
        match &mut self.state {
            MentionState::Active(m) if m.selected > 0 => {
                m.selected -= 1;
                true
            }
            _ => false,
        }
    }

    /// Commit the highlighted candidate into `draft`.
    pub fn commit(&mut self, draft: &str) -> Option<Completion> {
        let index = self.state.selected_index();
        self.commit_index(index, draft)
    }

    /// Commit the candidate at `index` into `draft`, then go inactive.
    ///
    /// Returns `None` (and leaves the state alone) if the engine is inactive,
    /// `index` is out of range, or the token no longer lines up with `draft`.
    pub fn commit_index(&mut self, index: usize, draft: &str) -> Option<Completion> {
        let MentionState::Active(m) = &self.state else {
            return None;
        };
        let name = m.candidates.get(index)?;

        let token_end = m.token_start + m.fragment.len() + 1;
        let before = draft.get(..m.token_start)?;
        let after = draft.get(token_end..)?;

        let mention = format!("@{name} ");
        let caret = before.len() + mention.len();
        let text = format!("{before}{mention}{after}");

        debug!("Mention committed: {} (caret -> {})", name, caret);
        self.reset();
        Some(Completion { text, caret })
    }

    pub fn reset(&mut self) {
        self.state = MentionState::Inactive;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(text: &str) -> MentionEngine {
        let mut engine = MentionEngine::new();
        engine.on_draft_changed(text, &Directory::default());
        engine
    }

    #[test]
    fn test_detect_token_trailing() {
        assert_eq!(detect_token("hello @Je"), Some((6, "Je")));
        assert_eq!(detect_token("@"), Some((0, "")));
        assert_eq!(detect_token("a@b @c"), Some((4, "c")));
    }

    #[test]
    fn test_detect_token_none() {
        assert_eq!(detect_token(""), None);
        assert_eq!(detect_token("hello"), None);
        assert_eq!(detect_token("hello @xyz123"), None);
        assert_eq!(detect_token("@Jeff "), None);
        assert_eq!(detect_token("@Je."), None);
    }

    #[test]
    fn test_active_on_prefix() {
        let engine = engine_with("hello @Je");
        let state = engine.state();
        assert!(state.is_active());
        assert_eq!(state.token_start(), Some(6));
        assert_eq!(state.typed_fragment(), "Je");
        assert_eq!(state.candidates(), ["Jeff", "Jerry"]);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn test_bare_at_offers_everyone() {
        let engine = engine_with("@");
        assert_eq!(engine.state().candidates().len(), 6);
    }

    #[test]
    fn test_digits_deactivate() {
        let engine = engine_with("hello @xyz123");
        assert!(!engine.state().is_active());
        assert!(engine.state().candidates().is_empty());
        assert_eq!(engine.state().token_start(), None);
    }

    #[test]
    fn test_only_last_at_counts() {
        let engine = engine_with("@Kevin and @b");
        assert_eq!(engine.state().token_start(), Some(11));
        assert_eq!(engine.state().candidates(), ["Bryan"]);
    }

    #[test]
    fn test_active_with_no_matches() {
        let engine = engine_with("@zz");
        assert!(engine.state().is_active());
        assert!(engine.state().candidates().is_empty());
    }

    #[test]
    fn test_typing_past_token_deactivates() {
        let dir = Directory::default();
        let mut engine = MentionEngine::new();
        engine.on_draft_changed("@Jeff", &dir);
        assert!(engine.state().is_active());
        engine.on_draft_changed("@Jeff ", &dir);
        assert_eq!(engine.state(), &MentionState::Inactive);
    }

    #[test]
    fn test_selection_clamps() {
        let mut engine = engine_with("@Je");
        assert!(!engine.select_previous());
        assert_eq!(engine.state().selected_index(), 0);
        assert!(engine.select_next());
        assert!(!engine.select_next());
        assert_eq!(engine.state().selected_index(), 1);
        assert!(engine.state().is_selected(1));
    }

    #[test]
    fn test_selection_clamped_when_list_shrinks() {
        let dir = Directory::default();
        let mut engine = MentionEngine::new();
        engine.on_draft_changed("@J", &dir);
        engine.select_next();
        engine.select_next();
        assert_eq!(engine.state().selected_index(), 2);
        engine.on_draft_changed("@Je", &dir);
        assert_eq!(engine.state().selected_index(), 1);
    }

    #[test]
    fn test_commit_splices_name() {
        let mut engine = engine_with("hello @Je");
        let completion = engine.commit("hello @Je").unwrap();
        assert_eq!(completion.text, "hello @Jeff ");
        assert_eq!(completion.caret, "hello @Jeff ".len());
        assert!(!engine.state().is_active());
    }

    #[test]
    fn test_commit_keeps_text_after_caret() {
        let mut engine = engine_with("hi @b");
        let completion = engine.commit("hi @b, thanks").unwrap();
        assert_eq!(completion.text, "hi @Bryan , thanks");
        assert_eq!(completion.caret, 10);
    }

    #[test]
    fn test_commit_without_candidates_is_noop() {
        let mut engine = engine_with("@zz");
        assert!(engine.commit("@zz").is_none());
        assert!(engine.state().is_active());
    }

    #[test]
    fn test_commit_index_out_of_range_is_noop() {
        let mut engine = engine_with("@Je");
        assert!(engine.commit_index(5, "@Je").is_none());
        assert!(engine.state().is_active());
    }

    #[test]
    fn test_commit_when_inactive_is_noop() {
        let mut engine = MentionEngine::new();
        assert!(engine.commit("hello").is_none());
    }
}
