//! # Selection / Keyboard Handler
//!
//! Interprets the keys that matter to an open candidate list. Everything
//! else is left to the host text field.

use crate::core::mention::{Completion, MentionEngine};

/// Keys the candidate list reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionKey {
    Up,
    Down,
    Enter,
}

/// What the host should do after `handle_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not ours. Apply the field's default behaviour.
    Ignored,
    /// The highlight was handled (moved or pinned at a bound). Suppress the default.
    Moved,
    /// A candidate was spliced into the draft. Suppress the default.
    Committed(Completion),
}

impl KeyOutcome {
    /// True if the host must not run its own handling for the key.
    pub fn suppresses_default(&self) -> bool {
        !matches!(self, KeyOutcome::Ignored)
    }
}

/// Route `key` to the engine. `draft` is the full draft text.
///
/// Arrow keys are swallowed whenever a mention is active, even at the ends
/// of the list, so they never move the text caret while the list is open.
/// Enter only commits when there is something to commit.
pub fn handle_key(engine: &mut MentionEngine, key: MentionKey, draft: &str) -> KeyOutcome {
    if !engine.state().is_active() {
        return KeyOutcome::Ignored;
    }

    match key {
        MentionKey::Up => {
            engine.select_previous();
            KeyOutcome::Moved
        }
        MentionKey::Down => {
            engine.select_next();
            KeyOutcome::Moved
        }
        MentionKey::Enter => engine
            .commit(draft)
            .map_or(KeyOutcome::Ignored, KeyOutcome::Committed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::directory::Directory;

    fn active(text: &str) -> MentionEngine {
        let mut engine = MentionEngine::new();
        engine.on_draft_changed(text, &Directory::default());
        engine
    }

    #[test]
    fn test_inactive_ignores_everything() {
        let mut engine = MentionEngine::new();
        for key in [MentionKey::Up, MentionKey::Down, MentionKey::Enter] {
            assert_eq!(handle_key(&mut engine, key, "text"), KeyOutcome::Ignored);
        }
    }

    #[test]
    fn test_down_then_up_is_identity() {
        let mut engine = active("@J");
        let start = engine.state().selected_index();
        assert_eq!(handle_key(&mut engine, MentionKey::Down, "@J"), KeyOutcome::Moved);
        assert_eq!(engine.state().selected_index(), start + 1);
        assert_eq!(handle_key(&mut engine, MentionKey::Up, "@J"), KeyOutcome::Moved);
        assert_eq!(engine.state().selected_index(), start);
    }

    #[test]
    fn test_arrows_at_bounds_still_suppress() {
        let mut engine = active("@Kev");
        let outcome = handle_key(&mut engine, MentionKey::Up, "@Kev");
        assert!(outcome.suppresses_default());
        assert_eq!(engine.state().selected_index(), 0);
        handle_key(&mut engine, MentionKey::Down, "@Kev");
        assert_eq!(engine.state().selected_index(), 0);
    }

    #[test]
    fn test_enter_commits_selected() {
        let mut engine = active("hello @Je");
        handle_key(&mut engine, MentionKey::Down, "hello @Je");
        let outcome = handle_key(&mut engine, MentionKey::Enter, "hello @Je");
        match outcome {
            KeyOutcome::Committed(c) => {
                assert_eq!(c.text, "hello @Jerry ");
                assert_eq!(c.caret, 13);
            }
            other => panic!("Expected Committed, got {:?}", other),
        }
        assert!(!engine.state().is_active());
    }

    #[test]
    fn test_enter_with_no_candidates_falls_through() {
        let mut engine = active("@qq");
        let outcome = handle_key(&mut engine, MentionKey::Enter, "@qq");
        assert_eq!(outcome, KeyOutcome::Ignored);
        assert!(!outcome.suppresses_default());
    }
}
