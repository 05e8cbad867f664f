//! # Mention Popup Component
//!
//! Candidate list shown just above the input box while an `@token` is being
//! typed. The core `MentionState` owns the candidates and the highlight
//! index. The only presentation state is the list's scroll offset, kept in a
//! `ListState` that lives in `TuiState` so clicks can be mapped back to rows.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState};
use unicode_width::UnicodeWidthStr;

use crate::core::mention::MentionState;

/// Most rows shown at once; longer lists scroll with the highlight.
const MAX_ROWS: u16 = 6;
const MIN_WIDTH: u16 = 20;

pub struct MentionPopup<'a> {
    pub state: &'a MentionState,
}

impl<'a> MentionPopup<'a> {
    pub fn new(state: &'a MentionState) -> Self {
        Self { state }
    }

    /// Where the popup goes: directly above `input`, starting at the caret
    /// column when it fits. `None` when there's nothing to show or no room.
    pub fn area(&self, input: Rect, caret_x: u16) -> Option<Rect> {
        if !self.state.is_active() {
            return None;
        }
        let candidates = self.state.candidates();
        let rows = (candidates.len() as u16).clamp(1, MAX_ROWS);
        let height = (rows + 2).min(input.y);
        if height < 3 {
            return None;
        }

        let widest = candidates.iter().map(|c| c.width() as u16 + 1).max().unwrap_or(0);
        let width = (widest + 4).max(MIN_WIDTH).min(input.width);
        let max_x = input.right().saturating_sub(width);
        let x = caret_x.saturating_sub(1).clamp(input.x, max_x.max(input.x));

        Some(Rect::new(x, input.y - height, width, height))
    }

    /// Draw the popup. `list_state` is updated with the highlight and the
    /// scroll offset ratatui picks to keep it visible.
    pub fn render(&self, frame: &mut Frame, area: Rect, list_state: &mut ListState) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" @{} ", self.state.typed_fragment()));

        let candidates = self.state.candidates();
        if candidates.is_empty() {
            let empty = List::new([ListItem::new(Span::styled(
                "no matching users",
                Style::default().fg(Color::DarkGray),
            ))])
            .block(block);
            frame.render_widget(empty, area);
            *list_state = ListState::default();
            return;
        }

        let items: Vec<ListItem> = candidates
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let style = if self.state.is_selected(i) {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(Span::styled(format!("@{name}"), style)))
            })
            .collect();

        list_state.select(Some(self.state.selected_index()));
        frame.render_stateful_widget(List::new(items).block(block), area, list_state);
    }
}

/// Candidate index under a click at `(col, row)`, given where the popup was
/// drawn, the list's scroll offset and how many candidates it held.
pub fn hit_test(
    area: Rect,
    offset: usize,
    candidate_count: usize,
    col: u16,
    row: u16,
) -> Option<usize> {
    let inner = Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    );
    if col < inner.x || col >= inner.right() || row < inner.y || row >= inner.bottom() {
        return None;
    }
    let index = offset + (row - inner.y) as usize;
    (index < candidate_count).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::directory::{Directory, User};
    use crate::core::mention::MentionEngine;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn state_for(text: &str) -> MentionState {
        let mut engine = MentionEngine::new();
        engine.on_draft_changed(text, &Directory::default()).clone()
    }

    #[test]
    fn test_no_area_when_inactive() {
        let state = MentionState::Inactive;
        let popup = MentionPopup::new(&state);
        assert!(popup.area(Rect::new(0, 20, 80, 3), 5).is_none());
    }

    #[test]
    fn test_area_sits_above_input() {
        let state = state_for("@Je");
        let popup = MentionPopup::new(&state);
        let area = popup.area(Rect::new(0, 20, 80, 3), 10).unwrap();
        assert_eq!(area.height, 4);
        assert_eq!(area.bottom(), 20);
        assert_eq!(area.x, 9);
    }

    #[test]
    fn test_area_clamped_to_input_width() {
        let state = state_for("@");
        let popup = MentionPopup::new(&state);
        let input = Rect::new(0, 20, 30, 3);
        let area = popup.area(input, 29).unwrap();
        assert!(area.right() <= input.right());
    }

    #[test]
    fn test_hit_test_rows() {
        let area = Rect::new(0, 10, 20, 4);
        assert_eq!(hit_test(area, 0, 2, 3, 11), Some(0));
        assert_eq!(hit_test(area, 0, 2, 3, 12), Some(1));
        assert_eq!(hit_test(area, 0, 2, 3, 10), None); // border
        assert_eq!(hit_test(area, 0, 1, 3, 12), None); // past last candidate
    }

    fn screen_rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    #[test]
    fn test_click_on_scrolled_list_picks_visible_row() {
        let users = ["Aa", "Ab", "Ac", "Ad", "Ae", "Af", "Ag", "Ah"]
            .iter()
            .enumerate()
            .map(|(i, name)| User::new(i as u32 + 1, *name))
            .collect();
        let directory = Directory::new(users);
        let mut engine = MentionEngine::new();
        engine.on_draft_changed("@A", &directory);
        for _ in 0..7 {
            engine.select_next();
        }

        let popup = MentionPopup::new(engine.state());
        let input = Rect::new(0, 20, 40, 3);
        let area = popup.area(input, 1).unwrap();
        let mut list_state = ListState::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 24)).unwrap();
        terminal
            .draw(|f| popup.render(f, area, &mut list_state))
            .unwrap();

        let first_row = area.y + 1;
        let rows = screen_rows(&terminal);
        let shown = &rows[first_row as usize];
        assert!(shown.contains("@Ac"), "{shown:?}");

        let count = engine.state().candidates().len();
        let hit = hit_test(area, list_state.offset(), count, area.x + 2, first_row);
        assert_eq!(hit, Some(2));
        assert_eq!(engine.state().candidates()[2], "Ac");
    }

    #[test]
    fn test_render_highlights_candidates() {
        let state = state_for("@Je");
        let popup = MentionPopup::new(&state);
        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
        terminal
            .draw(|f| popup.render(f, Rect::new(0, 0, 24, 4), &mut ListState::default()))
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("@Jeff"));
        assert!(text.contains("@Jerry"));
    }

    #[test]
    fn test_render_empty_list() {
        let state = state_for("@zz");
        let popup = MentionPopup::new(&state);
        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
        terminal
            .draw(|f| popup.render(f, Rect::new(0, 0, 24, 3), &mut ListState::default()))
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("no matching users"));
    }
}
