//! # TitleBar Component
//!
//! Top status bar: who is commenting, how many comments exist, and the
//! latest status message (post confirmations, notification summaries).
//!
//! Stateless. All three props come from the core `App`:
//!
//! 1. **With status**: `"Tagbox (author: Me) | 3 comments | Posted comment #2"`
//! 2. **Default**: `"Tagbox (author: Me) | 3 comments"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
///
/// # Props
///
/// - `author`: Name new comments are posted under
/// - `comment_count`: Comments currently in the store
/// - `status_message`: Transient status, may be empty
pub struct TitleBar {
    pub author: String,
    pub comment_count: usize,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(author: String, comment_count: usize, status_message: String) -> Self {
        Self {
            author,
            comment_count,
            status_message,
        }
    }

    fn count_label(&self) -> String {
        match self.comment_count {
            1 => "1 comment".to_string(),
            n => format!("{n} comments"),
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::raw(format!("Tagbox (author: {})", self.author)),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.count_label()),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                self.status_message.clone(),
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
