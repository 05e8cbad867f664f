//! # Directory Modal
//!
//! Centered overlay listing everyone who can be mentioned. Toggled with
//! Ctrl+U, dismissed with Esc.
//!
//! Purely presentational: visibility lives in the core `App`, and the list is
//! read-only so there is no selection to track.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph};

use crate::core::directory::Directory;

pub struct DirectoryModal<'a> {
    pub directory: &'a Directory,
}

impl<'a> DirectoryModal<'a> {
    pub fn new(directory: &'a Directory) -> Self {
        Self { directory }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 60, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Users ({}) ", self.directory.len()))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Type @Name to mention  Esc Close ").centered())
            .padding(Padding::horizontal(1));

        if self.directory.is_empty() {
            let empty = Paragraph::new("No users configured.\nAdd [[users]] entries to ~/.tagbox/config.toml")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let id_width = self
            .directory
            .users()
            .iter()
            .map(|u| u.id.to_string().len())
            .max()
            .unwrap_or(1);

        let items: Vec<ListItem> = self
            .directory
            .users()
            .iter()
            .map(|user| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>id_width$}", user.id),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        format!("@{}", user.display_name),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
