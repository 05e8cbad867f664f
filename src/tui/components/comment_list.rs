//! # CommentList Component
//!
//! Scrollable view of posted comments, oldest first.
//!
//! `CommentList` is a transient component (created each frame) that wraps
//! `&'a mut CommentListState` (persistent scroll state) and the comments
//! slice (props). Each comment is drawn as a bordered card whose title
//! carries the author, id and time, with the Markdown body inside.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::comment::Comment;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

/// Scroll state for the comment list. Lives in `TuiState`.
pub struct CommentListState {
    pub scroll_state: ScrollViewState,
    /// Follow new comments as they're posted
    pub stick_to_bottom: bool,
    /// Content and viewport heights from the last render
    pub content_height: u16,
    pub viewport_height: u16,
}

impl Default for CommentListState {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            content_height: 0,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Re-attach to the bottom once the user scrolls back down to it.
    fn repin_if_at_bottom(&mut self) {
        if self.scroll_state.offset().y >= self.max_offset() {
            self.stick_to_bottom = true;
            self.scroll_state.scroll_to_bottom();
        }
    }
}

impl EventHandler for CommentListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => {
                self.stick_to_bottom = false;
                self.scroll_state.scroll_up();
            }
            TuiEvent::ScrollPageUp => {
                self.stick_to_bottom = false;
                self.scroll_state.scroll_page_up();
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => return None,
        }
        Some(())
    }
}

/// One comment card.
#[derive(Clone, Copy)]
pub struct CommentCard<'a> {
    pub comment: &'a Comment,
    /// The viewer's own comments get a different accent
    pub is_own: bool,
}

impl<'a> CommentCard<'a> {
    fn paragraph(&self) -> Paragraph<'static> {
        let accent = if self.is_own { Color::Green } else { Color::Yellow };
        let title = Line::from(vec![
            Span::styled(
                self.comment.author.clone(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" #{}", self.comment.id),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let time = Line::from(Span::styled(
            self.comment.created_at.format("%Y-%m-%d %H:%M").to_string(),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Right);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent).add_modifier(Modifier::DIM))
            .padding(Padding::horizontal(1))
            .title(title)
            .title(time);

        Paragraph::new(markdown::render(&self.comment.text, Color::White))
            .block(block)
            .wrap(Wrap { trim: false })
    }

    /// Rows this card needs at `width`, borders included.
    pub fn height(&self, width: u16) -> u16 {
        (self.paragraph().line_count(width) as u16).max(3)
    }
}

impl<'a> Widget for CommentCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.paragraph().render(area, buf);
    }
}

pub struct CommentList<'a> {
    pub state: &'a mut CommentListState,
    pub comments: &'a [Comment],
    /// Author of this session, for the own-comment accent
    pub author: &'a str,
}

impl<'a> CommentList<'a> {
    pub fn new(state: &'a mut CommentListState, comments: &'a [Comment], author: &'a str) -> Self {
        Self {
            state,
            comments,
            author,
        }
    }
}

impl<'a> Component for CommentList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.comments.is_empty() {
            let empty = Paragraph::new("No comments yet. Say something!")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }

        let width = area.width.saturating_sub(1); // scrollbar column
        let cards: Vec<(CommentCard, u16)> = self
            .comments
            .iter()
            .map(|comment| {
                let card = CommentCard {
                    comment,
                    is_own: comment.author == self.author,
                };
                (card, card.height(width))
            })
            .collect();
        let total: u16 = cards.iter().map(|(_, h)| *h).sum();

        self.state.content_height = total;
        self.state.viewport_height = area.height;

        let mut view = ScrollView::new(Size::new(width, total))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y = 0;
        for (card, height) in cards {
            view.render_widget(card, Rect::new(0, y, width, height));
            y += height;
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }
        frame.render_stateful_widget(view, area, &mut self.state.scroll_state);
    }
}
