//! # InputBox Component
//!
//! The draft editor at the bottom of the screen.
//!
//! ## Responsibilities
//!
//! - Capture text input
//! - Handle editing (backspace, delete, caret movement, paste)
//! - Emit `Submit` on Enter (the parent decides whether a mention commit
//!   gets the key first)
//! - Display the draft, wrapped, with internal scrolling past a few lines
//!
//! ## State Management
//!
//! The buffer is internal state and is always the raw, editable draft.
//! The author name and whether the mention popup is open are props.

mod caret;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use caret::{Caret, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, row_count, wrap_options};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User asked to post the draft (Enter pressed)
    Submit(String),
    /// Text or caret changed; the text before the caret may hold a new token
    ContentChanged,
}

/// Text input component.
///
/// # Props
///
/// - `author`: Name shown in the title
/// - `mention_open`: Highlights the border while candidates are showing
///
/// # State
///
/// - `buffer`: Current draft
/// - `caret`: Caret byte offset and scroll row (see `Caret`)
pub struct InputBox {
    /// Draft text (Internal State)
    pub buffer: String,
    /// Comment author (Prop)
    pub author: String,
    /// Whether the candidate popup is open (Prop)
    pub mention_open: bool,
    caret: Caret,
}

impl InputBox {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            author: author.into(),
            mention_open: false,
            caret: Caret::default(),
        }
    }

    /// Byte offset of the caret in `buffer`.
    pub fn caret(&self) -> usize {
        self.caret.pos
    }

    /// Draft text up to the caret, which is what mention detection looks at.
    pub fn text_before_caret(&self) -> &str {
        &self.buffer[..self.caret.pos]
    }

    /// Replace the draft, e.g. after a mention was committed.
    /// A caret that isn't on a char boundary is moved to the end.
    pub fn set_content(&mut self, text: String, caret: usize) {
        self.caret.pos = if text.is_char_boundary(caret) {
            caret
        } else {
            text.len()
        };
        self.buffer = text;
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.caret.reset();
    }

    /// Height needed for the current draft, clamped to the visible maximum.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let rows = row_count(&self.buffer, inner_width(area_width));
        rows.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Wrapped rows of the draft that fit in the box at the current scroll.
    fn visible_text(&self, width: u16) -> String {
        let rows: Vec<String> = self
            .buffer
            .split('\n')
            .flat_map(|line| {
                if line.is_empty() {
                    vec![String::new()]
                } else {
                    textwrap::wrap(line, wrap_options(width))
                        .into_iter()
                        .map(|piece| piece.into_owned())
                        .collect()
                }
            })
            .collect();

        rows.into_iter()
            .skip(self.caret.scroll as usize)
            .take(MAX_VISIBLE_LINES as usize)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Screen position of the caret inside `area`.
    pub fn caret_screen_pos(&self, area: Rect) -> (u16, u16) {
        let (row, col) = self.caret.row_col(&self.buffer, inner_width(area.width));
        // border + left padding
        let x = area.x + 2 + col;
        let y = area.y + 1 + row.saturating_sub(self.caret.scroll);
        (x.min(area.right().saturating_sub(2)), y)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        self.caret.keep_visible(&self.buffer, width);

        let border = if self.mention_open {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Green)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .padding(Padding::horizontal(1))
            .title(format!(" Comment as {} ", self.author))
            .title_bottom(" Enter post  @ mention  Ctrl+U users  Esc quit ");

        let input = Paragraph::new(self.visible_text(width))
            .block(block)
            .style(Style::default().fg(Color::White));
        frame.render_widget(input, area);

        frame.set_cursor_position(self.caret_screen_pos(area));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let changed = match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.caret.pos, *c);
                self.caret.pos += c.len_utf8();
                true
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.caret.pos, text);
                self.caret.pos += text.len();
                true
            }
            TuiEvent::Backspace => {
                let end = self.caret.pos;
                self.caret.left(&self.buffer) && {
                    self.buffer.drain(self.caret.pos..end);
                    true
                }
            }
            TuiEvent::Delete => {
                let start = self.caret.pos;
                let mut next = Caret { pos: start, scroll: 0 };
                next.right(&self.buffer) && {
                    self.buffer.drain(start..next.pos);
                    true
                }
            }
            TuiEvent::CursorLeft => self.caret.left(&self.buffer),
            TuiEvent::CursorRight => self.caret.right(&self.buffer),
            TuiEvent::CursorHome => self.caret.home(&self.buffer),
            TuiEvent::CursorEnd => self.caret.end(&self.buffer),
            TuiEvent::CursorUp => self.caret.vertical(&self.buffer, true),
            TuiEvent::CursorDown => self.caret.vertical(&self.buffer, false),
            TuiEvent::Submit => {
                return (!self.buffer.trim().is_empty())
                    .then(|| InputEvent::Submit(self.buffer.clone()));
            }
            _ => false,
        };
        changed.then_some(InputEvent::ContentChanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new("Me");
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input
    }

    #[test]
    fn test_input_box_new() {
        let input = InputBox::new("Me");
        assert!(input.buffer.is_empty());
        assert_eq!(input.caret(), 0);
    }

    #[test]
    fn test_handle_input() {
        let mut input = InputBox::new("Me");

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = InputBox::new("Me");
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_delete_under_caret() {
        let mut input = typed("abc");
        input.handle_event(&TuiEvent::CursorHome);
        assert_eq!(input.handle_event(&TuiEvent::Delete), Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "bc");
        input.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(input.handle_event(&TuiEvent::Delete), None);
    }

    #[test]
    fn test_text_before_caret_follows_caret() {
        let mut input = typed("hi @Je");
        assert_eq!(input.text_before_caret(), "hi @Je");
        input.handle_event(&TuiEvent::CursorLeft);
        assert_eq!(input.text_before_caret(), "hi @J");
    }

    #[test]
    fn test_submit_keeps_buffer_until_cleared() {
        let mut input = typed("hello");
        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("hello".to_string())));
        assert_eq!(input.buffer, "hello");
        input.clear();
        assert!(input.buffer.is_empty());
        assert_eq!(input.caret(), 0);
    }

    #[test]
    fn test_submit_whitespace_emits_nothing() {
        let mut input = typed("   ");
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_set_content_moves_caret() {
        let mut input = typed("hello @Je");
        input.set_content("hello @Jeff ".to_string(), 12);
        assert_eq!(input.caret(), 12);
        assert_eq!(input.text_before_caret(), "hello @Jeff ");
    }

    #[test]
    fn test_set_content_bad_caret_goes_to_end() {
        let mut input = InputBox::new("Me");
        input.set_content("é".to_string(), 1);
        assert_eq!(input.caret(), 2);
    }

    #[test]
    fn test_height_grows_then_clamps() {
        let mut input = InputBox::new("Me");
        assert_eq!(input.calculate_height(40), 3);
        input.set_content("1\n2\n3\n4\n5\n6".to_string(), 0);
        assert_eq!(input.calculate_height(40), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_render_shows_author() {
        let backend = TestBackend::new(60, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = typed("draft text");

        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Comment as Me"));
        assert!(text.contains("draft text"));
    }
}
