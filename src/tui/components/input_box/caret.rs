//! Caret tracking and wrapped-layout math for the InputBox.
//!
//! `Caret` owns the byte offset into the draft and the internal scroll
//! offset. The draft itself is owned by `InputBox` and passed in, so every
//! method states which text it measures.

use unicode_width::UnicodeWidthStr;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Visible content lines before the box starts scrolling internally
pub(super) const MAX_VISIBLE_LINES: u16 = 4;

/// Wrapping used for both measuring and drawing the draft.
pub(super) fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width.max(1) as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Text columns available inside the box.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Rows one logical line (no `\n`) occupies once wrapped.
fn rows_for(line: &str, width: u16) -> u16 {
    if line.is_empty() {
        1
    } else {
        (textwrap::wrap(line, wrap_options(width)).len() as u16).max(1)
    }
}

/// Rows the whole draft occupies once wrapped.
pub(super) fn row_count(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    text.split('\n').map(|line| rows_for(line, width)).sum()
}

#[derive(Debug, Default)]
pub(super) struct Caret {
    /// Byte offset into the draft, always on a char boundary
    pub pos: usize,
    /// First wrapped row shown in the box
    pub scroll: u16,
}

impl Caret {
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll = 0;
    }

    pub fn left(&mut self, text: &str) -> bool {
        match text[..self.pos].chars().next_back() {
            Some(c) => {
                self.pos -= c.len_utf8();
                true
            }
            None => false,
        }
    }

    pub fn right(&mut self, text: &str) -> bool {
        match text[self.pos..].chars().next() {
            Some(c) => {
                self.pos += c.len_utf8();
                true
            }
            None => false,
        }
    }

    /// Start of the current logical line.
    pub fn home(&mut self, text: &str) -> bool {
        let start = text[..self.pos].rfind('\n').map_or(0, |i| i + 1);
        let moved = start != self.pos;
        self.pos = start;
        moved
    }

    /// End of the current logical line.
    pub fn end(&mut self, text: &str) -> bool {
        let end = text[self.pos..]
            .find('\n')
            .map_or(text.len(), |i| self.pos + i);
        let moved = end != self.pos;
        self.pos = end;
        moved
    }

    /// Move to the previous (`up`) or next logical line, keeping the char
    /// column where the target line is long enough.
    pub fn vertical(&mut self, text: &str, up: bool) -> bool {
        let line_start = text[..self.pos].rfind('\n').map_or(0, |i| i + 1);
        let column = text[line_start..self.pos].chars().count();

        let target_start = if up {
            if line_start == 0 {
                return false;
            }
            text[..line_start - 1].rfind('\n').map_or(0, |i| i + 1)
        } else {
            match text[self.pos..].find('\n') {
                Some(i) => self.pos + i + 1,
                None => return false,
            }
        };

        let target_line = text[target_start..].split('\n').next().unwrap_or("");
        let offset: usize = target_line
            .chars()
            .take(column)
            .map(char::len_utf8)
            .sum();
        self.pos = target_start + offset;
        true
    }

    /// Wrapped (row, column) of the caret for a box of `width` text columns.
    pub fn row_col(&self, text: &str, width: u16) -> (u16, u16) {
        if width == 0 {
            return (0, 0);
        }
        let before = &text[..self.pos];
        let mut lines = before.split('\n');
        let current = lines.next_back().unwrap_or("");
        let rows_above: u16 = lines.map(|line| rows_for(line, width)).sum();

        if current.is_empty() {
            return (rows_above, 0);
        }

        // textwrap drops trailing spaces from the last piece; add them back
        let pieces = textwrap::wrap(current, wrap_options(width));
        let last: &str = pieces.last().map_or("", |p| &**p);
        let trailing = current.len() - current.trim_end_matches(' ').len();
        let column = (last.width() + trailing) as u16;

        (rows_above + pieces.len().saturating_sub(1) as u16, column.min(width))
    }

    /// Adjust `scroll` so the caret row is inside the visible window.
    pub fn keep_visible(&mut self, text: &str, width: u16) {
        if row_count(text, width) <= MAX_VISIBLE_LINES {
            self.scroll = 0;
            return;
        }
        let (row, _) = self.row_col(text, width);
        if row < self.scroll {
            self.scroll = row;
        } else if row >= self.scroll + MAX_VISIBLE_LINES {
            self.scroll = row + 1 - MAX_VISIBLE_LINES;
        }
    }
}
