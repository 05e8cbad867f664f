//! Comment markup → ratatui `Text` renderer.
//!
//! Comment bodies are Markdown: mentions arrive as `**@Name**`, and people
//! may type their own emphasis, code or lists. This walks `pulldown_cmark`
//! events and turns them into styled `Line`/`Span` values. Strong text that
//! is a mention gets the mention color on top of bold.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

pub const MENTION_COLOR: Color = Color::Cyan;

/// Parse comment markup into styled, owned `Text`.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut w = Writer::new(base_fg);
    for event in Parser::new_ext(content, opts) {
        w.handle(event);
    }
    w.text
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    /// Inline style stack; each entry is patched over its parent
    styles: Vec<Style>,
    /// Open lists: None = bullet, Some(n) = next ordinal
    lists: Vec<Option<u64>>,
    /// Depth of open strong tags, so mentions inside them can be spotted
    strong_depth: usize,
    in_code_block: bool,
    /// Blank line before the next block element
    needs_gap: bool,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: vec![],
            lists: vec![],
            strong_depth: 0,
            in_code_block: false,
            needs_gap: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn new_line(&mut self) {
        self.text.lines.push(Line::default());
    }

    fn push_span(&mut self, span: Span<'static>) {
        match self.text.lines.last_mut() {
            Some(line) => line.push_span(span),
            None => self.text.lines.push(Line::from(span)),
        }
    }

    fn start_block(&mut self) {
        if self.needs_gap {
            self.new_line();
            self.needs_gap = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.push_span(Span::styled(
                c.to_string(),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            )),
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.new_line(),
            // Raw HTML in a comment is shown as typed
            Event::Html(h) | Event::InlineHtml(h) => {
                let style = self.style();
                self.push_span(Span::styled(h.to_string(), style));
            }
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.start_block();
                    self.new_line();
                }
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => {
                self.strong_depth += 1;
                self.push_style(Style::default().add_modifier(Modifier::BOLD));
            }
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::CodeBlock(_) => {
                self.start_block();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.start_block();
                self.lists.push(start);
            }
            Tag::Item => {
                self.new_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{indent}{n}. ");
                        *n += 1;
                        m
                    }
                    _ => format!("{indent}• "),
                };
                self.push_span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
            }
            Tag::Link { .. } => self.push_style(
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_gap = self.lists.is_empty(),
            TagEnd::Strong => {
                self.strong_depth = self.strong_depth.saturating_sub(1);
                self.styles.pop();
            }
            TagEnd::Emphasis | TagEnd::Strikethrough | TagEnd::Link => {
                self.styles.pop();
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.needs_gap = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.needs_gap = self.lists.is_empty();
            }
            _ => {}
        }
    }

    fn text(&mut self, cow: CowStr<'_>) {
        // ratatui draws \t as zero-width
        let text = cow.replace('\t', "    ");

        if self.in_code_block {
            let style = Style::default().fg(Color::White);
            for line in text.lines() {
                self.text
                    .lines
                    .push(Line::from(Span::styled(format!("  {line}"), style)));
            }
            return;
        }

        let style = if self.strong_depth > 0 && text.starts_with('@') {
            self.style().fg(MENTION_COLOR)
        } else {
            self.style()
        };
        self.push_span(Span::styled(text, style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(text: &'a Text<'static>, content: &str) -> &'a Span<'static> {
        text.lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .find(|s| s.content == content)
            .unwrap_or_else(|| panic!("no span {:?} in {:?}", content, text))
    }

    #[test]
    fn mention_is_bold_and_colored() {
        let text = render("ping **@Jeff** now", Color::Green);
        let span = find(&text, "@Jeff");
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(span.style.fg, Some(MENTION_COLOR));
    }

    #[test]
    fn plain_bold_keeps_base_color() {
        let text = render("Some **bold** text", Color::Green);
        let span = find(&text, "bold");
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(span.style.fg, Some(Color::Green));
    }

    #[test]
    fn plain_text_uses_base_color() {
        let text = render("hello", Color::Green);
        assert_eq!(text.lines[0].spans[0].style.fg, Some(Color::Green));
    }

    #[test]
    fn paragraphs_are_separated_by_blank_line() {
        let text = render("one\n\ntwo", Color::Green);
        assert_eq!(text.lines.len(), 3);
        assert!(text.lines[1].spans.is_empty());
    }

    #[test]
    fn ordered_list_numbers_items() {
        let text = render("1. first\n2. second", Color::Green);
        let rendered: Vec<String> = text
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(rendered.contains(&"1. first".to_string()), "{rendered:?}");
        assert!(rendered.contains(&"2. second".to_string()), "{rendered:?}");
    }

    #[test]
    fn inline_code_styled() {
        let text = render("run `make`", Color::Green);
        let span = find(&text, "make");
        assert_eq!(span.style.bg, Some(Color::DarkGray));
    }
}
