//! The rendering boundary for message content: markdown in, styled ratatui
//! lines out. Parsing is `pulldown-cmark`'s job; this module only maps its
//! event stream onto terminal styles.

use pulldown_cmark::{CodeBlockKind, Event as MdEvent, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Renders one message's markdown content into terminal lines.
pub fn to_lines(content: &str) -> Vec<Line<'static>> {
    let parser = Parser::new_ext(content, Options::ENABLE_STRIKETHROUGH);
    let mut renderer = LineRenderer::default();
    for event in parser {
        renderer.handle(event);
    }
    renderer.finish()
}

#[derive(Default)]
struct LineRenderer {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    /// Numbering state per open list; `None` for bullet lists.
    list_stack: Vec<Option<u64>>,
    quote_depth: usize,
    heading: bool,
    bold: bool,
    italic: bool,
    strikethrough: bool,
    in_code_block: bool,
    link_dest: Option<String>,
}

impl LineRenderer {
    fn handle(&mut self, event: MdEvent) {
        match event {
            MdEvent::Start(tag) => self.start(tag),
            MdEvent::End(tag) => self.end(tag),
            MdEvent::Text(text) => self.text(&text),
            MdEvent::Code(code) => self.current.push(Span::styled(
                code.to_string(),
                Style::default().fg(Color::Yellow),
            )),
            MdEvent::SoftBreak | MdEvent::HardBreak => self.flush(),
            MdEvent::Rule => {
                self.flush();
                self.lines.push(Line::styled(
                    "────────",
                    Style::default().fg(Color::DarkGray),
                ));
                self.blank();
            }
            // Raw HTML and footnotes pass through as plain text.
            MdEvent::Html(html) | MdEvent::InlineHtml(html) => self.text(&html),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { .. } => {
                self.flush();
                self.heading = true;
            }
            Tag::BlockQuote => self.quote_depth += 1,
            Tag::CodeBlock(kind) => {
                self.flush();
                if let CodeBlockKind::Fenced(lang) = &kind {
                    if !lang.is_empty() {
                        self.lines.push(Line::styled(
                            format!("[{lang}]"),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                }
                self.in_code_block = true;
            }
            Tag::List(start) => self.list_stack.push(start),
            Tag::Item => {
                self.flush();
                let indent = "  ".repeat(self.list_stack.len().saturating_sub(1));
                let marker = match self.list_stack.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}• "),
                };
                self.current
                    .push(Span::styled(marker, Style::default().fg(Color::DarkGray)));
            }
            Tag::Emphasis => self.italic = true,
            Tag::Strong => self.bold = true,
            Tag::Strikethrough => self.strikethrough = true,
            Tag::Link { dest_url, .. } => self.link_dest = Some(dest_url.to_string()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush();
                self.blank();
            }
            TagEnd::Heading(_) => {
                self.flush();
                self.heading = false;
                self.blank();
            }
            TagEnd::BlockQuote => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.flush();
                self.blank();
            }
            TagEnd::List(_) => {
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis => self.italic = false,
            TagEnd::Strong => self.bold = false,
            TagEnd::Strikethrough => self.strikethrough = false,
            TagEnd::Link => {
                if let Some(dest) = self.link_dest.take() {
                    self.current.push(Span::styled(
                        format!(" ({dest})"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_code_block {
            // Code block text arrives with embedded newlines.
            for (i, segment) in text.split('\n').enumerate() {
                if i > 0 {
                    self.flush();
                }
                if !segment.is_empty() {
                    self.current.push(Span::styled(
                        segment.to_string(),
                        Style::default().fg(Color::Yellow),
                    ));
                }
            }
            return;
        }
        self.current
            .push(Span::styled(text.to_string(), self.span_style()));
    }

    fn span_style(&self) -> Style {
        let mut style = Style::default();
        if self.heading {
            style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.strikethrough {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        if self.link_dest.is_some() {
            style = style.fg(Color::Blue).add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    /// Ends the line under construction, prefixing any open block quote.
    /// Empty lines are only meaningful inside code blocks.
    fn flush(&mut self) {
        if self.current.is_empty() && !self.in_code_block {
            return;
        }
        let mut spans = std::mem::take(&mut self.current);
        if self.quote_depth > 0 {
            spans.insert(
                0,
                Span::styled(
                    "│ ".repeat(self.quote_depth),
                    Style::default().fg(Color::DarkGray),
                ),
            );
        }
        self.lines.push(Line::from(spans));
    }

    /// Separator between blocks; collapses runs of blanks.
    fn blank(&mut self) {
        let last_is_blank = self
            .lines
            .last()
            .map(|line| line.to_string().is_empty())
            .unwrap_or(true);
        if !last_is_blank {
            self.lines.push(Line::from(""));
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        if !self.current.is_empty() {
            self.flush();
        }
        while self
            .lines
            .last()
            .map(|line| line.to_string().trim().is_empty())
            .unwrap_or(false)
        {
            self.lines.pop();
        }
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(content: &str) -> Vec<String> {
        to_lines(content).iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn plain_paragraphs_become_separated_lines() {
        assert_eq!(rendered("hello\n\nworld"), vec!["hello", "", "world"]);
    }

    #[test]
    fn heading_is_bold_and_cyan() {
        let lines = to_lines("# Algebra");
        assert_eq!(lines[0].to_string(), "Algebra");
        let span = &lines[0].spans[0];
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(span.style.fg, Some(Color::Cyan));
    }

    #[test]
    fn bullet_lists_get_markers() {
        let lines = rendered("- one\n- two");
        assert_eq!(lines[0], "• one");
        assert_eq!(lines[1], "• two");
    }

    #[test]
    fn ordered_lists_count_up() {
        let lines = rendered("1. first\n2. second");
        assert_eq!(lines[0], "1. first");
        assert_eq!(lines[1], "2. second");
    }

    #[test]
    fn inline_code_is_highlighted() {
        let lines = to_lines("use `let` here");
        let code_span = lines[0]
            .spans
            .iter()
            .find(|s| s.content == "let")
            .expect("code span");
        assert_eq!(code_span.style.fg, Some(Color::Yellow));
    }

    #[test]
    fn fenced_code_blocks_keep_their_lines() {
        let lines = rendered("```rust\nlet x = 42;\nlet y = x;\n```");
        assert_eq!(lines[0], "[rust]");
        assert_eq!(lines[1], "let x = 42;");
        assert_eq!(lines[2], "let y = x;");
    }

    #[test]
    fn no_trailing_blank_lines() {
        let lines = rendered("just one line");
        assert_eq!(lines, vec!["just one line"]);
    }

    #[test]
    fn empty_content_renders_nothing() {
        assert!(to_lines("").is_empty());
    }
}
