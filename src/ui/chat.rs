use crate::app::App;
use crate::session::{ChatSession, Role};
use crate::ui::markdown;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

pub fn render_transcript(app: &App, area: Rect, buf: &mut Buffer) {
    let lines = transcript_lines(&app.session);
    let total_lines = lines.len();

    let visible_height = area.height.saturating_sub(2) as usize; // borders
    let max_scroll = total_lines.saturating_sub(visible_height);
    let from_bottom = app.scroll_offset.min(max_scroll);
    let scroll_top = (max_scroll - from_bottom) as u16;

    let chat_widget = Paragraph::new(Text::from(lines))
        .block(
            Block::bordered()
                .title("Transcript (↑↓ to scroll)")
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: true })
        .scroll((scroll_top, 0));

    chat_widget.render(area, buf);
}

/// Builds the full transcript as styled lines: a bold role prefix on each
/// message's first line, markdown-rendered content, a blank separator after
/// every message.
pub fn transcript_lines(session: &ChatSession) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for msg in session.transcript() {
        let (prefix, style) = match msg.role {
            Role::User => ("You: ", Style::default().fg(Color::Cyan)),
            Role::Model => ("Tutor: ", Style::default().fg(Color::Green)),
        };
        let prefix_span = Span::styled(prefix, style.add_modifier(Modifier::BOLD));

        let content_lines = markdown::to_lines(&msg.content);
        if content_lines.is_empty() {
            lines.push(Line::from(prefix_span));
        } else {
            for (i, content_line) in content_lines.into_iter().enumerate() {
                if i == 0 {
                    let mut spans = vec![prefix_span.clone()];
                    spans.extend(content_line.spans);
                    lines.push(Line::from(spans));
                } else {
                    let mut spans = vec![Span::raw("  ")];
                    spans.extend(content_line.spans);
                    lines.push(Line::from(spans));
                }
            }
        }
        lines.push(Line::from(""));
    }

    lines
}

/// Line count the scroll position is clamped against.
pub fn transcript_line_count(session: &ChatSession) -> usize {
    transcript_lines(session).len()
}
