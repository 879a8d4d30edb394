pub mod chat;
pub mod markdown;

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Paragraph, StatefulWidget, Widget},
};
use throbber_widgets_tui::Throbber;

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(1),    // Transcript
                Constraint::Length(1), // Status: throbber or error banner
                Constraint::Length(3), // Input box
                Constraint::Length(1), // Help
            ])
            .split(area);

        render_header(main_layout[0], buf);
        chat::render_transcript(self, main_layout[1], buf);
        render_status(self, main_layout[2], buf);
        render_input(self, main_layout[3], buf);
        render_help(main_layout[4], buf);
    }
}

fn render_header(area: Rect, buf: &mut Buffer) {
    let title = Paragraph::new("AI Virtual Tutor")
        .block(
            Block::bordered()
                .title("tutor-tui")
                .title_alignment(Alignment::Center)
                .border_type(BorderType::Rounded),
        )
        .fg(Color::Green)
        .alignment(Alignment::Center);
    title.render(area, buf);
}

/// One line under the transcript: the thinking spinner while a request is
/// outstanding, the last error otherwise.
fn render_status(app: &mut App, area: Rect, buf: &mut Buffer) {
    if app.session.is_awaiting() {
        let throbber = Throbber::default()
            .label("Thinking...")
            .style(Style::default().fg(Color::Green));
        StatefulWidget::render(throbber, area, buf, &mut app.throbber_state);
    } else if let Some(error) = app.session.last_error() {
        let banner = Paragraph::new(format!("Error: {error}"))
            .fg(Color::Red)
            .alignment(Alignment::Center);
        banner.render(area, buf);
    }
}

fn render_input(app: &App, area: Rect, buf: &mut Buffer) {
    let input_text = format!("> {}", app.session.draft());
    let input_widget = Paragraph::new(input_text)
        .block(
            Block::bordered()
                .title("Ask anything...")
                .border_type(BorderType::Rounded),
        )
        .fg(if app.session.is_awaiting() {
            // Submissions are gated while a request is outstanding.
            Color::DarkGray
        } else {
            Color::Yellow
        });
    input_widget.render(area, buf);
}

fn render_help(area: Rect, buf: &mut Buffer) {
    let help = Paragraph::new("Enter: send • ↑↓: scroll • Esc: quit")
        .fg(Color::DarkGray)
        .alignment(Alignment::Center);
    help.render(area, buf);
}
