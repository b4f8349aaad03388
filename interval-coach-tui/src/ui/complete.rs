// interval-coach-tui/src/ui/complete.rs
use crate::{app::App, ui::layout::centered_rect};
use interval_coach_lib::format_clock;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_complete_screen(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from("🎉 Workout Complete!").bold().fg(Color::LightGreen),
        Line::from(""),
        Line::from("Great job! You crushed it!"),
        Line::from(""),
    ];

    if let (Some(started), Some(finished)) = (app.started_at, app.finished_at) {
        let elapsed = finished.signed_duration_since(started).num_seconds().max(0);
        lines.push(Line::from(format!(
            "{} → {}  ({})",
            started.format("%H:%M"),
            finished.format("%H:%M"),
            format_clock(u32::try_from(elapsed).unwrap_or(u32::MAX))
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from("Press Enter to start over").fg(app.accent).italic());

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightGreen)),
    );
    f.render_widget(paragraph, centered_rect(60, 60, area));
}
