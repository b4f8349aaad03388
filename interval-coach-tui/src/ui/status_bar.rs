// interval-coach-tui/src/ui/status_bar.rs
use crate::app::{ActiveModal, App};
use interval_coach_lib::Phase;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

pub fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let state = app.sequencer.state();
    let status_text = match app.active_modal {
        ActiveModal::None => match state.phase {
            Phase::Ready => " [Space] Start | [m] Sound | [?] Help | [q] Quit ",
            Phase::Exercising | Phase::Resting if state.paused => {
                " [Space] Resume | [s] Skip | [r] Reset | [m] Sound | [?] Help | [q] Quit "
            }
            Phase::Exercising | Phase::Resting => {
                " [Space] Pause | [s] Skip | [r] Reset | [m] Sound | [?] Help | [q] Quit "
            }
            Phase::Complete => " [Enter] Start Over | [?] Help | [q] Quit ",
        },
        ActiveModal::Help => " [Esc/Enter/?] Close Help ",
        ActiveModal::ConfirmReset => " [y] Reset | [n/Esc] Cancel ",
    };

    let error_text = app.last_error.as_deref().unwrap_or("");

    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(80), Constraint::Percentage(20)])
        .split(area);

    let status_paragraph =
        Paragraph::new(status_text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status_paragraph, status_chunks[0]);

    let error_paragraph = Paragraph::new(error_text)
        .style(Style::default().bg(Color::DarkGray).fg(Color::Red))
        .alignment(Alignment::Right);
    f.render_widget(error_paragraph, status_chunks[1]);
}
