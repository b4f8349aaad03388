// interval-coach-tui/src/ui/layout.rs
use crate::{
    app::{ActiveModal, App},
    ui::{
        complete::render_complete_screen, modals::render_modal, ready::render_ready_screen,
        status_bar::render_status_bar, workout::render_workout_screen,
    },
};
use interval_coach_lib::Phase;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

// Main UI rendering function. Pure function of the app state.
pub fn render_ui(f: &mut Frame, app: &App) {
    let size = f.size();

    // Header on top, content below, status bar at bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status Bar
        ])
        .split(size);

    render_header(f, app, main_chunks[0]);
    match app.sequencer.state().phase {
        Phase::Ready => render_ready_screen(f, app, main_chunks[1]),
        Phase::Exercising | Phase::Resting => render_workout_screen(f, app, main_chunks[1]),
        Phase::Complete => render_complete_screen(f, app, main_chunks[1]),
    }
    render_status_bar(f, app, main_chunks[2]);

    // Render modal last if active
    if app.active_modal != ActiveModal::None {
        render_modal(f, app);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let state = app.sequencer.state();
    let sound = if state.sound_enabled {
        Span::styled("♪ sound on", Style::default().fg(Color::Green))
    } else {
        Span::styled("✕ muted", Style::default().fg(Color::DarkGray))
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "Interval Coach",
            Style::default().fg(app.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  ·  {}", state.phase)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    let sound_paragraph = Paragraph::new(Line::from(sound))
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(sound_paragraph, chunks[1]);
}

/// Helper function to create a centered rectangle for modals
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let percent_x = percent_x.min(100);
    let percent_y = percent_y.min(100);
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
