// interval-coach-tui/src/ui/modals.rs
use crate::{
    app::{ActiveModal, App},
    ui::layout::centered_rect,
};
use ratatui::{
    layout::Margin,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_modal(f: &mut Frame, app: &App) {
    match app.active_modal {
        ActiveModal::Help => render_help_modal(f),
        ActiveModal::ConfirmReset => render_confirm_reset_modal(f),
        ActiveModal::None => {} // Should not happen if called correctly
    }
}

fn render_help_modal(f: &mut Frame) {
    let block = Block::default()
        .title("Help (?)")
        .borders(Borders::ALL)
        .title_style(Style::new().bold())
        .border_style(Style::new().yellow());
    let area = centered_rect(60, 60, f.size());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let help_text = vec![
        Line::from("--- Workout ---").style(Style::new().bold().underlined()),
        Line::from(" Space / Enter: Start, Pause or Resume"),
        Line::from(" p: Pause / Resume"),
        Line::from(" s / n: Skip the rest of the current phase"),
        Line::from(" r: Reset the workout (asks first mid-workout)"),
        Line::from(" m: Sound cues on / off"),
        Line::from(""),
        Line::from("--- General ---").style(Style::new().bold().underlined()),
        Line::from(" ?: Show/Hide This Help"),
        Line::from(" q: Quit Application"),
        Line::from(""),
        Line::from(Span::styled(
            " Press Esc, ?, or Enter to close ",
            Style::new().italic().yellow(),
        )),
    ];

    let paragraph = Paragraph::new(help_text).wrap(Wrap { trim: false });
    f.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn render_confirm_reset_modal(f: &mut Frame) {
    let block = Block::default()
        .title("Reset Workout")
        .borders(Borders::ALL)
        .title_style(Style::new().bold())
        .border_style(Style::new().red());
    let area = centered_rect(40, 20, f.size());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from("Abandon this workout and go back to the start?"),
        Line::from(""),
        Line::from(" [y/Enter] Reset   [n/Esc] Keep going ").italic(),
    ];
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}
