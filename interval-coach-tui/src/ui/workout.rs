// interval-coach-tui/src/ui/workout.rs
use crate::app::App;
use interval_coach_lib::{format_clock, Phase, Snapshot};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

const UP_NEXT_COUNT: usize = 2;

fn phase_color(snapshot: &Snapshot<'_>, accent: Color) -> Color {
    if snapshot.paused {
        Color::DarkGray
    } else if snapshot.phase == Phase::Resting {
        Color::LightBlue
    } else {
        accent
    }
}

pub fn render_workout_screen(f: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.sequencer.snapshot();
    let up_next = app.sequencer.up_next(UP_NEXT_COUNT);

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(9)];
    if !up_next.is_empty() {
        constraints.push(Constraint::Length(up_next.len() as u16 + 2));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_overall_progress(f, app, &snapshot, chunks[0]);
    render_phase_panel(f, app, &snapshot, chunks[1]);

    if !up_next.is_empty() {
        let items: Vec<ListItem> = up_next
            .iter()
            .map(|exercise| ListItem::new(format!("  {}", exercise.summary())))
            .collect();
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Up Next"));
        f.render_widget(list, chunks[2]);
    }
}

fn render_overall_progress(f: &mut Frame, app: &App, snapshot: &Snapshot<'_>, area: Rect) {
    let section_name = snapshot.current_section.map_or("", |s| s.name.as_str());
    let label = format!(
        "{section_name}  ·  section {} of {}  ·  {:.0}%",
        snapshot.section_index + 1,
        snapshot.total_sections,
        snapshot.progress_percent
    );
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(app.accent).bg(Color::Black))
        .ratio((snapshot.progress_percent / 100.0).clamp(0.0, 1.0))
        .label(label);
    f.render_widget(gauge, area);
}

fn render_phase_panel(f: &mut Frame, app: &App, snapshot: &Snapshot<'_>, area: Rect) {
    let color = phase_color(snapshot, app.accent);
    let title = match snapshot.phase {
        Phase::Resting => " REST ",
        _ => " EXERCISE ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::new().bold())
        .border_style(Style::default().fg(color));
    f.render_widget(block, area);

    let inner = area.inner(&Margin {
        vertical: 1,
        horizontal: 2,
    });
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(exercise) = snapshot.current_exercise {
        let icon = exercise.icon.as_deref().unwrap_or("");
        if snapshot.phase == Phase::Resting {
            lines.push(Line::from("Take a breather").italic());
            lines.push(Line::from(vec![
                Span::raw("Get ready for: "),
                Span::styled(format!("{icon} {}", exercise.name), Style::default().bold()),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                format!("{icon} {}", exercise.name),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format_clock(snapshot.time_left),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        if snapshot.phase == Phase::Exercising {
            if exercise.sets > 1 {
                lines.push(Line::from(format!(
                    "Set {} of {}",
                    snapshot.current_set, exercise.sets
                )));
            }
            if let Some(reps) = &exercise.reps {
                lines.push(Line::from(reps.clone()).gray());
            }
        }
    }
    if snapshot.paused {
        lines.push(Line::from(""));
        lines.push(Line::from("PAUSED  ·  Space to resume").yellow().bold());
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(paragraph, chunks[0]);

    let countdown = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(snapshot.phase_fraction().clamp(0.0, 1.0))
        .label(format!("{} left", format_clock(snapshot.time_left)));
    f.render_widget(countdown, chunks[1]);
}
