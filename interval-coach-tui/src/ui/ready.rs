// interval-coach-tui/src/ui/ready.rs
use crate::app::App;
use interval_coach_lib::format_clock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn render_ready_screen(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let plan = &app.service.plan;
    let mut items: Vec<ListItem> = Vec::new();
    for (idx, section) in plan.sections().iter().enumerate() {
        if idx > 0 {
            items.push(ListItem::new(""));
        }
        items.push(ListItem::new(Line::from(vec![
            Span::styled(
                section.name.clone(),
                Style::default().fg(app.accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" ({})", section.duration_label)).italic(),
        ])));
        for exercise in &section.exercises {
            items.push(ListItem::new(format!("  {}", exercise.summary())));
        }
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Today's Workout"),
    );
    f.render_widget(list, chunks[0]);

    let total = u32::try_from(plan.total_seconds()).unwrap_or(u32::MAX);
    let start_hint = Paragraph::new(Line::from(vec![
        Span::raw(format!("About {} with rests  ·  ", format_clock(total))),
        Span::styled("Press Space to start", Style::default().fg(app.accent).bold()),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(start_hint, chunks[1]);
}
