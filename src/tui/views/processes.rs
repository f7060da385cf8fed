use crate::app::App;
use ratatui::{
    layout::{Constraint, Rect},
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

pub struct ProcessesView;

impl ProcessesView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if app.processes.is_empty() {
            let empty = Paragraph::new("No process snapshot available.\n\nPress 'r' to refresh.")
                .style(Style::default().fg(app.theme.text_dim()))
                .block(Block::default().borders(Borders::ALL).title("Processes"));
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(vec!["PID", "CPU%", "RES", "USER", "NAME"])
            .style(
                Style::default()
                    .fg(app.theme.highlight())
                    .add_modifier(Modifier::BOLD),
            )
            .bottom_margin(1);

        let offset = app.scroll_offset.min(app.processes.len().saturating_sub(1));
        let rows: Vec<Row> = app
            .processes
            .iter()
            .skip(offset)
            .map(|process| {
                Row::new(vec![
                    Cell::from(process.pid.to_string()),
                    Cell::from(format!("{:.1}", process.cpu_percent)),
                    Cell::from(process.resident.clone()),
                    Cell::from(process.user.clone()),
                    Cell::from(process.name.clone()),
                ])
                .style(Style::default().fg(app.theme.text()))
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Length(7),
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Min(20),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Processes ({})", app.processes.len())),
        )
        .column_spacing(2);

        frame.render_widget(table, area);
    }
}
