use crate::app::App;
use crate::session::log_buffer::{truncate_message, LogBuffer};
use ratatui::{
    layout::Rect,
    prelude::*,
    widgets::{Block, Borders, List, ListItem},
};

pub struct LogsView;

impl LogsView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, logs: &LogBuffer) {
        let filtered = logs.filtered(&app.log_filter);

        let level_label = app
            .log_filter
            .level
            .map(|l| l.to_string())
            .unwrap_or_else(|| "all".to_string());
        let title = format!(
            "Logs {}/{} │ level: {} │ pkg: \"{}\" │ comp: \"{}\"",
            filtered.len(),
            logs.len(),
            level_label,
            app.log_filter.package,
            app.log_filter.component
        );

        // Tail-anchored: offset 0 shows the newest entries, scrolling up
        // moves back through history.
        let visible = area.height.saturating_sub(2) as usize;
        let offset = app
            .scroll_offset
            .min(filtered.len().saturating_sub(visible));
        let start = filtered.len().saturating_sub(visible + offset);
        let end = filtered.len().saturating_sub(offset);

        let max_message = (area.width as usize).saturating_sub(40).max(20);
        let items: Vec<ListItem> = filtered[start..end]
            .iter()
            .map(|entry| {
                let line = Line::from(vec![
                    Span::styled(
                        format!("{} ", entry.timestamp),
                        Style::default().fg(app.theme.text_dim()),
                    ),
                    Span::styled(
                        format!("{} ", entry.level.letter()),
                        Style::default()
                            .fg(app.theme.log_level(entry.level))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{}: ", entry.component),
                        Style::default().fg(app.theme.secondary()),
                    ),
                    Span::styled(
                        truncate_message(&entry.message, max_message),
                        Style::default().fg(app.theme.text()),
                    ),
                ]);
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

        frame.render_widget(list, area);
    }
}
