use crate::app::FilterField;
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// One-line input box anchored above the footer while a log filter is
/// being edited.
pub struct FilterBar;

impl FilterBar {
    pub fn render(frame: &mut Frame, area: Rect, field: FilterField, input: &str, theme: &Theme) {
        let bar_area = Rect {
            x: area.x,
            y: area.height.saturating_sub(6),
            width: area.width,
            height: 3,
        };

        frame.render_widget(Clear, bar_area);

        let label = match field {
            FilterField::Package => "Package filter",
            FilterField::Component => "Component filter",
        };

        let bar = Paragraph::new(Line::from(vec![
            Span::styled(input.to_string(), Style::default().fg(theme.text())),
            Span::styled("█", Style::default().fg(theme.primary())),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} (Enter: apply, Esc: cancel) ", label))
                .border_style(Style::default().fg(theme.border_focused())),
        );

        frame.render_widget(bar, bar_area);
    }
}
