use crate::session::recorder::{format_elapsed, RecorderStatus, RecordingState};
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
};

pub struct RecordView;

impl RecordView {
    pub fn render(frame: &mut Frame, area: Rect, recorder: &RecorderStatus, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        Self::render_state(frame, chunks[0], recorder, theme);
        Self::render_progress(frame, chunks[1], recorder, theme);
        Self::render_artifact(frame, chunks[2], recorder, theme);
    }

    fn render_state(frame: &mut Frame, area: Rect, recorder: &RecorderStatus, theme: &Theme) {
        let (state_text, color) = match recorder.state {
            RecordingState::Recording => (
                format!("● RECORDING {}", format_elapsed(recorder.elapsed_secs)),
                theme.recording(),
            ),
            RecordingState::Idle if recorder.busy => {
                ("Finishing...".to_string(), theme.warning())
            }
            RecordingState::Idle => ("Idle".to_string(), theme.text_dim()),
        };

        let state = Paragraph::new(state_text)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).title("Status"));

        frame.render_widget(state, area);
    }

    fn render_progress(frame: &mut Frame, area: Rect, recorder: &RecorderStatus, theme: &Theme) {
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(
                Style::default()
                    .fg(theme.recording())
                    .bg(theme.gauge_background()),
            )
            .label(format!("{:.1}%", recorder.progress))
            .ratio((recorder.progress / 100.0).clamp(0.0, 1.0));

        frame.render_widget(gauge, area);
    }

    fn render_artifact(frame: &mut Frame, area: Rect, recorder: &RecorderStatus, theme: &Theme) {
        let artifact_text = match recorder.artifact_bytes {
            Some(bytes) => format!(
                "Last recording held in memory: {} KB\n\nPress 'e' to save it to disk.\n\
                 Starting a new recording discards it.",
                bytes / 1024
            ),
            None => "No recording held.\n\nPress 's' to start a screen recording,\n\
                     'x' to stop and pull it from the device."
                .to_string(),
        };

        let artifact = Paragraph::new(artifact_text)
            .style(Style::default().fg(theme.text()))
            .block(Block::default().borders(Borders::ALL).title("Recording"));

        frame.render_widget(artifact, area);
    }
}
