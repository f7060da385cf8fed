use crate::app::App;
use crate::session::recorder::{format_elapsed, RecordingState};
use crate::tui::screens::dashboard::DashboardData;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

pub struct OverviewView;

impl OverviewView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, data: &DashboardData) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(9),
                Constraint::Length(7),
                Constraint::Min(0),
            ])
            .split(area);

        Self::render_device_section(frame, chunks[0], app);
        Self::render_session_section(frame, chunks[1], app, data);
        Self::render_notices_section(frame, chunks[2], app, data);
    }

    fn render_device_section(frame: &mut Frame, area: Rect, app: &App) {
        let device_text = if let Some(info) = &app.device_info {
            format!(
                "Serial:   {}\n\
                 Model:    {} {}\n\
                 Android:  {} (SDK {})\n\
                 ABI:      {}\n\
                 Kernel:   {}\n\
                 Packages: {}",
                info.serial,
                info.brand,
                info.model,
                info.android_version,
                info.sdk_version,
                info.abi,
                info.kernel_version,
                app.packages.len()
            )
        } else {
            "No device info available".to_string()
        };

        let device = Paragraph::new(device_text)
            .block(Block::default().borders(Borders::ALL).title("Device"))
            .style(Style::default().fg(app.theme.text()));

        frame.render_widget(device, area);
    }

    fn render_session_section(frame: &mut Frame, area: Rect, app: &App, data: &DashboardData) {
        let polling_line = if data.poller.running {
            format!(
                "Memory polling: {} every {} ms ({} samples)",
                data.poller.target.as_deref().unwrap_or("?"),
                data.poller.interval.as_millis(),
                data.poller.samples
            )
        } else {
            format!(
                "Memory polling: idle ({} samples retained, interval {} ms)",
                data.poller.samples,
                data.poller.interval.as_millis()
            )
        };

        let recording_line = match data.recorder.state {
            RecordingState::Recording => format!(
                "Screen recording: running ({})",
                format_elapsed(data.recorder.elapsed_secs)
            ),
            RecordingState::Idle => match data.recorder.artifact_bytes {
                Some(bytes) => format!("Screen recording: idle ({} KB held)", bytes / 1024),
                None => "Screen recording: idle".to_string(),
            },
        };

        let session_text = format!(
            "{}\n{}\nLog buffer: {} entries",
            polling_line,
            recording_line,
            data.logs.len()
        );

        let sessions = Paragraph::new(session_text)
            .block(Block::default().borders(Borders::ALL).title("Sessions"))
            .style(Style::default().fg(app.theme.text()));

        frame.render_widget(sessions, area);
    }

    fn render_notices_section(frame: &mut Frame, area: Rect, app: &App, data: &DashboardData) {
        if data.notices.is_empty() {
            let empty = Paragraph::new("No notices yet")
                .block(Block::default().borders(Borders::ALL).title("Notices"))
                .style(Style::default().fg(app.theme.text_dim()));
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = data
            .notices
            .iter()
            .map(|notice| {
                let line = Line::from(vec![
                    Span::styled(
                        notice.at.format("%H:%M:%S ").to_string(),
                        Style::default().fg(app.theme.text_dim()),
                    ),
                    Span::styled(notice.text.clone(), Style::default().fg(app.theme.text())),
                ]);
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Notices ({})", data.notices.len())),
        );

        frame.render_widget(list, area);
    }
}
