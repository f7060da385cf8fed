use crate::app::{App, AppMode, Tab};
use crate::session::log_buffer::LogBuffer;
use crate::session::notices::Notice;
use crate::session::poller::PollerStatus;
use crate::session::recorder::RecorderStatus;
use crate::session::series::TimeSeries;
use crate::tui::views::{
    logs::LogsView, overview::OverviewView, performance::PerformanceView,
    processes::ProcessesView, record::RecordView,
};
use crate::tui::widgets::{
    confirmation_dialog::ConfirmationDialog, error_screen::ErrorScreen, filter_bar::FilterBar,
    format_selector_dialog::FormatSelectorDialog, help_overlay::HelpOverlay,
    loading_screen::LoadingScreen,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs},
};

/// Per-frame snapshots of the session managers, taken once before drawing
/// so every view renders the same instant.
pub struct DashboardData<'a> {
    pub poller: &'a PollerStatus,
    pub series: &'a TimeSeries,
    pub recorder: &'a RecorderStatus,
    pub logs: &'a LogBuffer,
    pub notices: &'a [Notice],
}

pub struct DashboardScreen;

impl DashboardScreen {
    pub fn render(frame: &mut Frame, app: &App, data: &DashboardData) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        Self::render_header(frame, chunks[0], app);
        Self::render_tabs(frame, chunks[1], app);
        Self::render_content(frame, chunks[2], app, data);
        Self::render_footer(frame, chunks[3], app);

        match &app.mode {
            AppMode::Help => HelpOverlay::render(frame, frame.area(), &app.theme),
            AppMode::ConfirmSaveRecording => {
                let bytes = data.recorder.artifact_bytes.unwrap_or(0);
                ConfirmationDialog::render(
                    frame,
                    frame.area(),
                    "Save Recording",
                    &format!("Save the pulled recording ({} KB) to disk?", bytes / 1024),
                    &app.theme,
                );
            }
            AppMode::ChooseExportFormat => {
                FormatSelectorDialog::render(frame, frame.area(), app.export_format, &app.theme)
            }
            AppMode::Error(message) => {
                ErrorScreen::render(frame, frame.area(), message, &app.theme)
            }
            AppMode::Loading(message) => {
                LoadingScreen::render(frame, frame.area(), message, &app.theme)
            }
            AppMode::FilterInput(field) => {
                FilterBar::render(frame, frame.area(), *field, &app.filter_input, &app.theme)
            }
            AppMode::Normal => {}
        }
    }

    fn render_header(frame: &mut Frame, area: Rect, app: &App) {
        let header_text = if let Some(info) = &app.device_info {
            format!(
                "{} │ {} {} │ Android {} (SDK {}) │ {}",
                info.serial, info.brand, info.model, info.android_version, info.sdk_version,
                info.abi
            )
        } else {
            "Loading device info...".to_string()
        };

        let header = Paragraph::new(header_text)
            .style(
                Style::default()
                    .fg(app.theme.primary())
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL).title("Device"));

        frame.render_widget(header, area);
    }

    fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
        let titles: Vec<Line> = Tab::all()
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let num = i + 1;
                let title = format!("{}:{}", num, tab.title());
                if *tab == app.current_tab {
                    Line::from(format!("[{}]", title)).style(
                        Style::default()
                            .fg(app.theme.highlight())
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Line::from(title).style(Style::default().fg(app.theme.text_dim()))
                }
            })
            .collect();

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("Views"))
            .divider(" ");

        frame.render_widget(tabs, area);
    }

    fn render_content(frame: &mut Frame, area: Rect, app: &App, data: &DashboardData) {
        match app.current_tab {
            Tab::Overview => OverviewView::render(frame, area, app, data),
            Tab::Processes => ProcessesView::render(frame, area, app),
            Tab::Performance => PerformanceView::render(frame, area, app, data),
            Tab::Logs => LogsView::render(frame, area, app, data.logs),
            Tab::Record => RecordView::render(frame, area, data.recorder, &app.theme),
        }
    }

    fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
        let footer_text = match app.current_tab {
            Tab::Overview => "1-5: Switch Tab | h/l: Prev/Next | q: Quit | ?: Help",
            Tab::Processes => "1-5: Switch Tab | j/k: Scroll | r: Refresh | q: Quit",
            Tab::Performance => {
                "j/k: Select Package | s: Start | x: Stop | [/]: Chart Process | +/-: Interval | e: Export"
            }
            Tab::Logs => "f: Level Filter | /: Package Filter | c: Component Filter | j/k: Scroll",
            Tab::Record => "s: Start Recording | x: Stop | e: Save to Disk | q: Quit",
        };

        let footer = Paragraph::new(footer_text)
            .style(Style::default().fg(app.theme.text_dim()))
            .block(Block::default().borders(Borders::ALL).title("Controls"));

        frame.render_widget(footer, area);
    }
}
