use crate::app::App;
use crate::session::series::TimeSeries;
use crate::tui::screens::dashboard::DashboardData;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Sparkline, Table},
};

pub struct PerformanceView;

impl PerformanceView {
    /// Process drawn on the chart, resolved against the most recent sample.
    pub fn charted_process(app: &App, series: &TimeSeries) -> Option<String> {
        let names: Vec<String> = series.process_names().into_iter().collect();
        if names.is_empty() {
            return None;
        }
        names.get(app.chart_index % names.len()).cloned()
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App, data: &DashboardData) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(10),
                Constraint::Min(0),
            ])
            .split(area);

        Self::render_status(frame, chunks[0], app, data);
        Self::render_pss_sparkline(frame, chunks[1], app, data.series);
        Self::render_latest_buckets(frame, chunks[2], app, data.series);
    }

    fn render_status(frame: &mut Frame, area: Rect, app: &App, data: &DashboardData) {
        let status_text = if data.poller.running {
            format!(
                "Polling {} every {} ms │ {} samples",
                data.poller.target.as_deref().unwrap_or("?"),
                data.poller.interval.as_millis(),
                data.poller.samples
            )
        } else {
            format!(
                "Idle │ next target: {} │ interval {} ms │ {} samples retained",
                app.selected_package().unwrap_or("none"),
                data.poller.interval.as_millis(),
                data.poller.samples
            )
        };

        let color = if data.poller.running {
            app.theme.success()
        } else {
            app.theme.text_dim()
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().fg(color))
            .block(Block::default().borders(Borders::ALL).title("Polling"));

        frame.render_widget(status, area);
    }

    fn render_pss_sparkline(frame: &mut Frame, area: Rect, app: &App, series: &TimeSeries) {
        let Some(process) = Self::charted_process(app, series) else {
            let empty = Paragraph::new("No samples yet. Select a package and press 's' to start.")
                .style(Style::default().fg(app.theme.text_dim()))
                .block(Block::default().borders(Borders::ALL).title("TOTAL PSS"));
            frame.render_widget(empty, area);
            return;
        };

        let points = series.project(&process);
        let pss_data: Vec<u64> = points
            .iter()
            .map(|p| p.metrics.total_pss.round() as u64)
            .collect();
        let max_pss = points
            .iter()
            .map(|p| p.metrics.total_pss)
            .fold(0.0_f64, f64::max);

        let sparkline = Sparkline::default()
            .block(Block::default().borders(Borders::ALL).title(format!(
                "TOTAL PSS - {} (max: {:.1} MB, {} points)",
                process,
                max_pss,
                points.len()
            )))
            .data(&pss_data)
            .max(pss_data.iter().max().copied().unwrap_or(1))
            .style(Style::default().fg(app.theme.chart_line_primary()));

        frame.render_widget(sparkline, area);
    }

    fn render_latest_buckets(frame: &mut Frame, area: Rect, app: &App, series: &TimeSeries) {
        let latest = Self::charted_process(app, series).and_then(|process| {
            series
                .last()
                .and_then(|sample| sample.processes.get(&process).cloned())
                .map(|metrics| (process, metrics))
        });

        let Some((process, metrics)) = latest else {
            let empty = Paragraph::new("No memory breakdown available")
                .style(Style::default().fg(app.theme.text_dim()))
                .block(Block::default().borders(Borders::ALL).title("Breakdown"));
            frame.render_widget(empty, area);
            return;
        };

        let buckets = [
            ("Java Heap", metrics.java_heap),
            ("Native Heap", metrics.native_heap),
            ("Code", metrics.code),
            ("Stack", metrics.stack),
            ("Graphics", metrics.graphics),
            ("Private Other", metrics.private_other),
            ("System", metrics.system),
            ("TOTAL PSS", metrics.total_pss),
        ];

        let rows: Vec<Row> = buckets
            .iter()
            .map(|(name, value)| {
                let style = if *name == "TOTAL PSS" {
                    Style::default()
                        .fg(app.theme.highlight())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(app.theme.text())
                };
                Row::new(vec![
                    Cell::from(*name),
                    Cell::from(format!("{:.1} MB", value)),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(rows, [Constraint::Length(16), Constraint::Min(10)])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Latest Sample - {}", process)),
            )
            .column_spacing(2);

        frame.render_widget(table, area);
    }
}
