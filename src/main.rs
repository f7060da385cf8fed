use clap::Parser;
use color_eyre::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyModifiers};
use droid_tui::{
    adb::{bridge::DeviceBridge, device::AdbBridge, discovery::discover_devices},
    app::{App, AppMode, ExportFormat, FilterField, Tab},
    cli::Cli,
    config::{Config, MIN_POLL_INTERVAL_MS},
    export,
    theme::Theme,
    session::{
        log_buffer::SharedLogBuffer, notices::NoticeBoard, poller::PollingSession,
        recorder::RecordingSession,
    },
    tui::screens::{
        dashboard::{DashboardData, DashboardScreen},
        device_picker::DevicePickerScreen,
    },
    tui::terminal,
    tui::views::performance::PerformanceView,
    tui::widgets::loading_screen::LoadingScreen,
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config_path = cli.config.clone();
    let mut config = Config::load(config_path.as_deref());
    if let Some(interval) = cli.interval {
        config.poll_interval_ms = (interval.as_millis() as u64).max(MIN_POLL_INTERVAL_MS);
    }

    let devices = discover_devices().await?;

    let preselected = match &cli.serial {
        Some(serial) => {
            if !devices
                .iter()
                .any(|d| &d.serial == serial && d.is_online())
            {
                println!("Device {} is not attached or not online.", serial);
                return Ok(());
            }
            Some(serial.clone())
        }
        None => {
            if devices.is_empty() {
                println!("No devices found.");
                println!("Connect a device or start an emulator, then try again.");
                return Ok(());
            }
            None
        }
    };

    let mut terminal = terminal::setup_terminal()?;
    let theme = Theme::new();

    let serial = match preselected {
        Some(serial) => serial,
        None => {
            let mut picker = DevicePickerScreen::new(devices);
            loop {
                terminal.draw(|frame| {
                    picker.render(frame, &theme);
                })?;

                if event::poll(Duration::from_millis(100))? {
                    if let CrosstermEvent::Key(key) = event::read()? {
                        match (key.code, key.modifiers) {
                            (KeyCode::Char('q'), _)
                            | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                                terminal::restore_terminal(&mut terminal)?;
                                return Ok(());
                            }
                            (KeyCode::Char('j'), _) | (KeyCode::Down, _) => {
                                picker.next();
                            }
                            (KeyCode::Char('k'), _) | (KeyCode::Up, _) => {
                                picker.previous();
                            }
                            (KeyCode::Enter, _) => {
                                if let Some(device) = picker.selected_device() {
                                    if device.is_online() {
                                        break device.serial.clone();
                                    }
                                }
                            }
                            (KeyCode::Char('r'), _) => {
                                let devices = discover_devices().await?;
                                picker = DevicePickerScreen::new(devices);
                            }
                            _ => {}
                        }
                    }
                }
            }
        }
    };

    let bridge: Arc<dyn DeviceBridge> = Arc::new(AdbBridge::new(serial));

    terminal.draw(|frame| {
        LoadingScreen::render(frame, frame.area(), "Inspecting device...", &theme);
    })?;
    let device_info = bridge.device_info().await?;

    let notices = NoticeBoard::new();
    let poller = PollingSession::new(bridge.clone(), notices.clone(), config.poll_interval());
    let recorder = RecordingSession::new(bridge.clone());
    let log_buffer = SharedLogBuffer::new();
    let log_task = bridge.stream_logs(Arc::new(log_buffer.clone())).await?;

    let mut app = App::new();
    app.device_info = Some(device_info);

    match bridge.list_packages(false).await {
        Ok(packages) => app.set_packages(packages, cli.package.as_deref()),
        Err(e) => notices.push(format!("Package list failed: {}", e)).await,
    }
    match bridge.list_processes().await {
        Ok(processes) => app.processes = processes,
        Err(e) => notices.push(format!("Process list failed: {}", e)).await,
    }

    loop {
        let poller_status = poller.status().await;
        let series = poller.series().await;
        let recorder_status = recorder.status().await;
        let logs = log_buffer.snapshot().await;
        let notice_list = notices.snapshot().await;

        terminal.draw(|frame| {
            DashboardScreen::render(
                frame,
                &app,
                &DashboardData {
                    poller: &poller_status,
                    series: &series,
                    recorder: &recorder_status,
                    logs: &logs,
                    notices: &notice_list,
                },
            );
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let CrosstermEvent::Key(key) = event::read()? {
                match app.mode {
                    AppMode::Help => match key.code {
                        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
                            app.toggle_help();
                        }
                        _ => {}
                    },
                    AppMode::Error(_) => match key.code {
                        KeyCode::Esc | KeyCode::Enter => {
                            app.clear_error();
                        }
                        KeyCode::Char('q') => {
                            app.quit();
                        }
                        _ => {}
                    },
                    AppMode::Loading(_) => {}
                    AppMode::FilterInput(_) => match key.code {
                        KeyCode::Esc => {
                            app.cancel_filter_input();
                        }
                        KeyCode::Enter => {
                            app.commit_filter_input();
                            app.reset_scroll();
                        }
                        KeyCode::Backspace => {
                            app.pop_filter_char();
                        }
                        KeyCode::Char(c) => {
                            app.push_filter_char(c);
                        }
                        _ => {}
                    },
                    AppMode::ChooseExportFormat => match key.code {
                        KeyCode::Char('j')
                        | KeyCode::Down
                        | KeyCode::Char('k')
                        | KeyCode::Up => {
                            app.toggle_export_format();
                        }
                        KeyCode::Enter => {
                            app.cancel_modal();
                            match PerformanceView::charted_process(&app, &series) {
                                Some(process) => {
                                    let result = match app.export_format {
                                        ExportFormat::Csv => {
                                            export::export_series_csv(&series, &process, None)
                                        }
                                        ExportFormat::Json => {
                                            export::export_series_json(&series, &process, None)
                                        }
                                    };
                                    match result {
                                        Ok(path) => {
                                            notices
                                                .push(format!(
                                                    "Series exported to {}",
                                                    path.display()
                                                ))
                                                .await;
                                        }
                                        Err(e) => {
                                            app.show_error(format!("Export failed: {}", e));
                                        }
                                    }
                                }
                                None => {
                                    notices.push("No samples to export").await;
                                }
                            }
                        }
                        KeyCode::Esc | KeyCode::Char('q') => {
                            app.cancel_modal();
                        }
                        _ => {}
                    },
                    AppMode::ConfirmSaveRecording => match key.code {
                        KeyCode::Char('y') | KeyCode::Char('Y') => {
                            app.cancel_modal();
                            match export::recording_save_path(None) {
                                Ok(path) => match recorder.save(&path).await {
                                    Ok(()) => {
                                        notices
                                            .push(format!(
                                                "Recording saved to {}",
                                                path.display()
                                            ))
                                            .await;
                                    }
                                    Err(e) => {
                                        app.show_error(format!("Save failed: {}", e));
                                    }
                                },
                                Err(e) => {
                                    app.show_error(format!("Save failed: {}", e));
                                }
                            }
                        }
                        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                            app.cancel_modal();
                        }
                        _ => {}
                    },
                    AppMode::Normal => match (key.code, key.modifiers) {
                        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                            app.quit();
                        }
                        (KeyCode::Char('?'), _) => {
                            app.toggle_help();
                        }
                        (KeyCode::Char('1'), _) => app.select_tab(0),
                        (KeyCode::Char('2'), _) => app.select_tab(1),
                        (KeyCode::Char('3'), _) => app.select_tab(2),
                        (KeyCode::Char('4'), _) => app.select_tab(3),
                        (KeyCode::Char('5'), _) => app.select_tab(4),
                        (KeyCode::Char('l'), _) | (KeyCode::Tab, _) | (KeyCode::Right, _) => {
                            app.next_tab();
                        }
                        (KeyCode::Char('h'), _) | (KeyCode::BackTab, _) | (KeyCode::Left, _) => {
                            app.previous_tab();
                        }
                        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => {
                            if app.current_tab == Tab::Performance && !poller_status.running {
                                app.next_package();
                            } else {
                                app.scroll_down();
                            }
                        }
                        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => {
                            if app.current_tab == Tab::Performance && !poller_status.running {
                                app.previous_package();
                            } else {
                                app.scroll_up();
                            }
                        }
                        (KeyCode::Char('s'), _) | (KeyCode::Enter, _) => match app.current_tab {
                            Tab::Performance => {
                                match app.selected_package().map(str::to_string) {
                                    Some(target) => {
                                        if poller.start(&target).await {
                                            notices
                                                .push(format!("Polling memory of {}", target))
                                                .await;
                                        }
                                    }
                                    None => {
                                        notices.push("No package selected").await;
                                    }
                                }
                            }
                            Tab::Record => match recorder.start().await {
                                Ok(true) => {
                                    notices.push("Screen recording started").await;
                                }
                                Ok(false) => {}
                                Err(e) => {
                                    app.show_error(format!("Recording failed to start: {}", e));
                                }
                            },
                            _ => {}
                        },
                        (KeyCode::Char('x'), _) => match app.current_tab {
                            Tab::Performance => {
                                if poller.stop().await {
                                    notices.push("Memory polling stopped").await;
                                }
                            }
                            Tab::Record => match recorder.stop().await {
                                Ok(true) => {
                                    let bytes = recorder
                                        .artifact()
                                        .await
                                        .map(|a| a.size_bytes())
                                        .unwrap_or(0);
                                    notices
                                        .push(format!(
                                            "Recording pulled ({} KB), press 'e' to save",
                                            bytes / 1024
                                        ))
                                        .await;
                                }
                                Ok(false) => {}
                                Err(e) => {
                                    app.show_error(format!("Recording failed to stop: {}", e));
                                }
                            },
                            _ => {}
                        },
                        (KeyCode::Char('e'), _) => match app.current_tab {
                            Tab::Performance => {
                                if PerformanceView::charted_process(&app, &series).is_some() {
                                    app.show_export_selector();
                                } else {
                                    notices.push("No samples to export").await;
                                }
                            }
                            Tab::Record => {
                                if recorder_status.artifact_bytes.is_some() {
                                    app.mode = AppMode::ConfirmSaveRecording;
                                } else {
                                    notices.push("No recording to save").await;
                                }
                            }
                            _ => {}
                        },
                        (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => {
                            let next = poller_status.interval + Duration::from_millis(250);
                            if poller.set_interval(next).await {
                                config.poll_interval_ms = next.as_millis() as u64;
                                let _ = config.save(config_path.as_deref());
                                notices
                                    .push(format!("Polling interval set to {} ms", next.as_millis()))
                                    .await;
                            } else {
                                notices.push("Interval change rejected while polling").await;
                            }
                        }
                        (KeyCode::Char('-'), _) => {
                            let next = poller_status
                                .interval
                                .saturating_sub(Duration::from_millis(250))
                                .max(Duration::from_millis(MIN_POLL_INTERVAL_MS));
                            if poller.set_interval(next).await {
                                config.poll_interval_ms = next.as_millis() as u64;
                                let _ = config.save(config_path.as_deref());
                                notices
                                    .push(format!("Polling interval set to {} ms", next.as_millis()))
                                    .await;
                            } else {
                                notices.push("Interval change rejected while polling").await;
                            }
                        }
                        (KeyCode::Char('['), _) => {
                            let count = series.process_names().len();
                            app.previous_chart_process(count);
                        }
                        (KeyCode::Char(']'), _) => {
                            let count = series.process_names().len();
                            app.next_chart_process(count);
                        }
                        (KeyCode::Char('f'), _) => {
                            if app.current_tab == Tab::Logs {
                                app.cycle_level_filter();
                                app.reset_scroll();
                            }
                        }
                        (KeyCode::Char('/'), _) => {
                            if app.current_tab == Tab::Logs {
                                app.start_filter_input(FilterField::Package);
                            }
                        }
                        (KeyCode::Char('c'), _) => {
                            if app.current_tab == Tab::Logs {
                                app.start_filter_input(FilterField::Component);
                            }
                        }
                        (KeyCode::Char('r'), _) => {
                            app.show_loading(
                                "Refreshing package and process lists...".to_string(),
                            );
                            terminal.draw(|frame| {
                                DashboardScreen::render(
                                    frame,
                                    &app,
                                    &DashboardData {
                                        poller: &poller_status,
                                        series: &series,
                                        recorder: &recorder_status,
                                        logs: &logs,
                                        notices: &notice_list,
                                    },
                                );
                            })?;

                            match bridge.list_packages(false).await {
                                Ok(packages) => {
                                    let selected = app.selected_package().map(str::to_string);
                                    app.set_packages(packages, selected.as_deref());
                                }
                                Err(e) => {
                                    notices.push(format!("Package list failed: {}", e)).await;
                                }
                            }
                            match bridge.list_processes().await {
                                Ok(processes) => {
                                    app.processes = processes;
                                    app.reset_scroll();
                                }
                                Err(e) => {
                                    notices.push(format!("Process list failed: {}", e)).await;
                                }
                            }
                            app.clear_loading();
                        }
                        _ => {}
                    },
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    poller.shutdown().await?;
    recorder.shutdown().await;
    log_task.abort();

    terminal::restore_terminal(&mut terminal)?;
    Ok(())
}
