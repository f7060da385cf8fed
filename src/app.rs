use crate::adb::types::{DeviceInfo, LogLevel, PackageInfo, ProcessInfo};
use crate::session::log_buffer::LogFilter;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Processes,
    Performance,
    Logs,
    Record,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Overview => Tab::Processes,
            Tab::Processes => Tab::Performance,
            Tab::Performance => Tab::Logs,
            Tab::Logs => Tab::Record,
            Tab::Record => Tab::Overview,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Tab::Overview => Tab::Record,
            Tab::Processes => Tab::Overview,
            Tab::Performance => Tab::Processes,
            Tab::Logs => Tab::Performance,
            Tab::Record => Tab::Logs,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Tab::Overview),
            1 => Some(Tab::Processes),
            2 => Some(Tab::Performance),
            3 => Some(Tab::Logs),
            4 => Some(Tab::Record),
            _ => None,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Overview => "Overview",
            Tab::Processes => "Processes",
            Tab::Performance => "Performance",
            Tab::Logs => "Logs",
            Tab::Record => "Record",
        }
    }

    pub fn all() -> [Tab; 5] {
        [
            Tab::Overview,
            Tab::Processes,
            Tab::Performance,
            Tab::Logs,
            Tab::Record,
        ]
    }
}

/// Which substring filter a text-entry session edits on the Logs tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Package,
    Component,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn all() -> [ExportFormat; 2] {
        [ExportFormat::Csv, ExportFormat::Json]
    }

    pub fn display_name(&self) -> &str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }

    pub fn extension(&self) -> &str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ExportFormat::Csv => ExportFormat::Json,
            ExportFormat::Json => ExportFormat::Csv,
        }
    }
}

pub enum AppMode {
    Normal,
    Help,
    FilterInput(FilterField),
    ChooseExportFormat,
    ConfirmSaveRecording,
    Error(String),
    Loading(String),
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub device_info: Option<DeviceInfo>,
    pub mode: AppMode,
    pub scroll_offset: usize,
    pub theme: Theme,

    pub packages: Vec<PackageInfo>,
    pub package_index: usize,
    pub processes: Vec<ProcessInfo>,

    /// Process charted on the Performance tab, an index into the polling
    /// session's `process_names()`.
    pub chart_index: usize,

    pub log_filter: LogFilter,
    pub filter_input: String,

    pub export_format: ExportFormat,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            current_tab: Tab::Overview,
            device_info: None,
            mode: AppMode::Normal,
            scroll_offset: 0,
            theme: Theme,
            packages: Vec::new(),
            package_index: 0,
            processes: Vec::new(),
            chart_index: 0,
            log_filter: LogFilter::default(),
            filter_input: String::new(),
            export_format: ExportFormat::Csv,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn next_tab(&mut self) {
        self.current_tab = self.current_tab.next();
        self.scroll_offset = 0;
    }

    pub fn previous_tab(&mut self) {
        self.current_tab = self.current_tab.previous();
        self.scroll_offset = 0;
    }

    pub fn select_tab(&mut self, index: usize) {
        if let Some(tab) = Tab::from_index(index) {
            self.current_tab = tab;
            self.scroll_offset = 0;
        }
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            AppMode::Help => AppMode::Normal,
            _ => AppMode::Help,
        };
    }

    pub fn show_error(&mut self, message: String) {
        self.mode = AppMode::Error(message);
    }

    pub fn clear_error(&mut self) {
        if matches!(self.mode, AppMode::Error(_)) {
            self.mode = AppMode::Normal;
        }
    }

    pub fn show_loading(&mut self, message: String) {
        self.mode = AppMode::Loading(message);
    }

    pub fn clear_loading(&mut self) {
        if matches!(self.mode, AppMode::Loading(_)) {
            self.mode = AppMode::Normal;
        }
    }

    pub fn cancel_modal(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Opens the export format selector, keeping the last-used format
    /// preselected.
    pub fn show_export_selector(&mut self) {
        self.mode = AppMode::ChooseExportFormat;
    }

    pub fn toggle_export_format(&mut self) {
        self.export_format = self.export_format.toggle();
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn next_package(&mut self) {
        if !self.packages.is_empty() {
            self.package_index = (self.package_index + 1) % self.packages.len();
        }
    }

    pub fn previous_package(&mut self) {
        if !self.packages.is_empty() {
            self.package_index = if self.package_index == 0 {
                self.packages.len() - 1
            } else {
                self.package_index - 1
            };
        }
    }

    pub fn selected_package(&self) -> Option<&str> {
        self.packages
            .get(self.package_index)
            .map(|p| p.name.as_str())
    }

    pub fn set_packages(&mut self, packages: Vec<PackageInfo>, preselect: Option<&str>) {
        self.package_index = preselect
            .and_then(|name| packages.iter().position(|p| p.name == name))
            .unwrap_or(0);
        self.packages = packages;
    }

    pub fn next_chart_process(&mut self, process_count: usize) {
        if process_count > 0 {
            self.chart_index = (self.chart_index + 1) % process_count;
        }
    }

    pub fn previous_chart_process(&mut self, process_count: usize) {
        if process_count > 0 {
            self.chart_index = if self.chart_index == 0 {
                process_count - 1
            } else {
                self.chart_index - 1
            };
        }
    }

    /// Standard View -> Verbose -> Debug -> Info -> Warning -> Error -> ...
    pub fn cycle_level_filter(&mut self) {
        self.log_filter.level = match self.log_filter.level {
            None => Some(LogLevel::Verbose),
            Some(LogLevel::Verbose) => Some(LogLevel::Debug),
            Some(LogLevel::Debug) => Some(LogLevel::Info),
            Some(LogLevel::Info) => Some(LogLevel::Warning),
            Some(LogLevel::Warning) => Some(LogLevel::Error),
            Some(LogLevel::Error) => None,
        };
    }

    pub fn start_filter_input(&mut self, field: FilterField) {
        self.filter_input = match field {
            FilterField::Package => self.log_filter.package.clone(),
            FilterField::Component => self.log_filter.component.clone(),
        };
        self.mode = AppMode::FilterInput(field);
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter_input.push(c);
    }

    pub fn pop_filter_char(&mut self) {
        self.filter_input.pop();
    }

    pub fn commit_filter_input(&mut self) {
        if let AppMode::FilterInput(field) = self.mode {
            match field {
                FilterField::Package => self.log_filter.package = self.filter_input.clone(),
                FilterField::Component => self.log_filter.component = self.filter_input.clone(),
            }
        }
        self.filter_input.clear();
        self.mode = AppMode::Normal;
    }

    pub fn cancel_filter_input(&mut self) {
        self.filter_input.clear();
        self.mode = AppMode::Normal;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle_is_closed() {
        let mut tab = Tab::Overview;
        for _ in 0..Tab::all().len() {
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Overview);
        assert_eq!(Tab::Overview.previous(), Tab::Record);
    }

    #[test]
    fn test_level_filter_cycle_returns_to_open() {
        let mut app = App::new();
        assert!(app.log_filter.level.is_none());

        for _ in 0..6 {
            app.cycle_level_filter();
        }
        assert!(app.log_filter.level.is_none());
    }

    #[test]
    fn test_filter_input_commit_and_cancel() {
        let mut app = App::new();

        app.start_filter_input(FilterField::Package);
        app.push_filter_char('f');
        app.push_filter_char('o');
        app.push_filter_char('o');
        app.commit_filter_input();
        assert_eq!(app.log_filter.package, "foo");

        app.start_filter_input(FilterField::Component);
        app.push_filter_char('x');
        app.cancel_filter_input();
        assert_eq!(app.log_filter.component, "");
    }

    #[test]
    fn test_export_format_selector_keeps_last_choice() {
        let mut app = App::new();
        assert_eq!(app.export_format, ExportFormat::Csv);

        app.show_export_selector();
        assert!(matches!(app.mode, AppMode::ChooseExportFormat));

        app.toggle_export_format();
        assert_eq!(app.export_format, ExportFormat::Json);
        assert_eq!(app.export_format.extension(), "json");
        app.cancel_modal();

        // Reopening preselects the format chosen last time.
        app.show_export_selector();
        assert_eq!(app.export_format, ExportFormat::Json);
        app.toggle_export_format();
        assert_eq!(app.export_format, ExportFormat::Csv);
    }

    #[test]
    fn test_loading_mode_set_and_clear() {
        let mut app = App::new();

        app.show_loading("Refreshing...".to_string());
        assert!(matches!(app.mode, AppMode::Loading(_)));

        app.clear_loading();
        assert!(matches!(app.mode, AppMode::Normal));

        // clear_loading never dismisses other modals.
        app.show_error("boom".to_string());
        app.clear_loading();
        assert!(matches!(app.mode, AppMode::Error(_)));
    }

    #[test]
    fn test_quit_flag() {
        let mut app = App::new();
        assert!(!app.should_quit);
        app.quit();
        assert!(app.should_quit);
    }

    #[test]
    fn test_package_selection_wraps() {
        let mut app = App::new();
        app.set_packages(
            vec![
                PackageInfo {
                    name: "a.app".to_string(),
                },
                PackageInfo {
                    name: "b.app".to_string(),
                },
            ],
            Some("b.app"),
        );
        assert_eq!(app.selected_package(), Some("b.app"));

        app.next_package();
        assert_eq!(app.selected_package(), Some("a.app"));
        app.previous_package();
        assert_eq!(app.selected_package(), Some("b.app"));
    }
}
