use crate::adb::types::LogLevel;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    pub fn new() -> Self {
        Self
    }

    pub fn primary(&self) -> Color {
        Color::Cyan
    }

    pub fn secondary(&self) -> Color {
        Color::Yellow
    }

    pub fn text(&self) -> Color {
        Color::White
    }

    pub fn background(&self) -> Color {
        Color::Black
    }

    pub fn border_focused(&self) -> Color {
        Color::Cyan
    }

    pub fn text_dim(&self) -> Color {
        Color::Indexed(8)
    }

    pub fn success(&self) -> Color {
        Color::Green
    }

    pub fn info(&self) -> Color {
        Color::Blue
    }

    pub fn warning(&self) -> Color {
        Color::Yellow
    }

    pub fn error(&self) -> Color {
        Color::Red
    }

    pub fn border(&self) -> Color {
        Color::Indexed(8)
    }

    pub fn highlight(&self) -> Color {
        Color::Yellow
    }

    pub fn gauge_background(&self) -> Color {
        Color::Reset
    }

    pub fn recording(&self) -> Color {
        Color::Red
    }

    pub fn chart_line_primary(&self) -> Color {
        Color::Cyan
    }

    pub fn log_level(&self, level: LogLevel) -> Color {
        match level {
            LogLevel::Verbose => Color::Indexed(8),
            LogLevel::Debug => Color::Green,
            LogLevel::Info => Color::Blue,
            LogLevel::Warning => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}
