use crate::adb::discovery::DiscoveredDevice;
use crate::theme::Theme;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub struct DevicePickerScreen {
    pub devices: Vec<DiscoveredDevice>,
    pub list_state: ListState,
}

impl DevicePickerScreen {
    pub fn new(devices: Vec<DiscoveredDevice>) -> Self {
        let mut list_state = ListState::default();
        if !devices.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            devices,
            list_state,
        }
    }

    pub fn next(&mut self) {
        if self.devices.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.devices.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.devices.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.devices.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn selected_device(&self) -> Option<&DiscoveredDevice> {
        self.list_state.selected().and_then(|i| self.devices.get(i))
    }

    pub fn render(&mut self, frame: &mut Frame, theme: &Theme) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("DROID-TUI - Select Device")
            .style(
                Style::default()
                    .fg(theme.primary())
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL));

        frame.render_widget(title, chunks[0]);

        if self.devices.is_empty() {
            let empty_msg = Paragraph::new(
                "No devices found.\n\nConnect a device or start an emulator, then press 'r'.",
            )
            .style(Style::default().fg(theme.warning()))
            .block(Block::default().borders(Borders::ALL).title("Empty"));
            frame.render_widget(empty_msg, chunks[1]);
        } else {
            let items: Vec<ListItem> = self
                .devices
                .iter()
                .map(|device| {
                    let model = device.model.as_deref().unwrap_or("unknown model");
                    let content = format!("{} - {} [{}]", device.serial, model, device.state);
                    let color = if device.is_online() {
                        theme.text()
                    } else {
                        theme.text_dim()
                    };
                    ListItem::new(content).style(Style::default().fg(color))
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Attached Devices"),
                )
                .highlight_style(
                    Style::default()
                        .bg(theme.primary())
                        .fg(theme.background())
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol(">> ");

            frame.render_stateful_widget(list, chunks[1], &mut self.list_state);
        }

        let help = Paragraph::new("↑/k: Up | ↓/j: Down | Enter: Attach | r: Refresh | q: Quit")
            .style(Style::default().fg(theme.text_dim()))
            .block(Block::default().borders(Borders::ALL).title("Controls"));

        frame.render_widget(help, chunks[2]);
    }
}
