use crate::adb::shell::run_adb;
use crate::error::Result;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DiscoveredDevice {
    pub serial: String,
    pub state: String,
    pub model: Option<String>,
}

impl DiscoveredDevice {
    pub fn is_online(&self) -> bool {
        self.state == "device"
    }
}

pub async fn discover_devices() -> Result<Vec<DiscoveredDevice>> {
    let output = run_adb(&["devices", "-l"], Some(Duration::from_secs(5))).await?;
    Ok(parse_device_list(&output))
}

fn parse_device_list(output: &str) -> Vec<DiscoveredDevice> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty()
                || line.starts_with("List of devices")
                || line.starts_with('*')
            {
                return None;
            }

            let mut parts = line.split_whitespace();
            let serial = parts.next()?.to_string();
            let state = parts.next()?.to_string();

            let model = parts
                .filter_map(|field| field.strip_prefix("model:"))
                .next()
                .map(|m| m.replace('_', " "));

            Some(DiscoveredDevice {
                serial,
                state,
                model,
            })
        })
        .collect()
}
