use crate::adb::types::{LogEntry, LogLevel};
use once_cell::sync::Lazy;
use regex::Regex;

// `logcat -v threadtime`: date, time, pid, tid, priority letter, tag: message
static RE_THREADTIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}-\d{2})\s+(\d{2}:\d{2}:\d{2}\.\d+)\s+(\d+)\s+(\d+)\s+([A-Z])\s+(.*)$")
        .unwrap()
});

/// Parses one logcat line. Lines that do not match the threadtime layout
/// (chatty markers, buffer separators) yield `None` and are dropped.
pub fn parse_logcat_line(line: &str) -> Option<LogEntry> {
    let caps = RE_THREADTIME.captures(line.trim())?;

    let level = LogLevel::from_letter(caps[5].chars().next()?)?;
    let payload = caps[6].trim();

    let (component, message) = match payload.split_once(':') {
        Some((tag, rest)) => (tag.trim().to_string(), rest.trim().to_string()),
        None => ("unknown".to_string(), payload.to_string()),
    };

    Some(LogEntry {
        timestamp: format!("{} {}", &caps[1], &caps[2]),
        process_id: format!("{}-{}", &caps[3], &caps[4]),
        component,
        package: "system".to_string(),
        level,
        message,
    })
}
