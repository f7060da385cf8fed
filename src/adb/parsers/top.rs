use crate::adb::types::ProcessInfo;

/// Parses a `top -b -n 1 -o pid,%cpu,res,user,name` batch snapshot.
/// Summary lines before the `PID` header and rows that fail to parse are
/// skipped.
pub fn parse_top(output: &str) -> Vec<ProcessInfo> {
    let mut lines = output.lines();

    // Skip forward to the column header.
    for line in lines.by_ref() {
        if line.trim_start().starts_with("PID") {
            break;
        }
    }

    lines
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 5 {
                return None;
            }

            let pid = parts[0].parse::<u32>().ok()?;
            let cpu_percent = parts[1].parse::<f64>().ok()?;

            Some(ProcessInfo {
                pid,
                cpu_percent,
                resident: parts[2].to_string(),
                user: parts[3].to_string(),
                name: parts[4..].join(" "),
            })
        })
        .collect()
}
