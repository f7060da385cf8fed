use crate::error::Result;
use crate::session::series::TimeSeries;
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

static RE_UNSAFE_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).unwrap());

fn sanitize_name(name: &str) -> String {
    RE_UNSAFE_FILENAME.replace_all(name, "_").to_string()
}

fn resolve_dir(base_dir: Option<&str>) -> PathBuf {
    if let Some(custom_dir) = base_dir {
        PathBuf::from(shellexpand::tilde(custom_dir).to_string())
    } else {
        directories::ProjectDirs::from("com", "droidtui", "Droid-TUI")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// CSV projection of one process's series: `Time` plus the eight memory
/// buckets, one row per retained sample.
pub fn series_to_csv(series: &TimeSeries, process: &str) -> String {
    let mut out = String::from(
        "Time,Java Heap,Native Heap,Code,Stack,Graphics,Private Other,System,TOTAL PSS\n",
    );

    for point in series.project(process) {
        let m = &point.metrics;
        out.push_str(&format!(
            "{},{:.1},{:.1},{:.1},{:.1},{:.1},{:.1},{:.1},{:.1}\n",
            point.time,
            m.java_heap,
            m.native_heap,
            m.code,
            m.stack,
            m.graphics,
            m.private_other,
            m.system,
            m.total_pss
        ));
    }

    out
}

pub fn export_series_csv(
    series: &TimeSeries,
    process: &str,
    base_dir: Option<&str>,
) -> Result<PathBuf> {
    let dir = resolve_dir(base_dir);
    std::fs::create_dir_all(&dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("memory_data_{}_{}.csv", sanitize_name(process), timestamp);
    let filepath = dir.join(&filename);

    let mut file = File::create(&filepath)?;
    file.write_all(series_to_csv(series, process).as_bytes())?;

    Ok(filepath)
}

/// JSON projection of one process's series: an array of flat records,
/// each `time` plus the eight memory buckets.
pub fn series_to_json(series: &TimeSeries, process: &str) -> Result<String> {
    Ok(serde_json::to_string_pretty(&series.project(process))?)
}

pub fn export_series_json(
    series: &TimeSeries,
    process: &str,
    base_dir: Option<&str>,
) -> Result<PathBuf> {
    let dir = resolve_dir(base_dir);
    std::fs::create_dir_all(&dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("memory_data_{}_{}.json", sanitize_name(process), timestamp);
    let filepath = dir.join(&filename);

    std::fs::write(&filepath, series_to_json(series, process)?)?;

    Ok(filepath)
}

/// Destination for a pulled screen recording.
pub fn recording_save_path(base_dir: Option<&str>) -> Result<PathBuf> {
    let dir = resolve_dir(base_dir);
    std::fs::create_dir_all(&dir)?;

    let filename = format!("screen_recording_{}.mp4", Local::now().timestamp());
    Ok(dir.join(filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::series::TimeSeriesSample;
    use crate::session::testing::sample_processes;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("com.example.app"), "com.example.app");
        assert_eq!(sanitize_name("app:main/odd"), "app_main_odd");
    }

    #[test]
    fn test_series_to_csv_layout() {
        let mut series = TimeSeries::new();
        series.push(TimeSeriesSample {
            time: "10:00:00".to_string(),
            processes: sample_processes("app:main"),
        });
        series.push(TimeSeriesSample {
            time: "10:00:01".to_string(),
            processes: sample_processes("app:main"),
        });

        let csv = series_to_csv(&series, "app:main");
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Time,Java Heap,Native Heap,Code,Stack,Graphics,Private Other,System,TOTAL PSS"
        );
        assert_eq!(
            lines[1],
            "10:00:00,10.0,20.0,8.0,1.0,30.0,4.0,6.0,79.0"
        );
        assert!(lines[2].starts_with("10:00:01,"));
    }

    #[test]
    fn test_series_to_json_layout() {
        let mut series = TimeSeries::new();
        series.push(TimeSeriesSample {
            time: "10:00:00".to_string(),
            processes: sample_processes("app:main"),
        });
        series.push(TimeSeriesSample {
            time: "10:00:01".to_string(),
            processes: sample_processes("app:main"),
        });

        let json = series_to_json(&series, "app:main").unwrap();
        let records: serde_json::Value = serde_json::from_str(&json).unwrap();
        let records = records.as_array().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["time"], "10:00:00");
        assert_eq!(records[0]["Java Heap"], 10.0);
        assert_eq!(records[0]["TOTAL PSS"], 79.0);
        assert_eq!(records[1]["time"], "10:00:01");

        let empty = series_to_json(&series, "app:gone").unwrap();
        assert_eq!(empty.trim(), "[]");
    }

    #[test]
    fn test_csv_for_absent_process_is_header_only() {
        let series = TimeSeries::new();
        let csv = series_to_csv(&series, "app:gone");
        assert_eq!(csv.lines().count(), 1);
    }
}
