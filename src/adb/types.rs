use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One process's memory sample, in megabytes with one decimal, using the
/// bucket layout of `dumpsys meminfo`. `TOTAL PSS` is the sum of the other
/// seven buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryMetrics {
    #[serde(rename = "Java Heap")]
    pub java_heap: f64,
    #[serde(rename = "Native Heap")]
    pub native_heap: f64,
    #[serde(rename = "Code")]
    pub code: f64,
    #[serde(rename = "Stack")]
    pub stack: f64,
    #[serde(rename = "Graphics")]
    pub graphics: f64,
    #[serde(rename = "Private Other")]
    pub private_other: f64,
    #[serde(rename = "System")]
    pub system: f64,
    #[serde(rename = "TOTAL PSS")]
    pub total_pss: f64,
}

impl MemoryMetrics {
    pub const BUCKET_NAMES: [&'static str; 8] = [
        "Java Heap",
        "Native Heap",
        "Code",
        "Stack",
        "Graphics",
        "Private Other",
        "System",
        "TOTAL PSS",
    ];

    pub fn zeroed() -> Self {
        Self {
            java_heap: 0.0,
            native_heap: 0.0,
            code: 0.0,
            stack: 0.0,
            graphics: 0.0,
            private_other: 0.0,
            system: 0.0,
            total_pss: 0.0,
        }
    }

    /// Sum of the seven component buckets, rounded to one decimal.
    pub fn bucket_sum(&self) -> f64 {
        let sum = self.java_heap
            + self.native_heap
            + self.code
            + self.stack
            + self.graphics
            + self.private_other
            + self.system;
        (sum * 10.0).round() / 10.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub serial: String,
    pub model: String,
    pub brand: String,
    pub android_version: String,
    pub sdk_version: u32,
    pub abi: String,
    pub kernel_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub cpu_percent: f64,
    pub resident: String,
    pub user: String,
    pub name: String,
}

/// A recorded screen capture pulled off the device.
#[derive(Debug, Clone)]
pub struct RecordingArtifact {
    pub data: Vec<u8>,
    pub created: DateTime<Local>,
}

impl RecordingArtifact {
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum LogLevel {
    Verbose,
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn all() -> [LogLevel; 5] {
        [
            LogLevel::Verbose,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warning,
            LogLevel::Error,
        ]
    }

    /// Maps a logcat priority letter. `F` (fatal) is folded into `Error`.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'V' => Some(LogLevel::Verbose),
            'D' => Some(LogLevel::Debug),
            'I' => Some(LogLevel::Info),
            'W' => Some(LogLevel::Warning),
            'E' | 'F' => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            LogLevel::Verbose => 'V',
            LogLevel::Debug => 'D',
            LogLevel::Info => 'I',
            LogLevel::Warning => 'W',
            LogLevel::Error => 'E',
        }
    }
}

/// Immutable once ingested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub process_id: String,
    pub component: String,
    pub package: String,
    pub level: LogLevel,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_letters_round_trip() {
        for level in LogLevel::all() {
            assert_eq!(LogLevel::from_letter(level.letter()), Some(level));
        }
        assert_eq!(LogLevel::from_letter('F'), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_letter('X'), None);
    }

    #[test]
    fn test_bucket_sum_rounds() {
        let mut metrics = MemoryMetrics::zeroed();
        metrics.java_heap = 1.25;
        metrics.native_heap = 2.05;
        assert_eq!(metrics.bucket_sum(), 3.3);
    }
}
