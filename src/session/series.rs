use crate::adb::types::MemoryMetrics;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One poll's worth of per-process memory buckets, labeled with the local
/// wall-clock second it was collected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeriesSample {
    pub time: String,
    pub processes: BTreeMap<String, MemoryMetrics>,
}

/// Flat export record for one process at one point in time. Serializes to
/// exactly `{time}` plus the memory bucket names.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessPoint {
    pub time: String,
    #[serde(flatten)]
    pub metrics: MemoryMetrics,
}

pub fn time_label(now: DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Samples accumulated by one polling session, in collection order. The
/// whole series is cleared when a new session starts; it is never pruned
/// incrementally.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimeSeries {
    samples: Vec<TimeSeriesSample>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: TimeSeriesSample) {
        self.samples.push(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeSeriesSample> {
        self.samples.iter()
    }

    pub fn last(&self) -> Option<&TimeSeriesSample> {
        self.samples.last()
    }

    /// Process names present in the most recent sample; empty when no
    /// samples exist.
    pub fn process_names(&self) -> BTreeSet<String> {
        self.samples
            .last()
            .map(|sample| sample.processes.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Projects the full series onto one process. Samples in which the
    /// process is absent are skipped; order is preserved.
    pub fn project(&self, process: &str) -> Vec<ProcessPoint> {
        self.samples
            .iter()
            .filter_map(|sample| {
                sample.processes.get(process).map(|metrics| ProcessPoint {
                    time: sample.time.clone(),
                    metrics: metrics.clone(),
                })
            })
            .collect()
    }
}
