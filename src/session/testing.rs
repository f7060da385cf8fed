//! Scripted bridge double for exercising the session managers without a
//! device attached.

use crate::adb::bridge::{DeviceBridge, LogSink};
use crate::adb::types::{
    DeviceInfo, MemoryMetrics, PackageInfo, ProcessInfo, RecordingArtifact,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::Local;
use std::collections::{BTreeMap, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub fn sample_metrics() -> MemoryMetrics {
    let mut metrics = MemoryMetrics::zeroed();
    metrics.java_heap = 10.0;
    metrics.native_heap = 20.0;
    metrics.code = 8.0;
    metrics.stack = 1.0;
    metrics.graphics = 30.0;
    metrics.private_other = 4.0;
    metrics.system = 6.0;
    metrics.total_pss = metrics.bucket_sum();
    metrics
}

pub fn sample_processes(name: &str) -> BTreeMap<String, MemoryMetrics> {
    BTreeMap::from([(name.to_string(), sample_metrics())])
}

pub struct ScriptedBridge {
    pub memory_calls: AtomicUsize,
    pub record_start_calls: AtomicUsize,
    pub record_stop_calls: AtomicUsize,
    pub save_calls: AtomicUsize,
    memory_script: Mutex<VecDeque<Result<BTreeMap<String, MemoryMetrics>>>>,
    default_process: String,
    memory_delay: Option<Duration>,
    fail_record_start: AtomicBool,
    fail_record_stop: AtomicBool,
}

impl ScriptedBridge {
    pub fn new() -> Self {
        Self {
            memory_calls: AtomicUsize::new(0),
            record_start_calls: AtomicUsize::new(0),
            record_stop_calls: AtomicUsize::new(0),
            save_calls: AtomicUsize::new(0),
            memory_script: Mutex::new(VecDeque::new()),
            default_process: "app:main".to_string(),
            memory_delay: None,
            fail_record_start: AtomicBool::new(false),
            fail_record_stop: AtomicBool::new(false),
        }
    }

    pub fn with_default_process(mut self, name: &str) -> Self {
        self.default_process = name.to_string();
        self
    }

    pub fn with_memory_delay(mut self, delay: Duration) -> Self {
        self.memory_delay = Some(delay);
        self
    }

    pub fn failing_record_start(self) -> Self {
        self.fail_record_start.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_record_stop(self) -> Self {
        self.fail_record_stop.store(true, Ordering::SeqCst);
        self
    }

    /// Queues responses consumed in order by `get_memory_info`; once the
    /// queue is drained the bridge answers with the default process.
    pub async fn script_memory(
        &self,
        responses: Vec<Result<BTreeMap<String, MemoryMetrics>>>,
    ) {
        let mut script = self.memory_script.lock().await;
        script.extend(responses);
    }
}

#[async_trait]
impl DeviceBridge for ScriptedBridge {
    async fn device_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo {
            serial: "scripted-0001".to_string(),
            model: "Scripted Phone".to_string(),
            brand: "scripted".to_string(),
            android_version: "14".to_string(),
            sdk_version: 34,
            abi: "arm64-v8a".to_string(),
            kernel_version: "6.1.0".to_string(),
        })
    }

    async fn get_memory_info(&self, _package: &str) -> Result<BTreeMap<String, MemoryMetrics>> {
        self.memory_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.memory_delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self.memory_script.lock().await.pop_front();
        match scripted {
            Some(response) => response,
            None => Ok(sample_processes(&self.default_process)),
        }
    }

    async fn list_packages(&self, _include_system: bool) -> Result<Vec<PackageInfo>> {
        Ok(vec![])
    }

    async fn list_processes(&self) -> Result<Vec<ProcessInfo>> {
        Ok(vec![])
    }

    async fn start_recording(&self) -> Result<()> {
        self.record_start_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_record_start.load(Ordering::SeqCst) {
            return Err(AppError::Recording("scripted start failure".to_string()));
        }
        Ok(())
    }

    async fn stop_recording(&self) -> Result<RecordingArtifact> {
        self.record_stop_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_record_stop.load(Ordering::SeqCst) {
            return Err(AppError::Recording("scripted stop failure".to_string()));
        }
        Ok(RecordingArtifact {
            data: vec![0u8; 16],
            created: Local::now(),
        })
    }

    async fn save_recording(&self, _artifact: &RecordingArtifact, _path: &Path) -> Result<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn stream_logs(&self, _sink: Arc<dyn LogSink>) -> Result<JoinHandle<()>> {
        Ok(tokio::spawn(async {}))
    }
}
