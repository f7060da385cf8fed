use crate::adb::types::{
    DeviceInfo, LogEntry, MemoryMetrics, PackageInfo, ProcessInfo, RecordingArtifact,
};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Receiver for push-delivered log lines. Implementations must not block
/// the delivering task beyond appending to their own storage.
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn ingest(&self, entry: LogEntry);
}

/// Request/response contract against the attached device, plus the logcat
/// push channel. No ordering is guaranteed across distinct operations.
#[async_trait]
pub trait DeviceBridge: Send + Sync {
    async fn device_info(&self) -> Result<DeviceInfo>;

    /// Per-process memory buckets for every process belonging to `package`.
    async fn get_memory_info(&self, package: &str) -> Result<BTreeMap<String, MemoryMetrics>>;

    async fn list_packages(&self, include_system: bool) -> Result<Vec<PackageInfo>>;

    async fn list_processes(&self) -> Result<Vec<ProcessInfo>>;

    async fn start_recording(&self) -> Result<()>;

    async fn stop_recording(&self) -> Result<RecordingArtifact>;

    async fn save_recording(&self, artifact: &RecordingArtifact, path: &Path) -> Result<()>;

    /// Registers `sink` with the device's log stream and returns the task
    /// driving it. The task runs for the process lifetime unless aborted.
    async fn stream_logs(&self, sink: Arc<dyn LogSink>) -> Result<JoinHandle<()>>;
}
