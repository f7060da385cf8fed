use crate::adb::bridge::{DeviceBridge, LogSink};
use crate::adb::parsers::{logcat, meminfo, top};
use crate::adb::shell::{run_adb, run_adb_bytes};
use crate::adb::types::{
    DeviceInfo, MemoryMetrics, PackageInfo, ProcessInfo, RecordingArtifact,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

const PULL_TIMEOUT: Duration = Duration::from_secs(60);

/// Bridge to one attached device, addressed by serial, speaking through
/// the `adb` executable.
pub struct AdbBridge {
    serial: String,
    recording: RwLock<Option<ActiveRecording>>,
}

struct ActiveRecording {
    remote_path: String,
    child: Child,
}

fn remote_recording_path(now: DateTime<Local>) -> String {
    format!("/sdcard/screenrecord_{}.mp4", now.format("%Y%m%d_%H%M%S"))
}

impl AdbBridge {
    pub fn new(serial: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
            recording: RwLock::new(None),
        }
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    async fn shell(&self, command: &str) -> Result<String> {
        let output = run_adb(&["-s", &self.serial, "shell", command], None).await?;
        Ok(output)
    }

    async fn getprop(&self, property: &str) -> Result<String> {
        let output = self.shell(&format!("getprop {}", property)).await?;
        Ok(output.trim().to_string())
    }
}

#[async_trait]
impl DeviceBridge for AdbBridge {
    async fn device_info(&self) -> Result<DeviceInfo> {
        let sdk_version = self
            .getprop("ro.build.version.sdk")
            .await?
            .parse::<u32>()
            .map_err(|e| AppError::Parse(format!("Bad SDK version: {}", e)))?;

        Ok(DeviceInfo {
            serial: self.getprop("ro.serialno").await?,
            model: self.getprop("ro.product.model").await?,
            brand: self.getprop("ro.product.brand").await?,
            android_version: self.getprop("ro.build.version.release").await?,
            sdk_version,
            abi: self.getprop("ro.product.cpu.abi").await?,
            kernel_version: self.shell("uname -r").await?.trim().to_string(),
        })
    }

    async fn get_memory_info(&self, package: &str) -> Result<BTreeMap<String, MemoryMetrics>> {
        let output = self
            .shell(&format!(
                "dumpsys meminfo --local -s --package {}",
                package
            ))
            .await?;

        meminfo::parse_meminfo(&output).map_err(AppError::Parse)
    }

    async fn list_packages(&self, include_system: bool) -> Result<Vec<PackageInfo>> {
        let command = if include_system {
            "pm list packages"
        } else {
            "pm list packages -3"
        };
        let output = self.shell(command).await?;

        let mut packages: Vec<PackageInfo> = output
            .lines()
            .filter_map(|line| line.trim().strip_prefix("package:"))
            .map(|name| PackageInfo {
                name: name.to_string(),
            })
            .collect();
        packages.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(packages)
    }

    async fn list_processes(&self) -> Result<Vec<ProcessInfo>> {
        let output = self
            .shell("top -b -n 1 -o pid,%cpu,res,user,name")
            .await?;
        Ok(top::parse_top(&output))
    }

    async fn start_recording(&self) -> Result<()> {
        let mut recording = self.recording.write().await;
        if recording.is_some() {
            return Err(AppError::Recording(
                "Recording already in progress".to_string(),
            ));
        }

        let remote_path = remote_recording_path(Local::now());
        let child = Command::new("adb")
            .args(["-s", &self.serial, "shell", "screenrecord", &remote_path])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AppError::Recording(format!("Failed to spawn screenrecord: {}", e)))?;

        *recording = Some(ActiveRecording { remote_path, child });
        Ok(())
    }

    async fn stop_recording(&self) -> Result<RecordingArtifact> {
        let Some(mut active) = self.recording.write().await.take() else {
            return Err(AppError::Recording("No recording in progress".to_string()));
        };

        self.shell("pkill -l SIGINT screenrecord").await?;
        // screenrecord finalizes the mp4 container after the signal.
        tokio::time::sleep(Duration::from_secs(1)).await;
        let _ = active.child.wait().await;

        let pulled = run_adb_bytes(
            &["-s", &self.serial, "exec-out", "cat", &active.remote_path],
            Some(PULL_TIMEOUT),
        )
        .await;
        let _ = self.shell(&format!("rm {}", active.remote_path)).await;

        let data = pulled?;
        if data.is_empty() {
            return Err(AppError::Recording(
                "Device returned an empty recording".to_string(),
            ));
        }

        Ok(RecordingArtifact {
            data,
            created: Local::now(),
        })
    }

    async fn save_recording(&self, artifact: &RecordingArtifact, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, &artifact.data).await?;
        Ok(())
    }

    async fn stream_logs(&self, sink: Arc<dyn LogSink>) -> Result<JoinHandle<()>> {
        self.shell("logcat --clear").await?;

        let mut child = Command::new("adb")
            .args(["-s", &self.serial, "logcat", "-v", "threadtime"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AppError::Bridge(format!("Failed to spawn logcat: {}", e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AppError::Bridge("logcat produced no stdout".to_string()))?;

        let handle = tokio::spawn(async move {
            // Child is owned here so logcat dies with the task.
            let _child = child;
            let mut lines = BufReader::new(stdout).lines();

            while let Ok(Some(line)) = lines.next_line().await {
                if let Some(entry) = logcat::parse_logcat_line(&line) {
                    sink.ingest(entry).await;
                }
            }
        });

        Ok(handle)
    }
}
