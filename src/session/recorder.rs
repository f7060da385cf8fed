use crate::adb::bridge::DeviceBridge;
use crate::adb::types::RecordingArtifact;
use crate::error::Result;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Progress advances by this much per second; purely cosmetic feedback,
/// not a real remote progress signal.
const PROGRESS_STEP: f64 = 0.5;
const PROGRESS_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Recording,
}

/// Copy of the manager's state, taken for rendering.
#[derive(Debug, Clone)]
pub struct RecorderStatus {
    pub state: RecordingState,
    pub busy: bool,
    pub elapsed_secs: u64,
    pub progress: f64,
    pub artifact_bytes: Option<usize>,
}

struct RecorderInner {
    state: RecordingState,
    busy: bool,
    elapsed_secs: u64,
    progress: f64,
    artifact: Option<RecordingArtifact>,
    ticker: Option<JoinHandle<()>>,
}

/// Recording session manager: Idle -> Recording -> Idle, holding at most
/// one pulled artifact. Idempotent under re-entrant start/stop intents;
/// the busy flag rejects intents while a bridge round trip is outstanding.
pub struct RecordingSession {
    bridge: Arc<dyn DeviceBridge>,
    inner: Arc<RwLock<RecorderInner>>,
    generation: Arc<AtomicU64>,
}

impl RecordingSession {
    pub fn new(bridge: Arc<dyn DeviceBridge>) -> Self {
        Self {
            bridge,
            inner: Arc::new(RwLock::new(RecorderInner {
                state: RecordingState::Idle,
                busy: false,
                elapsed_secs: 0,
                progress: 0.0,
                artifact: None,
                ticker: None,
            })),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Begins a remote capture. A no-op (returning Ok(false)) while
    /// already recording or while another round trip is in flight. On
    /// success the elapsed/progress counters restart and any previously
    /// held artifact is discarded; on failure the session stays Idle.
    pub async fn start(&self) -> Result<bool> {
        {
            let mut inner = self.inner.write().await;
            if inner.busy || inner.state == RecordingState::Recording {
                return Ok(false);
            }
            inner.busy = true;
        }

        let result = self.bridge.start_recording().await;

        let mut inner = self.inner.write().await;
        inner.busy = false;
        result?;

        inner.state = RecordingState::Recording;
        inner.elapsed_secs = 0;
        inner.progress = 0.0;
        inner.artifact = None;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.generation);
        let shared = Arc::clone(&self.inner);

        // Once-per-second feedback tick; a stale ticker (stopped or
        // restarted session) exits without touching the counters.
        inner.ticker = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                if current.load(Ordering::SeqCst) != generation {
                    break;
                }
                let mut inner = shared.write().await;
                if inner.state != RecordingState::Recording {
                    break;
                }
                inner.elapsed_secs += 1;
                inner.progress = (inner.progress + PROGRESS_STEP).min(PROGRESS_MAX);
            }
        }));

        Ok(true)
    }

    /// Ends the capture and pulls the artifact. A no-op (Ok(false)) while
    /// Idle or busy. Returns to Idle on both success and failure; only a
    /// successful stop leaves an artifact attached.
    pub async fn stop(&self) -> Result<bool> {
        {
            let mut inner = self.inner.write().await;
            if inner.busy || inner.state != RecordingState::Recording {
                return Ok(false);
            }
            inner.busy = true;
        }

        let result = self.bridge.stop_recording().await;

        let mut inner = self.inner.write().await;
        inner.busy = false;
        inner.state = RecordingState::Idle;
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(ticker) = inner.ticker.take() {
            ticker.abort();
        }

        match result {
            Ok(artifact) => {
                inner.artifact = Some(artifact);
                Ok(true)
            }
            Err(e) => {
                inner.artifact = None;
                Err(e)
            }
        }
    }

    /// Persists the held artifact through the bridge. Fails when no
    /// artifact is attached.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let artifact = self.inner.read().await.artifact.clone().ok_or_else(|| {
            crate::error::AppError::Recording("No recording to save".to_string())
        })?;
        self.bridge.save_recording(&artifact, path).await
    }

    pub async fn is_recording(&self) -> bool {
        self.inner.read().await.state == RecordingState::Recording
    }

    pub async fn artifact(&self) -> Option<RecordingArtifact> {
        self.inner.read().await.artifact.clone()
    }

    pub async fn status(&self) -> RecorderStatus {
        let inner = self.inner.read().await;
        RecorderStatus {
            state: inner.state,
            busy: inner.busy,
            elapsed_secs: inner.elapsed_secs,
            progress: inner.progress,
            artifact_bytes: inner.artifact.as_ref().map(|a| a.size_bytes()),
        }
    }

    /// Best-effort teardown: ends an in-progress capture, dropping the
    /// artifact with the process.
    pub async fn shutdown(&self) {
        let _ = self.stop().await;
    }
}

/// "MM:SS" display form of the elapsed counter.
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::ScriptedBridge;
    use pretty_assertions::assert_eq;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_stop_while_idle_is_a_noop() {
        let bridge = Arc::new(ScriptedBridge::new());
        let recorder = RecordingSession::new(bridge.clone());

        let stopped = recorder.stop().await.unwrap();

        assert!(!stopped);
        assert!(!recorder.is_recording().await);
        assert!(recorder.artifact().await.is_none());
        assert_eq!(bridge.record_stop_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_double_start_issues_one_bridge_call() {
        let bridge = Arc::new(ScriptedBridge::new());
        let recorder = RecordingSession::new(bridge.clone());

        assert!(recorder.start().await.unwrap());
        assert!(!recorder.start().await.unwrap());

        assert!(recorder.is_recording().await);
        assert_eq!(bridge.record_start_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_start_failure_stays_idle() {
        let bridge = Arc::new(ScriptedBridge::new().failing_record_start());
        let recorder = RecordingSession::new(bridge.clone());

        assert!(recorder.start().await.is_err());
        assert!(!recorder.is_recording().await);

        // The failure does not wedge the busy flag; a retry is possible.
        assert!(recorder.start().await.is_err());
        assert_eq!(bridge.record_start_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stop_attaches_artifact_and_new_start_discards_it() {
        let bridge = Arc::new(ScriptedBridge::new());
        let recorder = RecordingSession::new(bridge.clone());

        assert_ok!(recorder.start().await);
        assert!(recorder.stop().await.unwrap());

        assert!(!recorder.is_recording().await);
        let artifact = recorder.artifact().await.unwrap();
        assert_eq!(artifact.size_bytes(), 16);

        assert_ok!(recorder.start().await);
        assert!(recorder.artifact().await.is_none());
    }

    #[tokio::test]
    async fn test_stop_failure_returns_idle_without_artifact() {
        let bridge = Arc::new(ScriptedBridge::new().failing_record_stop());
        let recorder = RecordingSession::new(bridge.clone());

        assert_ok!(recorder.start().await);
        assert!(recorder.stop().await.is_err());

        assert!(!recorder.is_recording().await);
        assert!(recorder.artifact().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_advances_only_while_recording() {
        let bridge = Arc::new(ScriptedBridge::new());
        let recorder = RecordingSession::new(bridge);

        assert_ok!(recorder.start().await);
        tokio::time::sleep(Duration::from_millis(3500)).await;
        tokio::task::yield_now().await;

        let status = recorder.status().await;
        assert_eq!(status.elapsed_secs, 3);
        assert_eq!(status.progress, 1.5);

        assert!(recorder.stop().await.unwrap());
        tokio::time::sleep(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;

        let status = recorder.status().await;
        assert_eq!(status.elapsed_secs, 3);
        assert_eq!(status.state, RecordingState::Idle);
    }

    #[tokio::test]
    async fn test_save_without_artifact_fails() {
        let bridge = Arc::new(ScriptedBridge::new());
        let recorder = RecordingSession::new(bridge.clone());

        assert!(recorder.save(Path::new("/tmp/out.mp4")).await.is_err());
        assert_eq!(bridge.save_calls.load(Ordering::SeqCst), 0);

        assert_ok!(recorder.start().await);
        assert!(recorder.stop().await.unwrap());
        assert_ok!(recorder.save(Path::new("/tmp/out.mp4")).await);
        assert_eq!(bridge.save_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(59), "00:59");
        assert_eq!(format_elapsed(61), "01:01");
        assert_eq!(format_elapsed(600), "10:00");
    }
}
