use crate::adb::bridge::DeviceBridge;
use crate::config::MIN_POLL_INTERVAL_MS;
use crate::error::Result;
use crate::session::notices::NoticeBoard;
use crate::session::series::{time_label, ProcessPoint, TimeSeries, TimeSeriesSample};
use chrono::Local;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Copy of the manager's control state, taken for rendering.
#[derive(Debug, Clone)]
pub struct PollerStatus {
    pub running: bool,
    pub target: Option<String>,
    pub interval: Duration,
    pub samples: usize,
}

struct PollerInner {
    running: bool,
    target: Option<String>,
    interval: Duration,
    timer: Option<JoinHandle<()>>,
}

/// Polling session manager: owns the recurring memory poll for one target
/// package and the time series it accumulates.
///
/// Each `start` bumps a generation counter captured by the poll task; a
/// tick or an in-flight response whose generation no longer matches is
/// discarded, so a timer that outlives `stop` can never touch the series.
pub struct PollingSession {
    bridge: Arc<dyn DeviceBridge>,
    notices: NoticeBoard,
    series: Arc<RwLock<TimeSeries>>,
    inner: Arc<RwLock<PollerInner>>,
    generation: Arc<AtomicU64>,
}

impl PollingSession {
    pub fn new(bridge: Arc<dyn DeviceBridge>, notices: NoticeBoard, interval: Duration) -> Self {
        Self {
            bridge,
            notices,
            series: Arc::new(RwLock::new(TimeSeries::new())),
            inner: Arc::new(RwLock::new(PollerInner {
                running: false,
                target: None,
                interval,
                timer: None,
            })),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Starts polling `target`. A no-op (returning false) while already
    /// running or when the target is empty. Clears any previous series,
    /// polls once immediately, then keeps polling at the configured
    /// interval until `stop`. Failed polls are skipped and reported to the
    /// notice board; they never stop the session.
    pub async fn start(&self, target: &str) -> bool {
        if target.is_empty() {
            return false;
        }

        let mut inner = self.inner.write().await;
        if inner.running {
            return false;
        }

        self.series.write().await.clear();

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        inner.running = true;
        inner.target = Some(target.to_string());

        let bridge = Arc::clone(&self.bridge);
        let series = Arc::clone(&self.series);
        let current = Arc::clone(&self.generation);
        let notices = self.notices.clone();
        let target = target.to_string();
        let interval = inner.interval;

        inner.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if current.load(Ordering::SeqCst) != generation {
                    break;
                }

                match bridge.get_memory_info(&target).await {
                    Ok(processes) => {
                        // The session may have been stopped or restarted
                        // while this request was in flight.
                        if current.load(Ordering::SeqCst) != generation {
                            break;
                        }
                        series.write().await.push(TimeSeriesSample {
                            time: time_label(Local::now()),
                            processes,
                        });
                    }
                    Err(e) => {
                        notices
                            .push(format!("Memory poll for {} failed: {}", target, e))
                            .await;
                    }
                }
            }
        }));

        true
    }

    /// Cancels the recurring poll. The accumulated series is retained for
    /// inspection and export until the next `start`. A no-op while idle.
    pub async fn stop(&self) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.running {
            return false;
        }

        // Invalidate the running generation before cancelling the timer so
        // an already-dequeued tick cannot append.
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
        inner.running = false;

        true
    }

    /// Updates the polling cadence. Rejected (returning false) while
    /// running or below the 100 ms floor; persisting the accepted value is
    /// the caller's concern.
    pub async fn set_interval(&self, interval: Duration) -> bool {
        let mut inner = self.inner.write().await;
        if inner.running || interval < Duration::from_millis(MIN_POLL_INTERVAL_MS) {
            return false;
        }
        inner.interval = interval;
        true
    }

    pub async fn is_running(&self) -> bool {
        self.inner.read().await.running
    }

    pub async fn status(&self) -> PollerStatus {
        let inner = self.inner.read().await;
        PollerStatus {
            running: inner.running,
            target: inner.target.clone(),
            interval: inner.interval,
            samples: self.series.read().await.len(),
        }
    }

    pub async fn series(&self) -> TimeSeries {
        self.series.read().await.clone()
    }

    /// Process names present in the most recent sample.
    pub async fn process_names(&self) -> BTreeSet<String> {
        self.series.read().await.process_names()
    }

    /// Serializable projection of the retained series for one process.
    pub async fn export_points(&self, process: &str) -> Vec<ProcessPoint> {
        self.series.read().await.project(process)
    }

    /// Stops the timer on teardown without touching the retained series.
    pub async fn shutdown(&self) -> Result<()> {
        self.stop().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::session::testing::{sample_processes, ScriptedBridge};
    use pretty_assertions::assert_eq;

    fn session_with(bridge: Arc<ScriptedBridge>, interval_ms: u64) -> PollingSession {
        PollingSession::new(
            bridge,
            NoticeBoard::new(),
            Duration::from_millis(interval_ms),
        )
    }

    #[tokio::test]
    async fn test_start_requires_target() {
        let bridge = Arc::new(ScriptedBridge::new());
        let session = session_with(bridge.clone(), 1000);

        assert!(!session.start("").await);
        assert!(!session.is_running().await);
        assert_eq!(bridge.memory_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_stop_idempotent() {
        let bridge = Arc::new(ScriptedBridge::new());
        let session = session_with(bridge.clone(), 1000);

        // Stop while idle is a silent no-op.
        assert!(!session.stop().await);

        assert!(session.start("com.example.app").await);
        assert!(session.is_running().await);
        // Re-entrant start is a no-op while running.
        assert!(!session.start("com.example.app").await);
        assert!(session.is_running().await);

        assert!(session.stop().await);
        assert!(!session.is_running().await);
        assert!(!session.stop().await);

        // A fresh start after stop is accepted again.
        assert!(session.start("com.example.app").await);
        assert!(session.is_running().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_ticks_accumulate_in_order() {
        let bridge = Arc::new(ScriptedBridge::new());
        let session = session_with(bridge.clone(), 1000);

        assert!(session.start("com.example.app").await);
        tokio::time::sleep(Duration::from_millis(2500)).await;
        tokio::task::yield_now().await;

        let series = session.series().await;
        assert_eq!(series.len(), 3);
        assert_eq!(bridge.memory_calls.load(Ordering::SeqCst), 3);

        let times: Vec<_> = series.iter().map(|s| s.time.clone()).collect();
        for pair in times.windows(2) {
            assert!(pair[0] <= pair[1]);
        }

        let names: Vec<_> = session.process_names().await.into_iter().collect();
        assert_eq!(names, vec!["app:main".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_tick_is_skipped_and_session_continues() {
        let bridge = Arc::new(ScriptedBridge::new());
        bridge
            .script_memory(vec![
                Ok(sample_processes("app:main")),
                Err(AppError::Bridge("device went away".to_string())),
                Ok(sample_processes("app:main")),
            ])
            .await;

        let notices = NoticeBoard::new();
        let session = PollingSession::new(
            bridge.clone(),
            notices.clone(),
            Duration::from_millis(1000),
        );

        assert!(session.start("com.example.app").await);
        tokio::time::sleep(Duration::from_millis(2500)).await;
        tokio::task::yield_now().await;

        assert_eq!(session.series().await.len(), 2);
        assert!(session.is_running().await);
        assert_eq!(bridge.memory_calls.load(Ordering::SeqCst), 3);

        let notice = notices.latest().await.unwrap();
        assert!(notice.text.contains("device went away"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_clears_previous_series() {
        let bridge = Arc::new(ScriptedBridge::new().with_default_process("app:new"));
        bridge
            .script_memory(vec![Ok(sample_processes("app:old"))])
            .await;
        let session = session_with(bridge.clone(), 1000);

        assert!(session.start("com.old.app").await);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(session.series().await.len(), 1);
        session.stop().await;

        assert!(session.start("com.new.app").await);
        tokio::time::sleep(Duration::from_millis(100)).await;

        let series = session.series().await;
        assert_eq!(series.len(), 1);
        let names: Vec<_> = series.process_names().into_iter().collect();
        assert_eq!(names, vec!["app:new".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_interval_rejected_while_running() {
        let bridge = Arc::new(ScriptedBridge::new());
        let session = session_with(bridge, 1000);

        assert!(session.set_interval(Duration::from_millis(500)).await);
        assert!(!session.set_interval(Duration::from_millis(50)).await);

        session.start("com.example.app").await;
        assert!(!session.set_interval(Duration::from_millis(2000)).await);
        assert_eq!(session.status().await.interval, Duration::from_millis(500));

        session.stop().await;
        assert!(session.set_interval(Duration::from_millis(2000)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_series_mutation_after_stop() {
        let bridge =
            Arc::new(ScriptedBridge::new().with_memory_delay(Duration::from_millis(500)));
        let session = session_with(bridge.clone(), 1000);

        assert!(session.start("com.example.app").await);
        // Let the first poll get in flight, then stop underneath it.
        tokio::task::yield_now().await;
        session.stop().await;

        tokio::time::sleep(Duration::from_millis(3000)).await;
        tokio::task::yield_now().await;

        assert!(session.series().await.is_empty());
        assert_eq!(bridge.memory_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_projection_over_retained_series() {
        let bridge = Arc::new(ScriptedBridge::new());
        let session = session_with(bridge, 1000);

        session.start("com.example.app").await;
        tokio::time::sleep(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        session.stop().await;

        // Retained after stop, projectable per process.
        let points = session.export_points("app:main").await;
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].metrics.total_pss, 79.0);
        assert!(session.export_points("app:gone").await.is_empty());
    }
}
