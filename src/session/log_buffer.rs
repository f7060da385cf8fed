use crate::adb::bridge::LogSink;
use crate::adb::types::{LogEntry, LogLevel};
use crate::session::ring_buffer::RingBuffer;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const LOG_BUFFER_CAPACITY: usize = 1000;

/// Display filter over the buffer. Predicates are AND-combined; an empty
/// substring or `level: None` leaves that predicate open.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub level: Option<LogLevel>,
    pub package: String,
    pub component: String,
}

impl LogFilter {
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if let Some(level) = self.level {
            if entry.level != level {
                return false;
            }
        }

        if !self.package.is_empty()
            && !entry
                .package
                .to_lowercase()
                .contains(&self.package.to_lowercase())
        {
            return false;
        }

        if !self.component.is_empty()
            && !entry
                .component
                .to_lowercase()
                .contains(&self.component.to_lowercase())
        {
            return false;
        }

        true
    }
}

/// Display-width helper; stored entries are never mutated. Counts chars,
/// not bytes, so multi-byte messages cannot be split mid-character.
pub fn truncate_message(message: &str, max_chars: usize) -> String {
    if message.chars().count() <= max_chars {
        return message.to_string();
    }
    let truncated: String = message.chars().take(max_chars).collect();
    format!("{}...", truncated)
}

/// Bounded FIFO store for push-delivered device log lines. Ingestion is
/// ambient for the process lifetime; there is no stop operation.
#[derive(Clone)]
pub struct LogBuffer {
    entries: RingBuffer<LogEntry>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self {
            entries: RingBuffer::new(LOG_BUFFER_CAPACITY),
        }
    }

    /// The only mutator: appends, evicting the oldest entry past capacity.
    pub fn ingest(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Pure read; ingestion order is preserved in the result.
    pub fn filtered(&self, filter: &LogFilter) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|entry| filter.matches(entry))
            .collect()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle given to the bridge's push channel as the log sink and to
/// the UI for reads.
#[derive(Clone)]
pub struct SharedLogBuffer {
    inner: Arc<RwLock<LogBuffer>>,
}

impl SharedLogBuffer {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(LogBuffer::new())),
        }
    }

    pub async fn snapshot(&self) -> LogBuffer {
        self.inner.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

impl Default for SharedLogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogSink for SharedLogBuffer {
    async fn ingest(&self, entry: LogEntry) {
        self.inner.write().await.ingest(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(level: LogLevel, seq: usize) -> LogEntry {
        LogEntry {
            timestamp: format!("01-22 11:56:{:02}.000", seq % 60),
            process_id: "1234-1234".to_string(),
            component: "ActivityManager".to_string(),
            package: "system".to_string(),
            level,
            message: format!("message {}", seq),
        }
    }

    #[test]
    fn test_capacity_bound_evicts_oldest_in_order() {
        let mut buffer = LogBuffer::new();

        for seq in 0..1500 {
            buffer.ingest(entry(LogLevel::Info, seq));
        }

        assert_eq!(buffer.len(), LOG_BUFFER_CAPACITY);
        let messages: Vec<_> = buffer.iter().map(|e| e.message.clone()).collect();
        assert_eq!(messages.first().unwrap(), "message 500");
        assert_eq!(messages.last().unwrap(), "message 1499");

        // Still strictly in arrival order.
        for (offset, message) in messages.iter().enumerate() {
            assert_eq!(message, &format!("message {}", 500 + offset));
        }
    }

    #[test]
    fn test_level_filter_exact_subset_in_order() {
        let mut buffer = LogBuffer::new();
        buffer.ingest(entry(LogLevel::Info, 0));
        buffer.ingest(entry(LogLevel::Error, 1));
        buffer.ingest(entry(LogLevel::Warning, 2));
        buffer.ingest(entry(LogLevel::Error, 3));

        let filter = LogFilter {
            level: Some(LogLevel::Error),
            ..Default::default()
        };
        let errors = buffer.filtered(&filter);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "message 1");
        assert_eq!(errors[1].message, "message 3");
    }

    #[test]
    fn test_open_filter_passes_everything() {
        let mut buffer = LogBuffer::new();
        for seq in 0..4 {
            buffer.ingest(entry(LogLevel::Debug, seq));
        }

        assert_eq!(buffer.filtered(&LogFilter::default()).len(), 4);
    }

    #[test]
    fn test_substring_filters_are_case_insensitive_and_combined() {
        let mut buffer = LogBuffer::new();
        let mut a = entry(LogLevel::Info, 0);
        a.package = "com.example.app".to_string();
        a.component = "AudioFlinger".to_string();
        let mut b = entry(LogLevel::Info, 1);
        b.package = "com.example.app".to_string();
        b.component = "WindowManager".to_string();
        buffer.ingest(a);
        buffer.ingest(b);

        let filter = LogFilter {
            level: None,
            package: "EXAMPLE".to_string(),
            component: "audio".to_string(),
        };
        let matched = buffer.filtered(&filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].component, "AudioFlinger");

        let filter = LogFilter {
            level: Some(LogLevel::Error),
            package: "EXAMPLE".to_string(),
            component: "audio".to_string(),
        };
        assert!(buffer.filtered(&filter).is_empty());
    }

    #[test]
    fn test_truncate_message() {
        assert_eq!(truncate_message("short", 10), "short");
        assert_eq!(truncate_message("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_message("a longer message", 8), "a longer...");
        assert_eq!(truncate_message("日本語のメッセージ", 3), "日本語...");
    }

    #[tokio::test]
    async fn test_shared_buffer_ingests_through_sink() {
        let shared = SharedLogBuffer::new();
        let sink: Arc<dyn LogSink> = Arc::new(shared.clone());

        sink.ingest(entry(LogLevel::Error, 7)).await;

        let snapshot = shared.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.iter().next().unwrap().message, "message 7");
    }
}
