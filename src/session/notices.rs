use crate::session::ring_buffer::RingBuffer;
use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio::sync::RwLock;

const NOTICE_CAPACITY: usize = 50;

/// A user-visible note about a recoverable failure (a skipped poll, a
/// failed bridge call) or a completed action (an export path).
#[derive(Debug, Clone)]
pub struct Notice {
    pub at: DateTime<Local>,
    pub text: String,
}

/// Bounded observability sink shared between the session managers and the
/// UI. Bridge failures land here instead of stopping a session.
#[derive(Clone)]
pub struct NoticeBoard {
    inner: Arc<RwLock<RingBuffer<Notice>>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RingBuffer::new(NOTICE_CAPACITY))),
        }
    }

    pub async fn push(&self, text: impl Into<String>) {
        self.inner.write().await.push(Notice {
            at: Local::now(),
            text: text.into(),
        });
    }

    pub async fn latest(&self) -> Option<Notice> {
        self.inner.read().await.last().cloned()
    }

    /// Most recent first.
    pub async fn snapshot(&self) -> Vec<Notice> {
        let board = self.inner.read().await;
        let mut notices: Vec<Notice> = board.iter().cloned().collect();
        notices.reverse();
        notices
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_latest_and_order() {
        let board = NoticeBoard::new();
        assert!(board.latest().await.is_none());

        board.push("first").await;
        board.push("second").await;

        assert_eq!(board.latest().await.unwrap().text, "second");
        let texts: Vec<_> = board
            .snapshot()
            .await
            .into_iter()
            .map(|n| n.text)
            .collect();
        assert_eq!(texts, vec!["second".to_string(), "first".to_string()]);
    }
}
