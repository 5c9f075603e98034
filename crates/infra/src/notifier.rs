//! User-facing notices (warnings, confirmations, errors).
//!
//! Presentation is someone else's job; the recorder only says what to show.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

/// Sink for notices. Calls are fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);

    fn info(&self, title: &str, message: &str) {
        self.notify(Notice {
            level: NoticeLevel::Info,
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn warn(&self, title: &str, message: &str) {
        self.notify(Notice {
            level: NoticeLevel::Warning,
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn error(&self, title: &str, message: &str) {
        self.notify(Notice {
            level: NoticeLevel::Error,
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

impl<N> Notifier for std::sync::Arc<N>
where
    N: Notifier + ?Sized,
{
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

/// Routes notices to `tracing` (headless shells, batch tools).
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!(title = %notice.title, "{}", notice.message),
            NoticeLevel::Warning => tracing::warn!(title = %notice.title, "{}", notice.message),
            NoticeLevel::Error => tracing::error!(title = %notice.title, "{}", notice.message),
        }
    }
}

/// Keeps every notice in memory, in order. Used by tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().ok().and_then(|n| n.last().cloned())
    }

    pub fn count(&self, level: NoticeLevel) -> usize {
        self.notices
            .lock()
            .map(|n| n.iter().filter(|x| x.level == level).count())
            .unwrap_or(0)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}
