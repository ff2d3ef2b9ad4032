//! Notification Queue
//!
//! Transient, user-facing messages with a fixed display lifetime. Expiry is driven
//! by the UI loop calling [`NotificationQueue::expire`] with the current instant.

use chrono::Local;
use std::collections::VecDeque;
use std::fmt::Display;
use std::time::{Duration, Instant};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "✅",
            Severity::Error => "❌",
            Severity::Warning => "⚠️",
            Severity::Info => "ℹ️",
        }
    }
}

/// Unique, monotonically increasing notification identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(u64);

impl Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
    /// Local wall-clock time of creation, for display.
    pub timestamp: String,
}

impl Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.severity, self.timestamp, self.message)
    }
}

/// Insertion-ordered set of visible notifications.
///
/// Every notification leaves the queue exactly once, through either [`dismiss`]
/// or [`expire`]; whichever happens first wins and the other sees nothing.
///
/// [`dismiss`]: NotificationQueue::dismiss
/// [`expire`]: NotificationQueue::expire
#[derive(Debug)]
pub struct NotificationQueue {
    visible: VecDeque<Notification>,
    next_id: u64,
    display_duration: Duration,
}

impl NotificationQueue {
    pub fn new(display_duration: Duration) -> Self {
        Self {
            visible: VecDeque::new(),
            next_id: 1,
            display_duration,
        }
    }

    pub fn display_duration(&self) -> Duration {
        self.display_duration
    }

    /// Append a notification stamped with the current instant.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.push_at(message, severity, Instant::now())
    }

    /// Append a notification created at `now`.
    pub fn push_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: Instant,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.visible.push_back(Notification {
            id,
            message: message.into(),
            severity,
            created_at: now,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });
        id
    }

    /// Remove a notification before it expires. Returns `None` if it is already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> Option<Notification> {
        let position = self.visible.iter().position(|n| n.id == id)?;
        self.visible.remove(position)
    }

    /// Remove every notification whose display time has elapsed at `now`.
    ///
    /// Returns the removed ids in insertion order.
    pub fn expire(&mut self, now: Instant) -> Vec<NotificationId> {
        let display_duration = self.display_duration;
        let mut expired = Vec::new();
        self.visible.retain(|n| {
            let done = n.created_at + display_duration <= now;
            if done {
                expired.push(n.id);
            }
            !done
        });
        expired
    }

    /// Earliest instant at which [`expire`](Self::expire) will remove something.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.visible
            .iter()
            .map(|n| n.created_at + self.display_duration)
            .min()
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.visible.iter().find(|n| n.id == id)
    }

    pub fn visible(&self) -> impl DoubleEndedIterator<Item = &Notification> {
        self.visible.iter()
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}
