/// Transient user notifications
///
/// Two kinds exist: dismissible *messages* (stacked at the top, with a close
/// button) and *toasts* (short pop-ups at the bottom). Both expire on their
/// own. Every notification is also written to the log, errors at `warn`.
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Message,
    Toast,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: Kind,
    pub level: Level,
    pub text: String,
    pub expires_at: Instant,
}

/// Default lifetime when the caller has no opinion
pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Default)]
pub struct Notifications {
    next_id: u64,
    entries: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: Kind, level: Level, text: String, duration: Duration, now: Instant) -> u64 {
        match level {
            Level::Error => tracing::warn!(?kind, "{}", text),
            _ => tracing::info!(?kind, "{}", text),
        }

        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notification {
            id,
            kind,
            level,
            text,
            expires_at: now + duration,
        });
        id
    }

    /// Post a dismissible message
    pub fn message(&mut self, level: Level, text: impl Into<String>, duration: Duration, now: Instant) -> u64 {
        self.push(Kind::Message, level, text.into(), duration, now)
    }

    /// Post a toast
    pub fn toast(&mut self, level: Level, text: impl Into<String>, duration: Duration, now: Instant) -> u64 {
        self.push(Kind::Toast, level, text.into(), duration, now)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }

    /// Drop everything that expired at or before `now`
    pub fn prune(&mut self, now: Instant) {
        self.entries.retain(|n| n.expires_at > now);
    }

    pub fn messages(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().filter(|n| n.kind == Kind::Message)
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().filter(|n| n.kind == Kind::Toast)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any visible notification contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|n| n.text.contains(needle))
    }
}
