//! Transient status messages.
//!
//! Every notification lives for [`DISPLAY_MS`] unless dismissed earlier, then
//! fades out for [`FADE_OUT_MS`] before it is dropped. Expiry and dismissal
//! share the same removal path.

use chrono::{DateTime, TimeDelta, Utc};

/// Time a notification stays fully visible
pub const DISPLAY_MS: i64 = 5_000;

/// Length of the removal transition
pub const FADE_OUT_MS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    pub fn name(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
    /// Set once the removal transition has started
    pub removing_since: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn is_removing(&self) -> bool {
        self.removing_since.is_some()
    }

    /// 1.0 while visible, falling to 0.0 across the fade-out
    pub fn opacity(&self, now: DateTime<Utc>) -> f32 {
        match self.removing_since {
            None => 1.0,
            Some(since) => {
                let elapsed = (now - since).num_milliseconds().max(0) as f32;
                (1.0 - elapsed / FADE_OUT_MS as f32).clamp(0.0, 1.0)
            }
        }
    }

    fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + TimeDelta::milliseconds(DISPLAY_MS)
    }
}

/// Unbounded stack of on-screen notifications, oldest first
#[derive(Debug, Default)]
pub struct NotificationStack {
    entries: Vec<Notification>,
    next_id: u64,
}

impl NotificationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.push_at(message, severity, Utc::now())
    }

    pub fn push_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: DateTime<Utc>,
    ) -> NotificationId {
        self.next_id += 1;
        let id = NotificationId(self.next_id);
        let message = message.into();

        match severity {
            Severity::Error => log::warn!("[{}] {}", severity.name(), message),
            _ => log::info!("[{}] {}", severity.name(), message),
        }

        self.entries.push(Notification {
            id,
            message,
            severity,
            created_at: now,
            removing_since: None,
        });
        id
    }

    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        self.dismiss_at(id, Utc::now())
    }

    /// Start the removal transition. Returns false for unknown ids or
    /// notifications already on their way out.
    pub fn dismiss_at(&mut self, id: NotificationId, now: DateTime<Utc>) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(notification) if !notification.is_removing() => {
                notification.removing_since = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Advance timers: expire old notifications and drop finished fade-outs.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        for notification in &mut self.entries {
            if !notification.is_removing() && now >= notification.expires_at() {
                notification.removing_since = Some(notification.expires_at());
            }
        }

        let fade = TimeDelta::milliseconds(FADE_OUT_MS);
        self.entries
            .retain(|n| n.removing_since.is_none_or(|since| now < since + fade));
    }

    /// Earliest moment at which [`tick`](Self::tick) would change something
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        let fade = TimeDelta::milliseconds(FADE_OUT_MS);
        self.entries
            .iter()
            .map(|n| match n.removing_since {
                Some(since) => since + fade,
                None => n.expires_at(),
            })
            .min()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.last()
    }
}
