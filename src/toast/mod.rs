//! Transient, auto-expiring notification queue.

use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// How long a toast stays visible.
pub const TOAST_LIFETIME: Duration = Duration::from_millis(2200);

/// Toast severity, each with its own background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub const fn color(self) -> &'static str {
        match self {
            Severity::Info => "#2196F3",
            Severity::Success => "#4CAF50",
            Severity::Error => "#EF5350",
        }
    }
}

/// One queued notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    created: Instant,
}

impl Toast {
    fn new(message: String, severity: Severity) -> Self {
        Self {
            message,
            severity,
            created: Instant::now(),
        }
    }

    fn expired(&self, now: Instant, lifetime: Duration) -> bool {
        now.duration_since(self.created) >= lifetime
    }
}

/// Stacking toast queue; each entry expires independently, duplicates are
/// allowed.
#[derive(Debug)]
pub struct ToastNotifier {
    toasts: VecDeque<Toast>,
    lifetime: Duration,
}

impl ToastNotifier {
    pub fn new() -> Self {
        Self::with_lifetime(TOAST_LIFETIME)
    }

    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            lifetime,
        }
    }

    /// Queue a notification; returns the toast that was added.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> Toast {
        let toast = Toast::new(message.into(), severity);
        self.toasts.push_back(toast.clone());
        toast
    }

    /// Currently visible toasts, pruning anything past its lifetime.
    pub fn visible(&mut self) -> Vec<Toast> {
        let now = Instant::now();
        let lifetime = self.lifetime;
        self.toasts.retain(|toast| !toast.expired(now, lifetime));
        self.toasts.iter().cloned().collect()
    }
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new()
    }
}
