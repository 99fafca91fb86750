//! UI-specific state (ephemeral)

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use artistry_core::{Notification, SlotKind};

const MAX_LOG_ENTRIES: usize = 200;

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(5);

/// UI-specific state that doesn't need to be persisted
pub struct UiState {
    /// Current theme (dark/light)
    pub theme: Theme,

    /// Technical log visibility
    pub technical_log_expanded: bool,

    /// Technical log entries (max 200)
    pub technical_log: VecDeque<LogEntry>,

    /// Toasts currently on screen, oldest first
    pub toasts: VecDeque<Toast>,

    /// Where each upload zone was drawn last frame, for routing drops
    pub zone_rects: HashMap<SlotKind, egui::Rect>,
}

impl UiState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            technical_log_expanded: false,
            technical_log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            toasts: VecDeque::new(),
            zone_rects: HashMap::new(),
        }
    }

    /// Add a log entry, maintaining max 200 entries
    pub fn add_log_entry(&mut self, entry: LogEntry) {
        if self.technical_log.len() >= MAX_LOG_ENTRIES {
            self.technical_log.pop_front();
        }
        self.technical_log.push_back(entry);
    }

    pub fn push_toast(&mut self, notification: Notification, now: Instant) {
        self.toasts.push_back(Toast {
            notification,
            shown_at: now,
        });
    }

    /// Drop toasts older than [`TOAST_LIFETIME`].
    pub fn expire_toasts(&mut self, now: Instant) {
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < TOAST_LIFETIME);
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(Theme::Dark)
    }
}

/// Theme selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// A notification on screen
#[derive(Clone, Debug)]
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

/// Technical log entry
#[derive(Clone)]
pub struct LogEntry {
    /// Timestamp
    pub timestamp: String,

    /// Log level
    pub level: LogLevel,

    /// Message
    pub message: String,
}

/// Log level for coloring
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> LogEntry {
        LogEntry {
            timestamp: "00:00:00".to_string(),
            level: LogLevel::Info,
            message: format!("entry {n}"),
        }
    }

    #[test]
    fn test_log_is_bounded() {
        let mut ui = UiState::default();
        for n in 0..250 {
            ui.add_log_entry(entry(n));
        }
        assert_eq!(ui.technical_log.len(), MAX_LOG_ENTRIES);
        assert_eq!(ui.technical_log.front().map(|e| e.message.as_str()), Some("entry 50"));
    }

    #[test]
    fn test_toasts_expire() {
        let mut ui = UiState::default();
        let start = Instant::now();
        ui.push_toast(Notification::transfer_succeeded(), start);
        ui.push_toast(
            Notification::transfer_failed("Backend error: bad input"),
            start + Duration::from_secs(3),
        );

        ui.expire_toasts(start + Duration::from_secs(4));
        assert_eq!(ui.toasts.len(), 2);

        ui.expire_toasts(start + Duration::from_secs(6));
        assert_eq!(ui.toasts.len(), 1);
        assert!(ui.toasts[0].notification.is_error());

        ui.expire_toasts(start + Duration::from_secs(9));
        assert!(ui.toasts.is_empty());
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
