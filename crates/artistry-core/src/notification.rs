//! Toast notifications raised by the transfer flow.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn transfer_succeeded() -> Self {
        Self {
            title: "Success".to_string(),
            description: "Style transfer completed successfully".to_string(),
            kind: NotificationKind::Success,
        }
    }

    pub fn transfer_failed(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: message.into(),
            kind: NotificationKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}
