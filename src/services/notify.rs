//! Fire-and-forget user notifications (toasts).

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::services::ServiceResult;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.level, self.message)
    }
}

/// Sink for transient success/error messages. Nothing is returned to the caller.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that writes every message to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => log::info!("{}", notification.message),
            NotificationLevel::Error => log::error!("{}", notification.message),
        }
    }
}

/// Sends the success message or the error's user-facing text, then hands the result back.
pub fn report_outcome<T>(
    notifier: &dyn Notifier,
    result: ServiceResult<T>,
    success: &str,
    fallback: &str,
) -> ServiceResult<T> {
    match &result {
        Ok(_) => notifier.notify(Notification::success(success)),
        Err(err) => {
            log::error!("{fallback}: {err}");
            notifier.notify(Notification::error(err.user_message(fallback)));
        }
    }
    result
}
