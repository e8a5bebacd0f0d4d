//! Error types shared by the player core.
//!
//! Every user-triggered operation catches its own failures and turns them
//! into a [`Notification`] instead of propagating further; see
//! [`PlayerError::into_notification`].

use thiserror::Error;

use crate::audio::PlaybackError;
use crate::fetch::FetchError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// Bad input to a mutating call (empty source, duplicate id, ...).
    #[error("{0}")]
    Validation(String),

    /// Index or id lookup miss. Always handled as a silent no-op.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("Error playing song: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Error adding song: {0}")]
    Fetch(#[from] FetchError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, PlayerError>;

/// Kind of a transient, auto-dismissed notification.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message for the user. The rendering layer dismisses it after
/// 3 seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

impl PlayerError {
    /// Convert into the user-facing outcome. Lookup misses stay silent.
    pub fn into_notification(self) -> Option<Notification> {
        match self {
            PlayerError::NotFound(_) => None,
            other => Some(Notification::error(other.to_string())),
        }
    }
}
