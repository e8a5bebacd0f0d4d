//! Output-handle abstraction and the events it reports.
//!
//! The controller talks to sound output only through [`OutputHandle`], so the
//! state machine can be driven by a fake in tests.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Only local files (`file://` or plain paths) can be played.
    #[error("unsupported source: {0}")]
    UnsupportedUri(String),

    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("seek failed: {0}")]
    Seek(String),

    #[error("audio device unavailable: {0}")]
    Device(String),

    /// Failure reported by the output while a source was playing.
    #[error("{0}")]
    Stream(String),
}

/// Something the output reports back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    /// Periodic position report while playing.
    TimeUpdate {
        position: f64,
        duration: Option<f64>,
    },
    /// The loaded track played to its end.
    Ended,
    /// Duration of the loaded source became known.
    MetadataLoaded { duration: f64 },
    /// The loaded source failed while playing. [`RodioOutput`] never sends
    /// this; it reports failures from `load` and `set_position` instead.
    ///
    /// [`RodioOutput`]: super::RodioOutput
    Error(String),
}

/// The single sound output. Loading a source replaces the previous one
/// entirely; there is never more than one source active.
pub trait OutputHandle {
    /// Replace the current source with `uri`. Leaves the output paused.
    fn load(&mut self, uri: &str) -> Result<(), PlaybackError>;
    fn play(&mut self);
    fn pause(&mut self);
    /// Drop the current source.
    fn stop(&mut self);
    fn set_position(&mut self, seconds: f64) -> Result<(), PlaybackError>;
    /// `level` is already clamped to `[0, 1]`.
    fn set_volume(&mut self, level: f32);
    /// Drain pending events. Called from the control loop on every tick.
    fn poll(&mut self) -> Vec<OutputEvent> {
        Vec::new()
    }
}
