//! The playback controller.
//!
//! `App` owns the playlist, the favorites and history trackers, the store and
//! the single output handle. Every user intent and every output event goes
//! through it; observers only see the [`Notice`]s it sends.

mod edit;
mod model;
mod notice;
mod playback;

pub use edit::PendingDuration;
pub use model::*;
pub use notice::Notice;
