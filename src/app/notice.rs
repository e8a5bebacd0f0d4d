use crate::error::Notification;
use crate::library::Track;

use super::model::PlaybackState;

/// Change notification for the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The selected track changed; `None` once nothing is loaded.
    NowPlaying(Option<(usize, Track)>),
    State(PlaybackState),
    Progress { position: f64, duration: Option<f64> },
    /// Duration of the loaded track became known.
    TotalTime(f64),
    PlaylistChanged,
    FavoriteChanged { id: String, favorite: bool },
    RecentlyPlayedChanged,
    Modes { shuffle: bool, repeat: bool },
    Volume { level: f32, muted: bool },
    DownloadProgress(f32),
    Notification(Notification),
}
