//! `App` and `PlaybackState`: session state, construction and the helpers
//! shared by the transport and editing operations.

use std::sync::mpsc::{self, Receiver, Sender};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::audio::OutputHandle;
use crate::config::PlayerSettings;
use crate::error::{Notification, PlayerError};
use crate::playlist::Playlist;
use crate::store::Store;
use crate::tracker::{FavoriteSet, RecentCard, RecentlyPlayed};

use super::notice::Notice;

/// Level restored by unmute when the remembered level is zero.
pub const DEFAULT_VOLUME: f32 = 0.7;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing loaded.
    #[default]
    Idle,
    /// Loaded, not playing.
    Paused,
    Playing,
    /// The last load or playback failed. The session stays usable.
    Error,
}

/// One playback session.
pub struct App<O: OutputHandle> {
    pub(super) playlist: Playlist,
    pub(super) favorites: FavoriteSet,
    pub(super) history: RecentlyPlayed,
    pub(super) store: Box<dyn Store>,
    pub(super) output: O,

    pub(super) state: PlaybackState,
    /// Whether the output currently holds a source.
    pub(super) loaded: bool,
    pub(super) volume: f32,
    pub(super) muted: bool,
    pub(super) shuffle: bool,
    pub(super) repeat: bool,
    pub(super) position: f64,
    pub(super) duration: Option<f64>,

    pub(super) rng: StdRng,
    notices: Option<Sender<Notice>>,
}

impl<O: OutputHandle> App<O> {
    /// Restore a session from `store`, starting with the configured volume
    /// and modes.
    pub fn restore(output: O, store: Box<dyn Store>, settings: &PlayerSettings) -> Self {
        let playlist = Playlist::load(store.as_ref());
        let favorites = FavoriteSet::load(store.as_ref());
        let history = RecentlyPlayed::load(store.as_ref());
        tracing::info!(
            tracks = playlist.len(),
            favorites = favorites.len(),
            recent = history.len(),
            "session restored"
        );

        let mut app = Self {
            playlist,
            favorites,
            history,
            store,
            output,
            state: PlaybackState::Idle,
            loaded: false,
            volume: settings.volume.clamp(0.0, 1.0),
            muted: false,
            shuffle: settings.shuffle,
            repeat: settings.repeat,
            position: 0.0,
            duration: None,
            rng: StdRng::from_entropy(),
            notices: None,
        };
        app.apply_volume();
        app
    }

    /// Replace the random source used for shuffle draws.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Start sending notices to a new observer. Replaces any previous one.
    pub fn subscribe(&mut self) -> Receiver<Notice> {
        let (tx, rx) = mpsc::channel();
        self.notices = Some(tx);
        rx
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn history(&self) -> &RecentlyPlayed {
        &self.history
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// First `limit` recently played entries with their playlist positions.
    pub fn recent_cards(&self, limit: usize) -> Vec<RecentCard<'_>> {
        self.history.cards(&self.playlist, limit)
    }

    pub(super) fn emit(&self, notice: Notice) {
        if let Some(tx) = &self.notices {
            // Observer gone: nothing left to tell.
            let _ = tx.send(notice);
        }
    }

    pub(super) fn notify(&self, notification: Notification) {
        self.emit(Notice::Notification(notification));
    }

    /// Turn a failed operation into its user-facing notification.
    pub(super) fn report(&self, err: PlayerError) {
        match &err {
            PlayerError::NotFound(what) => tracing::debug!(what = %what, "lookup miss ignored"),
            other => tracing::warn!(error = %other, "operation failed"),
        }
        if let Some(n) = err.into_notification() {
            self.notify(n);
        }
    }

    pub(super) fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            tracing::debug!(from = ?self.state, to = ?state, "playback state");
            self.state = state;
            self.emit(Notice::State(state));
        }
    }

    pub(super) fn apply_volume(&mut self) {
        let level = if self.muted { 0.0 } else { self.volume };
        self.output.set_volume(level);
    }

    pub(super) fn persist_playlist(&mut self) {
        if let Err(e) = self.playlist.save(self.store.as_mut()) {
            self.report(e.into());
        }
        self.emit(Notice::PlaylistChanged);
    }

    pub(super) fn persist_favorites(&mut self) {
        if let Err(e) = self.favorites.save(self.store.as_mut()) {
            self.report(e.into());
        }
    }

    pub(super) fn persist_history(&mut self) {
        if let Err(e) = self.history.save(self.store.as_mut()) {
            self.report(e.into());
        }
        self.emit(Notice::RecentlyPlayedChanged);
    }
}
