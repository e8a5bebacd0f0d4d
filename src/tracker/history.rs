use std::collections::VecDeque;

use crate::library::Track;
use crate::playlist::Playlist;
use crate::store::{self, RECENTLY_PLAYED_KEY, Store, StoreError};

/// Maximum number of remembered plays.
pub const RECENT_LIMIT: usize = 10;

/// How many entries the "recently played" view shows.
pub const RECENT_CARDS: usize = 6;

/// Recently played tracks, most recent first, unique by id.
///
/// Entries are copies, so they survive the track being removed from the
/// playlist.
#[derive(Debug, Clone, Default)]
pub struct RecentlyPlayed {
    tracks: VecDeque<Track>,
}

/// One entry of the recently-played view, with the track's current playlist
/// position when it is still there.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentCard<'a> {
    pub track: &'a Track,
    pub playlist_index: Option<usize>,
}

impl RecentlyPlayed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the store, re-applying the dedup and size bound in case the
    /// record was written by something else.
    pub fn load(store: &dyn Store) -> Self {
        let stored: Vec<Track> = store::load_or_default(store, RECENTLY_PLAYED_KEY);
        let mut history = Self::new();
        for track in stored.into_iter().rev() {
            history.record(&track);
        }
        history
    }

    pub fn save(&self, store: &mut dyn Store) -> Result<(), StoreError> {
        store::save(store, RECENTLY_PLAYED_KEY, &self.tracks)
    }

    /// Put a snapshot of `track` at the front, dropping any older entry with
    /// the same id and anything beyond [`RECENT_LIMIT`].
    pub fn record(&mut self, track: &Track) {
        self.tracks.retain(|t| t.id != track.id);
        self.tracks.push_front(track.clone());
        self.tracks.truncate(RECENT_LIMIT);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// First `limit` entries paired with their position in `playlist`.
    pub fn cards<'a>(&'a self, playlist: &Playlist, limit: usize) -> Vec<RecentCard<'a>> {
        self.tracks
            .iter()
            .take(limit)
            .map(|track| RecentCard {
                track,
                playlist_index: playlist.position_of(&track.id),
            })
            .collect()
    }
}
