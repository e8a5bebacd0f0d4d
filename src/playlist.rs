//! The ordered playlist and its current selection.
//!
//! Insertion order is display and iteration order; nothing here ever sorts.
//! The current index always points at the same track across removals and
//! moves, or is cleared when that track goes away.

use crate::error::{PlayerError, Result};
use crate::library::Track;
use crate::store::{self, PLAYLIST_KEY, Store, StoreError};

#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: Option<usize>,
}

/// What `remove` took out, and whether it was the selected track.
#[derive(Debug, Clone, PartialEq)]
pub struct Removed {
    pub track: Track,
    pub was_current: bool,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored tracks. Nothing is selected.
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            current: None,
        }
    }

    /// Full replace from the store. A missing or corrupt record gives an
    /// empty playlist.
    pub fn load(store: &dyn Store) -> Self {
        let tracks: Vec<Track> = store::load_or_default(store, PLAYLIST_KEY);
        tracing::debug!(count = tracks.len(), "playlist loaded");
        Self::from_tracks(tracks)
    }

    pub fn save(&self, store: &mut dyn Store) -> std::result::Result<(), StoreError> {
        store::save(store, PLAYLIST_KEY, &self.tracks)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Select `index` as the current track.
    pub fn select(&mut self, index: usize) -> Result<&Track> {
        if index >= self.tracks.len() {
            return Err(PlayerError::NotFound(format!("playlist index {index}")));
        }
        self.current = Some(index);
        Ok(&self.tracks[index])
    }

    /// Append `track`. Returns its index.
    ///
    /// Rejects an empty source and an id that is already in the playlist.
    pub fn add(&mut self, track: Track) -> Result<usize> {
        if track.source_uri.trim().is_empty() {
            return Err(PlayerError::Validation(
                "Track has no audio source".to_string(),
            ));
        }
        if track.id.trim().is_empty() {
            return Err(PlayerError::Validation("Track has no id".to_string()));
        }
        if self.position_of(&track.id).is_some() {
            return Err(PlayerError::Validation(format!(
                "Track {} is already in the playlist",
                track.id
            )));
        }

        self.tracks.push(track);
        Ok(self.tracks.len() - 1)
    }

    /// Remove the entry at `index`, keeping the selection on the same track.
    pub fn remove(&mut self, index: usize) -> Result<Removed> {
        if index >= self.tracks.len() {
            return Err(PlayerError::NotFound(format!("playlist index {index}")));
        }

        let track = self.tracks.remove(index);
        let was_current = self.current == Some(index);
        self.current = match self.current {
            Some(c) if c == index => None,
            Some(c) if c > index => Some(c - 1),
            other => other,
        };

        Ok(Removed { track, was_current })
    }

    /// Move the entry at `from` so it ends up at `to`.
    pub fn move_track(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.tracks.len();
        if from >= len || to >= len {
            return Err(PlayerError::NotFound(format!(
                "playlist move {from} -> {to}"
            )));
        }
        if from == to {
            return Ok(());
        }

        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);

        self.current = self.current.map(|c| {
            if c == from {
                to
            } else if from < c && c <= to {
                c - 1
            } else if to <= c && c < from {
                c + 1
            } else {
                c
            }
        });
        Ok(())
    }

    /// Fill in a duration by id. Returns `false` when the track is gone.
    pub fn set_duration(&mut self, id: &str, seconds: f64) -> bool {
        match self.tracks.iter_mut().find(|t| t.id == id) {
            Some(track) => {
                track.duration_seconds = Some(seconds);
                true
            }
            None => false,
        }
    }
}
