//! Playlist editing, favorites, and results coming back from workers.

use std::path::{Path, PathBuf};

use crate::audio::OutputHandle;
use crate::config::LibrarySettings;
use crate::error::{Notification, PlayerError, Result};
use crate::fetch::FetchError;
use crate::library::{self, Track};

use super::model::{App, PlaybackState};
use super::notice::Notice;

/// A local track that was added with its duration still unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDuration {
    pub id: String,
    pub path: PathBuf,
}

impl<O: OutputHandle> App<O> {
    /// Append `track` and persist. Returns its index.
    pub fn add_track(&mut self, track: Track) -> Result<usize> {
        let id = track.id.clone();
        let index = self.playlist.add(track)?;
        tracing::info!(index, id = %id, "track added");
        self.persist_playlist();
        Ok(index)
    }

    /// Add a picked local file. An empty path is a cancelled pick and does
    /// nothing.
    pub fn add_local(&mut self, path: &Path, settings: &LibrarySettings) -> Option<PendingDuration> {
        if path.as_os_str().is_empty() {
            return None;
        }
        let added = library::local_track(path, settings).and_then(|track| self.add_track(track));
        match added {
            Ok(index) => {
                self.notify(Notification::success("File added successfully!"));
                self.pending_duration(index, path)
            }
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    /// Add every audio file found under `dir`, in path order.
    pub fn add_dir(&mut self, dir: &Path, settings: &LibrarySettings) -> Vec<PendingDuration> {
        if !dir.is_dir() {
            self.report(PlayerError::Validation(format!(
                "Not a folder: {}",
                dir.display()
            )));
            return Vec::new();
        }

        let mut pending = Vec::new();
        for path in library::scan(dir, settings) {
            match library::local_track(&path, settings).and_then(|t| self.add_track(t)) {
                Ok(index) => pending.extend(self.pending_duration(index, &path)),
                Err(e) => self.report(e),
            }
        }

        tracing::info!(dir = %dir.display(), added = pending.len(), "folder imported");
        self.notify(Notification::success(format!("Added {} files", pending.len())));
        pending
    }

    fn pending_duration(&self, index: usize, path: &Path) -> Option<PendingDuration> {
        self.playlist.get(index).map(|t| PendingDuration {
            id: t.id.clone(),
            path: path.to_path_buf(),
        })
    }

    /// Fill in a duration resolved off the control thread. No-op when the
    /// track has been removed since.
    pub fn apply_duration(&mut self, id: &str, seconds: f64) {
        if !seconds.is_finite() || seconds <= 0.0 {
            return;
        }
        if !self.playlist.set_duration(id, seconds) {
            tracing::debug!(id, "duration for a removed track dropped");
            return;
        }
        if self.playlist.current_track().is_some_and(|t| t.id == id) && self.duration.is_none() {
            self.duration = Some(seconds);
        }
        self.persist_playlist();
    }

    /// Remove the entry at `index`. Removing the playing track stops
    /// playback and leaves nothing selected.
    pub fn remove(&mut self, index: usize) {
        let removed = match self.playlist.remove(index) {
            Ok(removed) => removed,
            Err(e) => return self.report(e),
        };
        tracing::info!(index, id = %removed.track.id, "track removed");

        if removed.was_current {
            self.output.stop();
            self.loaded = false;
            self.position = 0.0;
            self.duration = None;
            self.set_state(PlaybackState::Idle);
            self.emit(Notice::NowPlaying(None));
        }
        self.persist_playlist();
    }

    /// Move one entry. Out of range is a silent no-op.
    pub fn move_track(&mut self, from: usize, to: usize) {
        match self.playlist.move_track(from, to) {
            Ok(()) if from != to => self.persist_playlist(),
            Ok(()) => {}
            Err(e) => self.report(e),
        }
    }

    /// Flip favorite membership of `id` and return the new membership.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let favorite = self.favorites.toggle(id);
        self.persist_favorites();
        self.emit(Notice::FavoriteChanged {
            id: id.to_string(),
            favorite,
        });
        favorite
    }

    /// Check a URL before a fetch is started. Returns the trimmed URL, or
    /// `None` after telling the user what is wrong.
    pub fn prepare_fetch(&self, url: &str) -> Option<String> {
        let url = url.trim();
        if url.is_empty() {
            self.report(PlayerError::Validation("Please enter a URL".to_string()));
            return None;
        }
        Some(url.to_string())
    }

    pub fn on_download_progress(&self, percent: f32) {
        self.emit(Notice::DownloadProgress(percent));
    }

    /// Apply the outcome of a remote fetch.
    pub fn handle_fetch_result(&mut self, result: std::result::Result<Track, FetchError>) {
        match result.map_err(PlayerError::from).and_then(|t| self.add_track(t)) {
            Ok(_) => self.notify(Notification::success("Song added successfully!")),
            Err(e) => self.report(e),
        }
    }
}
