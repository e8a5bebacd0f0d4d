//! Transport operations and output-event handling.

use crate::audio::{OutputEvent, OutputHandle, PlaybackError};
use crate::error::{PlayerError, Result};
use crate::selection;

use super::model::{App, DEFAULT_VOLUME, PlaybackState};
use super::notice::Notice;

impl<O: OutputHandle> App<O> {
    /// Load and start the track at `index`. Out of range is a silent no-op.
    pub fn play_song(&mut self, index: usize) {
        if let Err(e) = self.try_play(index) {
            self.report(e);
        }
    }

    fn try_play(&mut self, index: usize) -> Result<()> {
        let track = self.playlist.select(index)?.clone();

        self.position = 0.0;
        self.duration = track.known_duration();
        self.emit(Notice::NowPlaying(Some((index, track.clone()))));

        // Loading replaces whatever the output held before.
        if let Err(e) = self.output.load(&track.source_uri) {
            self.loaded = false;
            self.set_state(PlaybackState::Error);
            return Err(e.into());
        }
        self.loaded = true;
        self.apply_volume();
        self.output.play();
        self.set_state(PlaybackState::Playing);
        tracing::info!(index, id = %track.id, title = %track.title, "playing");

        self.history.record(&track);
        self.persist_history();
        Ok(())
    }

    pub fn toggle_play(&mut self) {
        match self.state {
            PlaybackState::Idle => {
                if !self.playlist.is_empty() {
                    self.play_song(0);
                }
            }
            PlaybackState::Paused => {
                self.output.play();
                self.set_state(PlaybackState::Playing);
            }
            PlaybackState::Playing => {
                self.output.pause();
                self.set_state(PlaybackState::Paused);
            }
            PlaybackState::Error => {
                // Explicit retry of the failed track.
                let index = self.playlist.current().unwrap_or(0);
                self.play_song(index);
            }
        }
    }

    /// Skip forward. Repeat does not apply to explicit skips.
    pub fn next(&mut self) {
        let next = selection::next_index(
            self.playlist.current(),
            self.playlist.len(),
            self.shuffle,
            &mut self.rng,
        );
        if let Some(index) = next {
            self.play_song(index);
        }
    }

    pub fn previous(&mut self) {
        let previous = selection::previous_index(
            self.playlist.current(),
            self.playlist.len(),
            self.shuffle,
            &mut self.rng,
        );
        if let Some(index) = previous {
            self.play_song(index);
        }
    }

    /// The loaded track finished on its own.
    pub fn on_track_end(&mut self) {
        if self.repeat && self.loaded && self.playlist.current().is_some() {
            if let Err(e) = self.restart_current() {
                self.set_state(PlaybackState::Error);
                self.report(e);
            }
            return;
        }
        self.next();
    }

    fn restart_current(&mut self) -> Result<()> {
        self.output.set_position(0.0)?;
        self.position = 0.0;
        self.output.play();
        self.set_state(PlaybackState::Playing);
        self.emit(Notice::Progress {
            position: 0.0,
            duration: self.duration,
        });
        Ok(())
    }

    /// Jump to `fraction` of the loaded track. No-op while the duration is
    /// unknown.
    pub fn seek(&mut self, fraction: f64) {
        if !self.loaded || fraction.is_nan() {
            return;
        }
        let Some(duration) = self.duration else {
            return;
        };

        let position = fraction.clamp(0.0, 1.0) * duration;
        match self.output.set_position(position) {
            Ok(()) => {
                self.position = position;
                self.emit(Notice::Progress {
                    position,
                    duration: Some(duration),
                });
            }
            Err(e) => self.report(e.into()),
        }
    }

    /// Set the volume, clamped to `[0, 1]`. Also unmutes.
    pub fn set_volume(&mut self, level: f32) {
        if level.is_nan() {
            return;
        }
        self.volume = level.clamp(0.0, 1.0);
        self.muted = false;
        self.apply_volume();
        self.emit_volume();
    }

    /// Mute keeps the level for later; unmute restores it, or
    /// [`DEFAULT_VOLUME`] when it was zero.
    pub fn toggle_mute(&mut self) {
        let audible = !self.muted && self.volume > 0.0;
        if audible {
            self.muted = true;
        } else {
            self.muted = false;
            if self.volume <= 0.0 {
                self.volume = DEFAULT_VOLUME;
            }
        }
        self.apply_volume();
        self.emit_volume();
    }

    fn emit_volume(&self) {
        self.emit(Notice::Volume {
            level: self.volume,
            muted: self.muted,
        });
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
        self.emit_modes();
    }

    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
        self.emit_modes();
    }

    fn emit_modes(&self) {
        tracing::debug!(shuffle = self.shuffle, repeat = self.repeat, "modes");
        self.emit(Notice::Modes {
            shuffle: self.shuffle,
            repeat: self.repeat,
        });
    }

    /// Drain the output and apply everything it reported.
    pub fn poll_output(&mut self) {
        for event in self.output.poll() {
            self.on_output_event(event);
        }
    }

    pub fn on_output_event(&mut self, event: OutputEvent) {
        match event {
            OutputEvent::TimeUpdate { position, duration } => {
                self.position = position;
                if self.duration.is_none() {
                    self.duration = duration.filter(|d| d.is_finite() && *d > 0.0);
                }
                self.emit(Notice::Progress {
                    position,
                    duration: self.duration,
                });
            }
            OutputEvent::Ended => self.on_track_end(),
            OutputEvent::MetadataLoaded { duration } => self.on_metadata(duration),
            OutputEvent::Error(msg) => {
                self.set_state(PlaybackState::Error);
                self.report(PlayerError::Playback(PlaybackError::Stream(msg)));
            }
        }
    }

    fn on_metadata(&mut self, duration: f64) {
        if !duration.is_finite() || duration <= 0.0 {
            return;
        }
        self.duration = Some(duration);
        self.emit(Notice::TotalTime(duration));

        let unknown = self
            .playlist
            .current_track()
            .filter(|t| t.known_duration().is_none())
            .map(|t| t.id.clone());
        if let Some(id) = unknown {
            self.playlist.set_duration(&id, duration);
            self.persist_playlist();
        }
    }
}
