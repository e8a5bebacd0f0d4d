use std::mem;
use std::path::PathBuf;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::library::uri_to_path;

use super::sink::create_sink_at;
use super::types::{OutputEvent, OutputHandle, PlaybackError};

/// Output handle backed by the default `rodio` device.
///
/// End-of-track is detected by polling: a sink that was playing and has run
/// dry reports [`OutputEvent::Ended`] once.
pub struct RodioOutput {
    stream: OutputStream,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    duration: Option<Duration>,
    /// Start of the current sink within the file, after a seek.
    offset: Duration,
    volume: f32,
    playing: bool,
    pending: Vec<OutputEvent>,
}

impl RodioOutput {
    pub fn open_default() -> Result<Self, PlaybackError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::Device(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped; we log ourselves.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            path: None,
            duration: None,
            offset: Duration::ZERO,
            volume: 1.0,
            playing: false,
            pending: Vec::new(),
        })
    }

    fn replace_sink(&mut self, sink: Sink) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        sink.set_volume(self.volume);
        self.sink = Some(sink);
    }
}

impl OutputHandle for RodioOutput {
    fn load(&mut self, uri: &str) -> Result<(), PlaybackError> {
        self.stop();

        let path = uri_to_path(uri).ok_or_else(|| PlaybackError::UnsupportedUri(uri.to_string()))?;
        let (sink, total) = create_sink_at(&self.stream, &path, Duration::ZERO)?;
        self.replace_sink(sink);
        self.path = Some(path);
        self.duration = total;
        self.offset = Duration::ZERO;

        if let Some(d) = total {
            self.pending.push(OutputEvent::MetadataLoaded {
                duration: d.as_secs_f64(),
            });
        }
        tracing::debug!(uri, duration = ?total, "source loaded");
        Ok(())
    }

    fn play(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.play();
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        self.playing = false;
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.path = None;
        self.duration = None;
        self.playing = false;
        self.pending.clear();
    }

    fn set_position(&mut self, seconds: f64) -> Result<(), PlaybackError> {
        // Scrubbing: rebuild the sink and skip into the file. This also
        // restarts a sink that already ran dry.
        let Some(path) = self.path.clone() else {
            return Err(PlaybackError::Seek("nothing loaded".to_string()));
        };
        let start_at = Duration::try_from_secs_f64(seconds.max(0.0))
            .map_err(|e| PlaybackError::Seek(e.to_string()))?;

        let (sink, _) = create_sink_at(&self.stream, &path, start_at)?;
        self.replace_sink(sink);
        self.offset = start_at;
        if self.playing {
            self.play();
        }
        Ok(())
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level;
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(level);
        }
    }

    fn poll(&mut self) -> Vec<OutputEvent> {
        let mut events = mem::take(&mut self.pending);

        if let Some(s) = self.sink.as_ref() {
            if self.playing {
                if s.empty() {
                    self.playing = false;
                    events.push(OutputEvent::Ended);
                } else {
                    events.push(OutputEvent::TimeUpdate {
                        position: (self.offset + s.get_pos()).as_secs_f64(),
                        duration: self.duration.map(|d| d.as_secs_f64()),
                    });
                }
            }
        }

        events
    }
}
