use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::library::{TRACK_IDS, Track, file_uri, resolve_duration};

use super::FetchError;
use super::progress::parse_progress;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const REMOTE_ARTIST: &str = "YouTube";

/// Runs the external downloader (yt-dlp or compatible) for one URL at a time.
#[derive(Debug, Clone)]
pub struct Downloader {
    program: String,
    ffmpeg_location: Option<PathBuf>,
    audio_format: String,
    timeout: Duration,
    dir: PathBuf,
}

impl Downloader {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            program: settings.fetch.downloader.clone(),
            ffmpeg_location: settings.fetch.ffmpeg_location.clone(),
            audio_format: settings.fetch.audio_format.clone(),
            timeout: Duration::from_secs(settings.fetch.timeout_secs),
            dir: settings.download_dir(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Command-line arguments for downloading `url` as `<id>.<format>`.
    pub fn args(&self, id: &str, url: &str) -> Vec<String> {
        let template = self.dir.join(format!("{id}.%(ext)s"));

        let mut args = vec![
            "--no-playlist".to_string(),
            "-x".to_string(),
            "--audio-format".to_string(),
            self.audio_format.clone(),
        ];
        if let Some(ffmpeg) = &self.ffmpeg_location {
            args.push("--ffmpeg-location".to_string());
            args.push(ffmpeg.display().to_string());
        }
        args.extend([
            "--no-warnings".to_string(),
            "--newline".to_string(),
            "-o".to_string(),
            template.display().to_string(),
            url.to_string(),
        ]);
        args
    }

    /// Download `url` and build a track for the resulting file.
    ///
    /// Blocks until the downloader exits or the timeout elapses, in which
    /// case the child is killed. `on_progress` runs on a reader thread for
    /// every percentage found on stdout.
    pub fn fetch<F>(&self, url: &str, on_progress: F) -> Result<Track, FetchError>
    where
        F: FnMut(f32) + Send + 'static,
    {
        std::fs::create_dir_all(&self.dir)?;

        let id = TRACK_IDS.next_id();
        let expected = self.dir.join(format!("{id}.{}", self.audio_format));

        tracing::info!(url, id = %id, program = %self.program, "starting download");
        let mut child = Command::new(&self.program)
            .args(self.args(&id, url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FetchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout_reader = child.stdout.take().map(|out| {
            thread::spawn(move || forward_progress(out, on_progress))
        });
        if let Some(err) = child.stderr.take() {
            thread::spawn(move || log_stderr(err));
        }

        let status = self.wait_with_deadline(&mut child)?;
        if let Some(reader) = stdout_reader {
            let _ = reader.join();
        }

        tracing::info!(id = %id, ?status, "downloader exited");
        if !status.success() || !expected.is_file() {
            tracing::warn!(id = %id, expected = %expected.display(), "download failed");
            return Err(FetchError::Failed("Download failed".to_string()));
        }

        Ok(Track {
            title: format!("{REMOTE_ARTIST}-{id}"),
            artist: REMOTE_ARTIST.to_string(),
            duration_seconds: resolve_duration(&expected),
            source_uri: file_uri(&expected),
            thumbnail_uri: None,
            is_local: false,
            id,
        })
    }

    fn wait_with_deadline(&self, child: &mut Child) -> Result<ExitStatus, FetchError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                tracing::warn!(timeout = ?self.timeout, "download timed out, killing downloader");
                let _ = child.kill();
                let _ = child.wait();
                return Err(FetchError::Timeout);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

fn forward_progress<R: Read, F: FnMut(f32)>(out: R, mut on_progress: F) {
    for line in BufReader::new(out).lines().map_while(Result::ok) {
        tracing::trace!(line = %line, "downloader");
        if let Some(pct) = parse_progress(&line) {
            on_progress(pct);
        }
    }
}

fn log_stderr<R: Read>(err: R) {
    for line in BufReader::new(err).lines().map_while(Result::ok) {
        tracing::debug!(line = %line, "downloader stderr");
    }
}
