use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/melody/config.toml` or `~/.config/melody/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MELODY__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub storage: StorageSettings,
    pub fetch: FetchSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Volume applied at startup, in `[0, 1]`. Not persisted between runs.
    pub volume: f32,
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Whether repeat-current-track starts enabled.
    pub repeat: bool,
    /// How often the control loop polls the output for progress and
    /// end-of-track (milliseconds).
    pub tick_ms: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            volume: 0.7,
            shuffle: false,
            repeat: false,
            tick_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding `playlist.json`, `favorites.json` and
    /// `recentlyPlayed.json`. Defaults to the XDG data dir.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Downloader executable (looked up on `PATH` when not absolute).
    pub downloader: String,
    /// Passed as `--ffmpeg-location` when set.
    pub ffmpeg_location: Option<PathBuf>,
    /// Hard limit for one fetch; the downloader is killed afterwards.
    pub timeout_secs: u64,
    /// Where downloaded files land. Defaults to `~/Music/Melody Downloads`.
    pub download_dir: Option<PathBuf>,
    /// Audio format requested from the downloader.
    pub audio_format: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            downloader: "yt-dlp".to_string(),
            ffmpeg_location: None,
            timeout_secs: 120,
            download_dir: None,
            audio_format: "mp3".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks when importing a folder.
    pub follow_links: bool,
    /// Whether folder import recurses into subdirectories.
    pub recursive: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: ["mp3", "wav", "m4a", "flac", "ogg", "aac"]
                .into_iter()
                .map(String::from)
                .collect(),
            follow_links: true,
            recursive: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log directory. Defaults to `<data dir>/logs`.
    pub dir: Option<PathBuf>,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            dir: None,
            filter: "melody=info,warn".to_string(),
        }
    }
}
