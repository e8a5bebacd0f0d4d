use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const LOCAL_ARTIST: &str = "Local File";

/// One playable item. Field names on disk match the layout older saves use
/// (`url`, `duration`, `thumbnail`, `local`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(default = "unknown_title")]
    pub title: String,
    #[serde(default = "unknown_artist")]
    pub artist: String,
    /// Unknown until metadata has been read. Filled in place later.
    #[serde(rename = "duration", default)]
    pub duration_seconds: Option<f64>,
    #[serde(rename = "url")]
    pub source_uri: String,
    #[serde(
        rename = "thumbnail",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail_uri: Option<String>,
    #[serde(rename = "local", default)]
    pub is_local: bool,
}

fn unknown_title() -> String {
    UNKNOWN_TITLE.to_string()
}

fn unknown_artist() -> String {
    UNKNOWN_ARTIST.to_string()
}

impl Track {
    /// Duration if it is known and usable for seeking (finite and positive).
    pub fn known_duration(&self) -> Option<f64> {
        self.duration_seconds.filter(|d| d.is_finite() && *d > 0.0)
    }
}

/// Time-based id generator. Ids are epoch milliseconds, bumped by one when
/// two ids are requested within the same millisecond, so they never collide
/// within a process.
#[derive(Debug, Default)]
pub struct TrackIdGen {
    last: AtomicU64,
}

impl TrackIdGen {
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    pub fn next_id(&self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last
                .compare_exchange(prev, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return candidate.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Process-wide generator shared by local imports and the fetch adapter.
pub static TRACK_IDS: TrackIdGen = TrackIdGen::new();
