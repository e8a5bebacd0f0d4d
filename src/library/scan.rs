use std::path::{Path, PathBuf};

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::{PlayerError, Result};

use super::model::{LOCAL_ARTIST, TRACK_IDS, Track};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// Turn a filesystem path into the `file://` URI stored on tracks.
///
/// Each segment is percent-encoded so [`uri_to_path`] gives the same path
/// back. A leading drive letter (`C:`) is kept as is.
pub fn file_uri(path: &Path) -> String {
    let raw = path.display().to_string().replace('\\', "/");
    let encoded: Vec<String> = raw
        .split('/')
        .enumerate()
        .map(|(i, segment)| {
            if i == 0 && is_drive(segment) {
                segment.to_string()
            } else {
                urlencoding::encode(segment).into_owned()
            }
        })
        .collect();
    format!("file://{}", encoded.join("/"))
}

fn is_drive(segment: &str) -> bool {
    let b = segment.as_bytes();
    b.len() == 2 && b[0].is_ascii_alphabetic() && b[1] == b':'
}

/// Resolve a track URI back to a local path.
///
/// `file://` URIs are percent-decoded; strings without a scheme are taken as
/// plain paths. Any other scheme yields `None`.
pub fn uri_to_path(uri: &str) -> Option<PathBuf> {
    if let Some(rest) = uri.strip_prefix("file://") {
        let decoded = urlencoding::decode(rest).ok()?;
        return Some(PathBuf::from(decoded.into_owned()));
    }
    if uri.contains("://") {
        return None;
    }
    Some(PathBuf::from(uri))
}

/// Build a local track for a picked file. Title is the file name without its
/// extension; duration is left unknown for [`resolve_duration`] to fill.
pub fn local_track(path: &Path, settings: &LibrarySettings) -> Result<Track> {
    if !path.is_file() {
        return Err(PlayerError::Validation(format!(
            "File not found: {}",
            path.display()
        )));
    }
    if !is_audio_file(path, settings) {
        return Err(PlayerError::Validation(format!(
            "Not an audio file: {}",
            path.display()
        )));
    }

    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("Local File")
        .to_string();

    Ok(Track {
        id: TRACK_IDS.next_id(),
        title,
        artist: LOCAL_ARTIST.to_string(),
        duration_seconds: None,
        source_uri: file_uri(path),
        thumbnail_uri: None,
        is_local: true,
    })
}

/// Read the audio properties of `path` and return its duration in seconds.
///
/// Returns `None` for unreadable files and zero-length results.
pub fn resolve_duration(path: &Path) -> Option<f64> {
    match lofty::read_from_path(path) {
        Ok(tagged) => {
            let secs = tagged.properties().duration().as_secs_f64();
            (secs > 0.0).then_some(secs)
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "could not read audio properties");
            None
        }
    }
}

/// Collect every audio file under `dir`, in a stable file-name order.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();
    if !settings.recursive {
        walker = walker.max_depth(1);
    }

    walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_audio_file(p, settings))
        .collect()
}
