use super::model::{Track, UNKNOWN_ARTIST, UNKNOWN_TITLE};

/// Format seconds as `m:ss`. Unknown, zero, NaN and infinite values render
/// as `0:00`.
pub fn format_time(seconds: Option<f64>) -> String {
    let secs = match seconds {
        Some(s) if s.is_finite() && s > 0.0 => s as u64,
        _ => return "0:00".to_string(),
    };
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Build the one-line label for a track: `Artist - Title`, falling back to
/// placeholders for blank fields.
pub fn track_label(track: &Track) -> String {
    let title = non_blank(&track.title).unwrap_or(UNKNOWN_TITLE);
    let artist = non_blank(&track.artist).unwrap_or(UNKNOWN_ARTIST);
    format!("{artist} - {title}")
}

/// Build a playlist row: 1-based position, label, duration and a favorite
/// marker.
pub fn playlist_row(position: usize, track: &Track, favorite: bool, playing: bool) -> String {
    let marker = if playing { '>' } else { ' ' };
    let heart = if favorite { "♥" } else { "♡" };
    format!(
        "{marker}{:>3}. {}  [{}] {heart}",
        position + 1,
        track_label(track),
        format_time(track.duration_seconds),
    )
}

fn non_blank(s: &str) -> Option<&str> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s) }
}
