//! Plain-text rendering of notices and listings for the terminal.

use crate::app::{App, Notice, PlaybackState};
use crate::audio::OutputHandle;
use crate::error::NotificationKind;
use crate::library::{format_time, playlist_row, track_label};
use crate::tracker::RECENT_CARDS;

/// One line for `notice`, or `None` for notices too chatty to print.
pub fn notice_line(notice: &Notice) -> Option<String> {
    let line = match notice {
        Notice::NowPlaying(Some((index, track))) => {
            format!("now playing {}: {}", index + 1, track_label(track))
        }
        Notice::NowPlaying(None) => "nothing playing".to_string(),
        Notice::State(state) => format!("[{}]", state_label(*state)),
        Notice::TotalTime(secs) => format!("length {}", format_time(Some(*secs))),
        Notice::FavoriteChanged { favorite, .. } => {
            if *favorite {
                "added to favorites".to_string()
            } else {
                "removed from favorites".to_string()
            }
        }
        Notice::Modes { shuffle, repeat } => format!(
            "shuffle {}, repeat {}",
            on_off(*shuffle),
            on_off(*repeat)
        ),
        Notice::Volume { level, muted } => {
            if *muted {
                "muted".to_string()
            } else {
                format!("volume {}%", (level * 100.0).round() as u32)
            }
        }
        Notice::DownloadProgress(pct) => format!("downloading {pct:.1}%"),
        Notice::Notification(n) => match n.kind {
            NotificationKind::Success => format!("ok: {}", n.message),
            NotificationKind::Error => format!("error: {}", n.message),
        },
        Notice::Progress { .. } | Notice::PlaylistChanged | Notice::RecentlyPlayedChanged => {
            return None;
        }
    };
    Some(line)
}

fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "idle",
        PlaybackState::Paused => "paused",
        PlaybackState::Playing => "playing",
        PlaybackState::Error => "error",
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// Status header followed by one row per playlist entry.
pub fn playlist_lines<O: OutputHandle>(app: &App<O>) -> Vec<String> {
    let mut lines = vec![format!(
        "[{}] {} / {}  shuffle {} repeat {}",
        state_label(app.state()),
        format_time(Some(app.position())),
        format_time(app.duration()),
        on_off(app.shuffle()),
        on_off(app.repeat()),
    )];

    let playlist = app.playlist();
    if playlist.is_empty() {
        lines.push("No songs in playlist".to_string());
    }
    for (i, track) in playlist.tracks().iter().enumerate() {
        lines.push(playlist_row(
            i,
            track,
            app.is_favorite(&track.id),
            playlist.current() == Some(i),
        ));
    }
    lines
}

pub fn recent_lines<O: OutputHandle>(app: &App<O>) -> Vec<String> {
    let cards = app.recent_cards(RECENT_CARDS);
    if cards.is_empty() {
        return vec!["No recently played songs".to_string()];
    }
    cards
        .iter()
        .map(|card| match card.playlist_index {
            Some(i) => format!("  {}  (row {})", track_label(card.track), i + 1),
            None => format!("  {}  (removed)", track_label(card.track)),
        })
        .collect()
}
