use anyhow::Context;

use crate::app::{App, PendingDuration};
use crate::audio::RodioOutput;
use crate::config;
use crate::library::uri_to_path;
use crate::playlist::Playlist;
use crate::store::FileStore;

/// Open the store and the audio device and restore the last session.
pub fn open_session(settings: &config::Settings) -> anyhow::Result<App<RodioOutput>> {
    let data_dir = settings.data_dir();
    let store = FileStore::open(&data_dir)
        .with_context(|| format!("cannot open data directory {}", data_dir.display()))?;
    let output = RodioOutput::open_default().context("cannot open audio output")?;

    Ok(App::restore(output, Box::new(store), &settings.player))
}

/// Local tracks restored without a duration, to be resolved in the
/// background.
pub fn unresolved_durations(playlist: &Playlist) -> Vec<PendingDuration> {
    playlist
        .tracks()
        .iter()
        .filter(|t| t.is_local && t.known_duration().is_none())
        .filter_map(|t| {
            uri_to_path(&t.source_uri).map(|path| PendingDuration {
                id: t.id.clone(),
                path,
            })
        })
        .collect()
}
