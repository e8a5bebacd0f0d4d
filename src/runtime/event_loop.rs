use std::io::BufRead;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::app::{App, PendingDuration};
use crate::audio::OutputHandle;
use crate::config;
use crate::fetch::{Downloader, FetchError};
use crate::library::{Track, resolve_duration};

use super::commands::{self, Command, HELP};
use super::render;

/// Everything the control thread reacts to. Other threads only ever talk to
/// the session through these.
#[derive(Debug)]
pub enum ControlMsg {
    Command(Command),
    DownloadProgress(f32),
    Fetched(Result<Track, FetchError>),
    DurationResolved { id: String, seconds: f64 },
    /// stdin reached end of file.
    InputClosed,
}

/// Read commands from stdin on a background thread.
pub fn spawn_input_reader(tx: mpsc::Sender<ControlMsg>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed");
                    break;
                }
            };
            match commands::parse(&line) {
                Ok(Some(cmd)) => {
                    if tx.send(ControlMsg::Command(cmd)).is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(msg) => eprintln!("{msg}"),
            }
        }
        let _ = tx.send(ControlMsg::InputClosed);
    });
}

pub fn spawn_duration_workers(pending: Vec<PendingDuration>, tx: &mpsc::Sender<ControlMsg>) {
    if pending.is_empty() {
        return;
    }
    let tx = tx.clone();
    thread::spawn(move || {
        for PendingDuration { id, path } in pending {
            if let Some(seconds) = resolve_duration(&path) {
                if tx.send(ControlMsg::DurationResolved { id, seconds }).is_err() {
                    return;
                }
            }
        }
    });
}

fn spawn_fetch(downloader: Downloader, url: String, tx: &mpsc::Sender<ControlMsg>) {
    let tx = tx.clone();
    thread::spawn(move || {
        let progress_tx = tx.clone();
        let result = downloader.fetch(&url, move |pct| {
            let _ = progress_tx.send(ControlMsg::DownloadProgress(pct));
        });
        let _ = tx.send(ControlMsg::Fetched(result));
    });
}

/// The control loop. Owns the session until `quit` or end of input.
pub fn run<O: OutputHandle>(
    app: &mut App<O>,
    settings: &config::Settings,
    downloader: &Downloader,
    tx: &mpsc::Sender<ControlMsg>,
    rx: &mpsc::Receiver<ControlMsg>,
) -> anyhow::Result<()> {
    let notices = app.subscribe();
    let tick = Duration::from_millis(settings.player.tick_ms);

    loop {
        match rx.recv_timeout(tick) {
            Ok(msg) => {
                if handle_msg(msg, app, settings, downloader, tx) {
                    tracing::info!("shutting down");
                    return Ok(());
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }

        app.poll_output();

        for notice in notices.try_iter() {
            if let Some(line) = render::notice_line(&notice) {
                println!("{line}");
            }
        }
    }
}

/// Apply one message. Returns `true` when the session should end.
fn handle_msg<O: OutputHandle>(
    msg: ControlMsg,
    app: &mut App<O>,
    settings: &config::Settings,
    downloader: &Downloader,
    tx: &mpsc::Sender<ControlMsg>,
) -> bool {
    match msg {
        ControlMsg::Command(cmd) => return handle_command(cmd, app, settings, downloader, tx),
        ControlMsg::DownloadProgress(pct) => app.on_download_progress(pct),
        ControlMsg::Fetched(result) => app.handle_fetch_result(result),
        ControlMsg::DurationResolved { id, seconds } => app.apply_duration(&id, seconds),
        ControlMsg::InputClosed => return true,
    }
    false
}

fn handle_command<O: OutputHandle>(
    cmd: Command,
    app: &mut App<O>,
    settings: &config::Settings,
    downloader: &Downloader,
    tx: &mpsc::Sender<ControlMsg>,
) -> bool {
    tracing::debug!(?cmd, "command");
    match cmd {
        Command::Add(path) => {
            let pending = app.add_local(&path, &settings.library);
            spawn_duration_workers(pending.into_iter().collect(), tx);
        }
        Command::AddDir(dir) => {
            let pending = app.add_dir(&dir, &settings.library);
            spawn_duration_workers(pending, tx);
        }
        Command::Fetch(url) => {
            if let Some(url) = app.prepare_fetch(&url) {
                spawn_fetch(downloader.clone(), url, tx);
            }
        }
        Command::Play(index) => app.play_song(index),
        Command::Toggle => app.toggle_play(),
        Command::Next => app.next(),
        Command::Prev => app.previous(),
        Command::Seek(fraction) => app.seek(fraction),
        Command::Volume(level) => app.set_volume(level),
        Command::Mute => app.toggle_mute(),
        Command::Shuffle => app.toggle_shuffle(),
        Command::Repeat => app.toggle_repeat(),
        Command::Favorite(index) => {
            let id = app.playlist().get(index).map(|t| t.id.clone());
            if let Some(id) = id {
                app.toggle_favorite(&id);
            }
        }
        Command::Remove(index) => app.remove(index),
        Command::Move { from, to } => app.move_track(from, to),
        Command::List => render::playlist_lines(app)
            .iter()
            .for_each(|l| println!("{l}")),
        Command::Recent => render::recent_lines(app)
            .iter()
            .for_each(|l| println!("{l}")),
        Command::Help => println!("{HELP}"),
        Command::Quit => return true,
    }
    false
}
