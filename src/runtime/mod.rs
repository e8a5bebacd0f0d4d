use std::sync::mpsc;

use crate::fetch::Downloader;
use crate::logging;

mod commands;
mod event_loop;
mod render;
mod settings;
mod startup;

use event_loop::ControlMsg;

pub fn run() -> anyhow::Result<()> {
    let (settings, fallback) = settings::load_settings();

    logging::init_logging(&settings.log_dir(), &settings.logging.filter)?;
    if let Some(reason) = fallback {
        tracing::warn!("{reason}");
        eprintln!("melody: {reason}");
    }

    let mut app = startup::open_session(&settings)?;
    let downloader = Downloader::from_settings(&settings);

    let (tx, rx) = mpsc::channel::<ControlMsg>();
    event_loop::spawn_duration_workers(startup::unresolved_durations(app.playlist()), &tx);
    event_loop::spawn_input_reader(tx.clone());

    println!(
        "melody: {} songs in playlist, type `help` for commands",
        app.playlist().len()
    );

    event_loop::run(&mut app, &settings, &downloader, &tx, &rx)
}
