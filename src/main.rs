mod app;
mod audio;
mod config;
mod error;
mod fetch;
mod library;
mod logging;
mod playlist;
mod runtime;
mod selection;
mod store;
mod tracker;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
