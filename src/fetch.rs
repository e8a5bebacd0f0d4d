//! Remote fetch: runs the external downloader and turns its output file into
//! a track.
//!
//! The controller never calls this directly. The runtime runs
//! [`Downloader::fetch`] on a worker thread and hands the result back as a
//! message.

mod download;
mod progress;

pub use download::Downloader;
pub use progress::parse_progress;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cannot start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Failed(String),

    #[error("Download timeout")]
    Timeout,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
