//! Player settings: `[player]` startup volume and modes, `[storage]` data
//! directory, `[fetch]` downloader, `[library]` accepted files and
//! `[logging]`.
//!
//! Values come from struct defaults, then `config.toml`, then `MELODY__*`
//! environment variables.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
