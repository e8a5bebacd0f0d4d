//! Track model and everything needed to turn files on disk into tracks.
//!
//! `model` holds the `Track` type and its id generator, `scan` imports local
//! files (single files or whole folders) and resolves their duration, and
//! `display` has the small formatting helpers used by observers.

mod display;
mod model;
mod scan;

pub use display::*;
pub use model::*;
pub use scan::*;
