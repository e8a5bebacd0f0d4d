//! Sound output: the handle trait the controller drives and its `rodio`
//! implementation.

mod player;
mod sink;
mod types;

pub use player::RodioOutput;
pub use types::*;

#[cfg(test)]
mod tests;
