//! Favorites and recently-played bookkeeping.
//!
//! Both aggregates are persisted on their own keys and are independent of
//! the playlist: favorites are plain ids, history entries are snapshots, so
//! removing a track from the playlist leaves both untouched.

mod favorites;
mod history;

pub use favorites::FavoriteSet;
pub use history::{RECENT_CARDS, RECENT_LIMIT, RecentCard, RecentlyPlayed};
