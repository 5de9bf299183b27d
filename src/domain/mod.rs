pub mod models;
pub mod playlist;
pub mod tiers;

pub use models::*;
pub use playlist::Playlist;
