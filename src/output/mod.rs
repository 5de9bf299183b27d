pub mod snapshot;

pub use snapshot::{Overview, StatsSnapshot, save_snapshot};
