pub mod settings;

pub use settings::{AppConfig, ExtractorSettings};
