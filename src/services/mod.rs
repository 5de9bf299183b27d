pub mod extraction;

pub use extraction::{ExtractRequest, ExtractionService};
