pub mod page_text;

pub use page_text::{flatten_document, flatten_html};
