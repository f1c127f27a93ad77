pub mod document;
pub mod error;
pub mod fetch;
pub mod format;
pub mod table;
pub mod text;

pub use document::{DocNode, HtmlNode};
pub use error::{IngestError, Result};
pub use fetch::{FetchSettings, HttpPageSource, PageSource};
pub use format::extract_format_string;
pub use table::{extract_field_table, header_mentions_field, row_has_enough_cells};
pub use text::{cell_text, collapse_whitespace};
