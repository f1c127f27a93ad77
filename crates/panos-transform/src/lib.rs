//! Correction layers applied around the name-map transform.
//!
//! Table-level corrections run on the extracted field table before the name
//! map is built; per-log corrections run on the transformed token list.
//! Name-map and token-level corrections live in `panos-map`.

pub mod per_log;
pub mod table;

pub use per_log::{apply_per_log_corrections, strip_leading_future_use};
pub use table::apply_field_table_corrections;
