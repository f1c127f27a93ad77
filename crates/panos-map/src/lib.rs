//! Long-name to variable-name mapping for PAN-OS syslog format strings.
//!
//! - [`derive_variable_name`] reads the short name out of a `Field Name` cell.
//! - [`build_name_map`] turns a corrected field table into a [`NameMap`].
//! - [`transform_format_string`] rewrites a format string into variable-name tokens.

pub mod derive;
pub mod name_map;
pub mod transform;
pub mod utils;

pub use derive::{derive_variable_name, long_name, parenthetical_long_name};
pub use name_map::{NameMap, build_name_map};
pub use transform::{device_group_level_token, transform_format_string};
pub use utils::normalize_whitespace;
