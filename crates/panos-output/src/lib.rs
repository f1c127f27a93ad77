//! Artifact persistence for scraped documentation versions.
//!
//! Each version directory holds, per log type, `<name>_fields.csv` and
//! `<name>_format.csv`, plus one consolidated `panos_syslog_fields.csv`.

pub mod artifacts;
pub mod error;
pub mod layout;
pub mod matrix;

pub use artifacts::{
    read_transformed_tokens, render_token_line, write_field_table, write_format_artifact,
};
pub use error::{OutputError, Result};
pub use layout::{MATRIX_FILE_NAME, VersionLayout};
pub use matrix::{Matrix, build_matrix, display_name, write_matrix};
