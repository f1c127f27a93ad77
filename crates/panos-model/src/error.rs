use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("row has {found} cells but the table has {expected} columns")]
    RowWidth { expected: usize, found: usize },
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("column {column} expects {expected} values, got {found}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("malformed correction: {0}")]
    MalformedCorrection(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
