use thiserror::Error;

/// Domain errors raised while loading records or parsing a layout.
///
/// I/O failures are not listed here; they travel as `anyhow::Error` with the
/// offending path attached as context.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A record is too short to carry an ID in the configured column.
    #[error("record {record} has {fields} field(s), no ID in column {id_column}")]
    MalformedRecord {
        /// 1-based position of the record in the record file.
        record: u64,
        fields: usize,
        id_column: usize,
    },

    #[error("invalid layout column '{0}': expected a non-negative integer")]
    InvalidLayout(String),
}
