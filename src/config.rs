use std::path::PathBuf;

use crate::data::model::Layout;
use crate::output::Destination;

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Everything one run needs, fixed once the command line is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// CSV file holding the records.
    pub record_file: PathBuf,
    /// Plain-text file with one ID per line.
    pub filter_file: PathBuf,
    /// Output file; `None` writes to standard output.
    pub output: Option<PathBuf>,
    /// Zero-based column holding each record's ID.
    pub id_column: usize,
    /// Output columns; `None` emits records unchanged.
    pub layout: Option<Layout>,
}

impl Config {
    pub fn new(record_file: impl Into<PathBuf>, filter_file: impl Into<PathBuf>) -> Self {
        Config {
            record_file: record_file.into(),
            filter_file: filter_file.into(),
            output: None,
            id_column: 0,
            layout: None,
        }
    }

    pub fn destination(&self) -> Destination {
        Destination::from_path(self.output.as_deref())
    }
}
