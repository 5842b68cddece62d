//! # filter-records
//!
//! Extracts the records named by an ID filter file from a CSV record file.
//!
//! The record file is loaded into memory keyed by one of its columns; the
//! filter file is then streamed line by line and every ID found in the map
//! yields its record, optionally reshaped by a column layout.  Output rows
//! follow the order of the filter file.
//!
//! ```
//! use filter_records::data::filter::FilteredRecords;
//! use filter_records::data::loader::read_records;
//! use filter_records::data::model::Layout;
//!
//! let records = read_records("A,1,x\nB,2\n".as_bytes(), 0).unwrap();
//! let layout: Layout = "2,0".parse().unwrap();
//!
//! let rows: Vec<Vec<&[u8]>> = FilteredRecords::new(&records, "B\nA\n".as_bytes(), Some(&layout))
//!     .map(|row| row.unwrap().collect())
//!     .collect();
//!
//! assert_eq!(rows, [vec![&b"B"[..]], vec![&b"x"[..], &b"A"[..]]]);
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod output;

pub use app::{RunSummary, run, run_to};
pub use cli::parse_args;
pub use config::Config;
pub use error::FilterError;
