//! Command-line parsing.
//!
//! Usage:
//!   filter-records [OPTION...] RECORDFILE
//!
//! The parser never exits the process; errors (and the help/version
//! requests) come back as [`clap::Error`] for `main` to render.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::config::Config;
use crate::data::model::Layout;

#[derive(Debug, Parser)]
#[command(
    name = "filter-records",
    version,
    about = "Extracts records identified by a filter file from a record file",
    override_usage = "filter-records [OPTION...] RECORDFILE"
)]
pub struct Cli {
    /// Use this file to filter records by ID's.
    // Raw OS string: an empty value must reach `into_config`.
    #[arg(short, long = "filter", value_name = "FILE")]
    filter: Option<OsString>,

    /// Read the record ID from this column.
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    id_column: usize,

    /// Use this comma-separated list of column numbers to format the output.
    #[arg(short, long, value_name = "LIST", value_parser = parse_layout)]
    layout: Option<Layout>,

    /// Save the filtered records into this file.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// CSV file holding the records to filter.
    #[arg(value_name = "RECORDFILE")]
    record_files: Vec<PathBuf>,
}

fn parse_layout(s: &str) -> Result<Layout, crate::error::FilterError> {
    s.parse()
}

/// Parse `args` (program name first) into a [`Config`].
pub fn parse_args<I, T>(args: I) -> Result<Config, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)?.into_config()
}

impl Cli {
    /// Check what clap cannot express: exactly one record file and a
    /// non-empty filter file name.
    pub fn into_config(self) -> Result<Config, clap::Error> {
        let mut cmd = Cli::command();

        let mut record_files = self.record_files.into_iter();
        let record_file = match (record_files.next(), record_files.len()) {
            (Some(path), 0) => path,
            (None, _) => {
                return Err(cmd.error(
                    ErrorKind::MissingRequiredArgument,
                    "program takes exactly one record file; none specified.",
                ))
            }
            (Some(_), _) => {
                let ignored: Vec<String> = record_files
                    .map(|p| p.display().to_string())
                    .collect();
                return Err(cmd.error(
                    ErrorKind::TooManyValues,
                    format!(
                        "program takes exactly one record file; \"{}\" ignored.",
                        ignored.join("\", \"")
                    ),
                ));
            }
        };

        let filter_file = match self.filter {
            Some(name) if !name.is_empty() => PathBuf::from(name),
            _ => {
                return Err(cmd.error(
                    ErrorKind::MissingRequiredArgument,
                    "ID filter file name not specified!",
                ))
            }
        };

        Ok(Config {
            record_file,
            filter_file,
            output: self.output,
            id_column: self.id_column,
            layout: self.layout.filter(|layout| !layout.is_empty()),
        })
    }
}
