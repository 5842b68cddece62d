use std::fs::File;
use std::io::{BufReader, Write};

use anyhow::Result;
use log::info;

use crate::config::Config;
use crate::data::filter::{FilteredRecords, open_filter};
use crate::data::loader::load_records;
use crate::output::{open_writer, record_writer, write_rows};

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Counters gathered over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Distinct IDs in the record map.
    pub records_loaded: usize,
    /// Record rows that overwrote an earlier row with the same ID.
    pub duplicates: usize,
    /// Lines read from the ID filter file.
    pub ids_read: usize,
    pub rows_written: usize,
    /// Filter IDs with no matching record.
    pub unknown_ids: usize,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Filter the record file as `config` says, writing to its destination.
pub fn run(config: &Config) -> Result<RunSummary> {
    execute(config, |filtered| {
        let mut writer = open_writer(&config.destination())?;
        write_rows(&mut writer, filtered)
    })
}

/// Like [`run`] but writes to `sink` whatever the configured destination.
pub fn run_to<W: Write>(config: &Config, sink: W) -> Result<RunSummary> {
    execute(config, |filtered| {
        let mut writer = record_writer(sink);
        write_rows(&mut writer, filtered)
    })
}

fn execute<F>(config: &Config, write: F) -> Result<RunSummary>
where
    F: FnOnce(&mut FilteredRecords<'_, BufReader<File>>) -> Result<usize>,
{
    info!("Reading record file {}...", config.record_file.display());
    let map = load_records(&config.record_file, config.id_column)?;

    info!(
        "Finished reading record file {}, generating filtered list from ID filter file {}...",
        config.record_file.display(),
        config.filter_file.display()
    );
    let filter = open_filter(&config.filter_file)?;
    let mut filtered = FilteredRecords::new(&map, filter, config.layout.as_ref());
    let rows_written = write(&mut filtered)?;

    let summary = RunSummary {
        records_loaded: map.len(),
        duplicates: map.replaced(),
        ids_read: filtered.ids_read(),
        rows_written,
        unknown_ids: filtered.unknown(),
    };
    info!(
        "Done! {} record(s) written, {} unknown ID(s) skipped.",
        summary.rows_written, summary.unknown_ids
    );
    Ok(summary)
}
