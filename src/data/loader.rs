use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use super::model::{Record, RecordMap};
use crate::error::FilterError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load every record of a CSV file into a [`RecordMap`] keyed by the field
/// in `id_column`.
///
/// The file is read without a header row and records may differ in width.
/// Fields are taken byte for byte, whatever their encoding.  A record too
/// short to have an ID column aborts the load.
pub fn load_records(path: &Path, id_column: usize) -> Result<RecordMap> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening record file {}", path.display()))?;
    read_records(file, id_column)
        .with_context(|| format!("reading record file {}", path.display()))
}

/// Same as [`load_records`] for an already opened source.
pub fn read_records<R: io::Read>(mut source: R, id_column: usize) -> Result<RecordMap> {
    let mut data = Vec::new();
    source.read_to_end(&mut data)?;

    let mut reader = record_reader(data.as_slice());
    let mut map = RecordMap::new();
    let mut fields = csv::ByteRecord::new();
    let mut count: u64 = 0;
    // Byte offset just past the last record read.
    let mut end = 0;

    while reader.read_byte_record(&mut fields).context("parsing CSV")? {
        log_blank_lines(&data, end);
        end = reader.position().byte() as usize;

        count += 1;
        let Some(id) = fields.get(id_column) else {
            return Err(FilterError::MalformedRecord {
                record: count,
                fields: fields.len(),
                id_column,
            }
            .into());
        };
        let id = id.to_vec();
        debug!("Found record {}: {fields:?}", String::from_utf8_lossy(&id));
        map.insert(id, Record::new(fields.clone()));
    }
    log_blank_lines(&data, end);

    debug!(
        "{count} record(s) read, {} distinct ID(s), {} replaced",
        map.len(),
        map.replaced()
    );
    Ok(map)
}

// ---------------------------------------------------------------------------
// CSV dialect
// ---------------------------------------------------------------------------

/// Comma-separated, `"`-quoted with doubled quotes, no header, ragged rows.
fn record_reader<R: io::Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source)
}

// ---------------------------------------------------------------------------
// Blank lines
// ---------------------------------------------------------------------------

/// The CSV reader drops blank lines silently; report the ones between the
/// record ending at `from` and the next one.
fn log_blank_lines(data: &[u8], from: usize) {
    for _ in 0..blank_lines(data, from) {
        debug!("Empty line encountered!");
    }
}

/// Count the empty lines at `data[from..]`.
///
/// A record ended by `\r\n` stops after the `\r`, so a `\n` right behind
/// it is still part of that record's terminator.
fn blank_lines(data: &[u8], from: usize) -> usize {
    let gap = data.get(from..).unwrap_or_default();
    let run = gap
        .iter()
        .take_while(|&&b| b == b'\n' || b == b'\r')
        .count();
    let newlines = gap[..run].iter().filter(|&&b| b == b'\n').count();

    let split_crlf = from > 0 && data[from - 1] == b'\r' && gap.first() == Some(&b'\n');
    if split_crlf {
        newlines - 1
    } else {
        newlines
    }
}
