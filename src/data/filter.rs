use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};

use super::model::{Fields, Layout, RecordMap};

// ---------------------------------------------------------------------------
// Filter source
// ---------------------------------------------------------------------------

/// Open an ID filter file for line-by-line reading.
pub fn open_filter(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)
        .with_context(|| format!("opening ID filter file {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Strip a trailing `\n` or `\r\n`.
fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

// ---------------------------------------------------------------------------
// FilteredRecords – the join between filter list and record map
// ---------------------------------------------------------------------------

/// Output rows for the IDs of a filter source, in filter order.
///
/// Every line of the source is one ID, line terminator removed, compared
/// byte for byte.  IDs with no record are logged and skipped; that includes
/// the empty ID of a blank line.  Each yielded row borrows its fields from
/// `map`.
pub struct FilteredRecords<'a, R> {
    map: &'a RecordMap,
    layout: Option<&'a Layout>,
    source: R,
    line: Vec<u8>,
    ids_read: usize,
    matched: usize,
    unknown: usize,
}

impl<'a, R: BufRead> FilteredRecords<'a, R> {
    pub fn new(map: &'a RecordMap, filter: R, layout: Option<&'a Layout>) -> Self {
        if let Some(layout) = layout {
            debug!("output layout: {layout}");
        }
        Self {
            map,
            layout,
            source: filter,
            line: Vec::new(),
            ids_read: 0,
            matched: 0,
            unknown: 0,
        }
    }

    /// IDs consumed from the filter source so far.
    pub fn ids_read(&self) -> usize {
        self.ids_read
    }

    /// IDs that produced an output row.
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// IDs skipped because no record carries them.
    pub fn unknown(&self) -> usize {
        self.unknown
    }
}

impl<'a, R: BufRead> Iterator for FilteredRecords<'a, R> {
    type Item = io::Result<Fields<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.source.read_until(b'\n', &mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            self.ids_read += 1;

            let id = trim_line_end(&self.line);
            let map = self.map;
            let Some(record) = map.get(id) else {
                self.unknown += 1;
                warn!(
                    "Unknown record {} encountered, skipping...",
                    String::from_utf8_lossy(id)
                );
                continue;
            };

            self.matched += 1;
            let fields = match self.layout {
                Some(layout) => {
                    debug!(
                        "custom output layout for record {}: {layout}",
                        String::from_utf8_lossy(id)
                    );
                    layout.project(record)
                }
                None => Fields::full(record),
            };
            return Some(Ok(fields));
        }
    }
}
