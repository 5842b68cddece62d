use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// Destination
// ---------------------------------------------------------------------------

/// Where filtered records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Destination::File(p.to_path_buf()),
            None => Destination::Stdout,
        }
    }
}

/// Open a CSV writer on `dest`.
///
/// A file is created or truncated and is closed when the writer drops,
/// whatever path the caller leaves by.  Standard output is only locked.
pub fn open_writer(dest: &Destination) -> Result<csv::Writer<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match dest {
        Destination::Stdout => Box::new(io::stdout().lock()),
        Destination::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
    };
    Ok(record_writer(sink))
}

/// Same dialect as the record file: minimal quoting, `\n` terminated,
/// rows of any width.
pub fn record_writer<W: Write>(sink: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink)
}

// ---------------------------------------------------------------------------
// Row serialisation
// ---------------------------------------------------------------------------

/// Write one CSV record per row and flush.  Returns the number of rows
/// written.  The first failing row aborts the write.
///
/// A row without fields becomes an empty line.
pub fn write_rows<W, I, F, T>(writer: &mut csv::Writer<W>, rows: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = io::Result<F>>,
    F: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut written = 0;
    for row in rows {
        let mut fields = row.context("reading ID filter")?.into_iter().peekable();
        if fields.peek().is_some() {
            writer.write_record(fields).context("writing filtered record")?;
        } else {
            write_empty_row(writer).context("writing filtered record")?;
        }
        written += 1;
    }
    writer.flush().context("flushing filtered records")?;
    Ok(written)
}

/// The CSV writer renders a record with no fields as `""`, which reads back
/// as one empty field; write the bare terminator instead.
fn write_empty_row<W: Write>(writer: &mut csv::Writer<W>) -> io::Result<()> {
    writer.flush()?;
    writer.get_mut().write_all(b"\n")
}
