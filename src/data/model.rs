use std::collections::HashMap;
use std::fmt;
use std::slice;
use std::str::FromStr;

use crate::error::FilterError;

// ---------------------------------------------------------------------------
// Record – one parsed row of the record file
// ---------------------------------------------------------------------------

/// An ordered sequence of fields parsed from one CSV record.
///
/// Fields are kept as raw bytes so input in any encoding passes through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record(csv::ByteRecord);

impl Record {
    pub fn new(fields: csv::ByteRecord) -> Self {
        Record(fields)
    }

    /// Field at `column`, or `None` past the end of this record.
    pub fn get(&self, column: usize) -> Option<&[u8]> {
        self.0.get(column)
    }

    pub fn iter(&self) -> csv::ByteRecordIter<'_> {
        self.0.iter()
    }
}

impl<'a, T: AsRef<[u8]>> From<&'a [T]> for Record {
    fn from(fields: &'a [T]) -> Self {
        let mut record = csv::ByteRecord::new();
        for field in fields {
            record.push_field(field.as_ref());
        }
        Record(record)
    }
}

// ---------------------------------------------------------------------------
// RecordMap – identifier → record
// ---------------------------------------------------------------------------

/// All records of the record file keyed by identifier.
///
/// Built once by the loader and only read afterwards.  A later record with
/// the same identifier replaces the earlier one.
#[derive(Debug, Default)]
pub struct RecordMap {
    records: HashMap<Vec<u8>, Record>,
    /// Rows that replaced an earlier row with the same identifier.
    replaced: usize,
}

impl RecordMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` under `id`, returning the record it replaced.
    pub fn insert(&mut self, id: Vec<u8>, record: Record) -> Option<Record> {
        let previous = self.records.insert(id, record);
        if previous.is_some() {
            self.replaced += 1;
        }
        previous
    }

    pub fn get(&self, id: &[u8]) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &[u8]) -> bool {
        self.records.contains_key(id)
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// How many inserts overwrote an existing identifier.
    pub fn replaced(&self) -> usize {
        self.replaced
    }
}

// ---------------------------------------------------------------------------
// Layout – which columns to emit, and in what order
// ---------------------------------------------------------------------------

/// Output column indices, e.g. `2,0,1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout(Vec<usize>);

impl Layout {
    pub fn new(columns: Vec<usize>) -> Self {
        Layout(columns)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Project `record` through this layout.
    ///
    /// Columns past the end of `record` are dropped, not padded, so the
    /// projected width depends on the record.
    pub fn project<'a>(&'a self, record: &'a Record) -> Fields<'a> {
        Fields::Projected {
            record,
            columns: self.0.iter(),
        }
    }
}

impl FromStr for Layout {
    type Err = FilterError;

    /// Parse a comma-separated column list.  An empty string is an empty
    /// layout.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Layout::default());
        }
        s.split(',')
            .map(|tok| {
                tok.trim()
                    .parse::<usize>()
                    .map_err(|_| FilterError::InvalidLayout(tok.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Layout)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, col) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{col}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fields – lazy view of one output row
// ---------------------------------------------------------------------------

/// The fields of one output row, borrowed from a record in the map.
pub enum Fields<'a> {
    /// Every field of the record, in order.
    Full(csv::ByteRecordIter<'a>),
    /// Only the layout columns the record actually has.
    Projected {
        record: &'a Record,
        columns: slice::Iter<'a, usize>,
    },
}

impl<'a> Fields<'a> {
    pub fn full(record: &'a Record) -> Self {
        Fields::Full(record.iter())
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Fields::Full(iter) => iter.next(),
            Fields::Projected { record, columns } => {
                let record = *record;
                columns.find_map(|&col| record.get(col))
            }
        }
    }
}
