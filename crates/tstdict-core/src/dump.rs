//! Human-readable rendering of a compiled dictionary

use crate::reader::{DictReader, Record};
use crate::{Result, RECORD_FIELDS};

/// Render one line per record, in buffer order:
///
/// ```text
/// [0] { ch: c, l: 0, c: 10, r: 5, f: 0}
/// ```
///
/// Positions are 32-bit word indices of record starts; a missing child is `0`.
pub fn render(reader: &DictReader) -> Result<String> {
    let mut out = String::with_capacity(reader.len() * 40);
    for record in reader.records() {
        out.push_str(&render_record(&record?));
        out.push('\n');
    }
    Ok(out)
}

fn position(child: Option<usize>) -> usize {
    child.map_or(0, |index| index * RECORD_FIELDS)
}

/// Render a single record
pub fn render_record(record: &Record) -> String {
    format!(
        "[{}] {{ ch: {}, l: {}, c: {}, r: {}, f: {}}}",
        record.word_index(),
        record.ch,
        position(record.left),
        position(record.center),
        position(record.right),
        record.frequency
    )
}
