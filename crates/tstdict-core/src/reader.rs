//! Reading a compiled dictionary back
//!
//! Used to verify emitted buffers: it walks records by following the stored
//! child offsets from byte 0, exactly as an embedded consumer would.

use crate::{CoreError, Result, RECORD_FIELDS, RECORD_SIZE};
use bytes::{Buf, Bytes};

/// A decoded record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record {
    /// Record index (byte offset / record size)
    pub index: usize,
    /// Character at this position
    pub ch: char,
    /// Record index of the lower sibling
    pub left: Option<usize>,
    /// Record index of the next character
    pub center: Option<usize>,
    /// Record index of the higher sibling
    pub right: Option<usize>,
    /// Non-zero when a word ends here
    pub frequency: u32,
}

impl Record {
    /// Index of this record's first 32-bit word
    pub fn word_index(&self) -> usize {
        self.index * RECORD_FIELDS
    }
}

/// Read-only view over a compiled dictionary buffer
#[derive(Clone, Debug)]
pub struct DictReader {
    data: Bytes,
}

impl DictReader {
    /// Wrap a buffer, checking it holds whole records
    pub fn new(data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        if data.is_empty() || data.len() % RECORD_SIZE != 0 {
            return Err(CoreError::Corrupt(format!(
                "length {} is not a positive multiple of {}",
                data.len(),
                RECORD_SIZE
            )));
        }
        Ok(Self { data })
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.data.len() / RECORD_SIZE
    }

    /// Always false; empty buffers are rejected by [`DictReader::new`]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decode the record at `index`
    pub fn record(&self, index: usize) -> Result<Record> {
        if index >= self.len() {
            return Err(CoreError::Corrupt(format!("record {index} out of range")));
        }
        let mut buf = &self.data[index * RECORD_SIZE..(index + 1) * RECORD_SIZE];

        let code = buf.get_i32_le();
        let ch = u32::try_from(code)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| CoreError::Corrupt(format!("record {index}: bad character {code}")))?;
        let left = self.resolve(index, buf.get_i32_le())?;
        let center = self.resolve(index, buf.get_i32_le())?;
        let right = self.resolve(index, buf.get_i32_le())?;
        let frequency = buf.get_i32_le();
        let frequency = u32::try_from(frequency).map_err(|_| {
            CoreError::Corrupt(format!("record {index}: negative frequency {frequency}"))
        })?;

        Ok(Record {
            index,
            ch,
            left,
            center,
            right,
            frequency,
        })
    }

    /// Turn a word delta into a record index
    fn resolve(&self, index: usize, delta: i32) -> Result<Option<usize>> {
        if delta == 0 {
            return Ok(None);
        }
        let word = (index * RECORD_FIELDS) as i64 + i64::from(delta);
        let fields = RECORD_FIELDS as i64;
        if word < 0 || word % fields != 0 || (word / fields) as usize >= self.len() {
            return Err(CoreError::Corrupt(format!(
                "record {index}: child delta {delta} does not land on a record"
            )));
        }
        Ok(Some((word / fields) as usize))
    }

    /// Iterate over all records in buffer order
    pub fn records(&self) -> impl Iterator<Item = Result<Record>> + '_ {
        (0..self.len()).map(move |i| self.record(i))
    }

    /// Follow `word`'s exact character path and return its frequency
    pub fn frequency_of(&self, word: &str) -> Result<Option<u32>> {
        let chars: Vec<char> = word.chars().collect();
        let Some(last) = chars.len().checked_sub(1) else {
            return Ok(None);
        };
        let mut pos = 0;
        let mut current = Some(0);
        // Paths in an acyclic buffer never revisit a record
        let mut steps = 0;

        while let Some(index) = current {
            steps += 1;
            if steps > self.len() {
                return Err(CoreError::Corrupt("cycle in child offsets".to_string()));
            }
            let record = self.record(index)?;
            let ch = chars[pos];
            if ch < record.ch {
                current = record.left;
            } else if ch > record.ch {
                current = record.right;
            } else if pos == last {
                return Ok((record.frequency != 0).then_some(record.frequency));
            } else {
                pos += 1;
                current = record.center;
            }
        }
        Ok(None)
    }

    /// Enumerate every stored word with its frequency, in character order
    pub fn entries(&self) -> Result<Vec<(String, u32)>> {
        let mut out = Vec::new();
        let mut prefix = String::new();
        self.collect(0, &mut prefix, 0, &mut out)?;
        Ok(out)
    }

    fn collect(
        &self,
        index: usize,
        prefix: &mut String,
        depth: usize,
        out: &mut Vec<(String, u32)>,
    ) -> Result<()> {
        if depth >= self.len() {
            return Err(CoreError::Corrupt("cycle in child offsets".to_string()));
        }
        let record = self.record(index)?;

        if let Some(left) = record.left {
            self.collect(left, prefix, depth + 1, out)?;
        }

        prefix.push(record.ch);
        if record.frequency != 0 {
            out.push((prefix.clone(), record.frequency));
        }
        if let Some(center) = record.center {
            self.collect(center, prefix, depth + 1, out)?;
        }
        prefix.pop();

        if let Some(right) = record.right {
            self.collect(right, prefix, depth + 1, out)?;
        }
        Ok(())
    }

    /// The raw buffer
    pub fn as_bytes(&self) -> &Bytes {
        &self.data
    }
}
