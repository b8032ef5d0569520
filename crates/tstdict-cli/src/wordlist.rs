//! XML word list parsing
//!
//! Reads the Android (Jellybean) dictionary format:
//!
//! ```xml
//! <wordlist>
//!   <w f="120" flags="">the</w>
//!   <w f="5" flags="abbreviation">etc</w>
//! </wordlist>
//! ```

use crate::error::{Result, WordListError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Words to compile, keyed by word
pub type WordList = BTreeMap<String, u32>;

/// Which entries of a word list are kept
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordListFilter {
    /// Smallest frequency kept
    pub min_frequency: u32,
    /// Shortest word kept, in characters
    pub min_length: usize,
    /// Entries whose `flags` attribute equals one of these are dropped
    pub skip_flags: Vec<String>,
}

impl Default for WordListFilter {
    fn default() -> Self {
        Self {
            min_frequency: 2,
            min_length: 2,
            skip_flags: vec!["abbreviation".to_string()],
        }
    }
}

impl WordListFilter {
    /// Whether an entry survives filtering
    pub fn accepts(&self, word: &str, frequency: i64, flags: &str) -> bool {
        !self.skip_flags.iter().any(|f| f == flags)
            && frequency >= i64::from(self.min_frequency)
            && word.chars().count() >= self.min_length
    }
}

/// A parsed and filtered word list
#[derive(Clone, Debug, Default)]
pub struct ParsedWordList {
    /// Kept words
    pub words: WordList,
    /// `<w>` entries seen
    pub entries: usize,
    /// Entries dropped by the filter
    pub skipped: usize,
}

#[derive(Default)]
struct PendingEntry {
    frequency: Option<String>,
    flags: String,
    text: String,
}

/// Parse the first `<wordlist>` element of `xml`, applying `filter`.
///
/// A word listed twice keeps its last frequency.
pub fn parse(xml: &str, filter: &WordListFilter) -> Result<ParsedWordList> {
    let mut reader = Reader::from_str(xml);
    let mut parsed = ParsedWordList::default();
    let mut found = false;
    let mut in_list = false;
    let mut pending: Option<PendingEntry> = None;

    loop {
        let position = reader.buffer_position() as u64;
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"wordlist" if !found => {
                    found = true;
                    in_list = true;
                }
                b"w" if in_list => pending = Some(read_attributes(e, position)?),
                _ => {}
            },
            Ok(Event::Empty(ref e)) if in_list && e.name().as_ref() == b"w" => {
                let entry = read_attributes(e, position)?;
                finish_entry(entry, filter, &mut parsed)?;
            }
            Ok(Event::Text(ref e)) => {
                if let Some(entry) = pending.as_mut() {
                    let text = e.unescape().map_err(|source| WordListError::Xml {
                        position,
                        source,
                    })?;
                    entry.text.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(entry) = pending.as_mut() {
                    entry.text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w" => {
                    if let Some(entry) = pending.take() {
                        finish_entry(entry, filter, &mut parsed)?;
                    }
                }
                b"wordlist" if in_list => break,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(source) => {
                return Err(WordListError::Xml {
                    position: reader.buffer_position() as u64,
                    source,
                })
            }
            _ => {}
        }
    }

    if !found {
        return Err(WordListError::MissingWordList);
    }
    Ok(parsed)
}

fn read_attributes(e: &BytesStart<'_>, position: u64) -> Result<PendingEntry> {
    let mut entry = PendingEntry::default();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| WordListError::Attribute {
            position,
            message: err.to_string(),
        })?;
        let value = attr
            .unescape_value()
            .map_err(|source| WordListError::Xml { position, source })?;
        match attr.key.as_ref() {
            b"f" => entry.frequency = Some(value.into_owned()),
            b"flags" => entry.flags = value.into_owned(),
            _ => {}
        }
    }
    Ok(entry)
}

fn finish_entry(entry: PendingEntry, filter: &WordListFilter, parsed: &mut ParsedWordList) -> Result<()> {
    parsed.entries += 1;

    let raw = entry
        .frequency
        .ok_or_else(|| WordListError::MissingFrequency {
            word: entry.text.clone(),
        })?;
    let invalid = || WordListError::InvalidFrequency {
        word: entry.text.clone(),
        value: raw.clone(),
    };
    let frequency: i64 = raw.trim().parse().map_err(|_| invalid())?;

    if !filter.accepts(&entry.text, frequency, &entry.flags) {
        parsed.skipped += 1;
        return Ok(());
    }

    let frequency = u32::try_from(frequency).map_err(|_| invalid())?;
    parsed.words.insert(entry.text, frequency);
    Ok(())
}
