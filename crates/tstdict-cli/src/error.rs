//! Error types for word list parsing

use thiserror::Error;

/// Result type alias using `WordListError`
pub type Result<T> = std::result::Result<T, WordListError>;

/// Errors that can occur while reading an XML word list
#[derive(Error, Debug)]
pub enum WordListError {
    /// Malformed XML
    #[error("XML error at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// Malformed attribute on a `<w>` element
    #[error("bad attribute at byte {position}: {message}")]
    Attribute { position: u64, message: String },

    /// No `<wordlist>` root element
    #[error("no <wordlist> element found")]
    MissingWordList,

    /// A `<w>` entry without an `f` attribute
    #[error("missing frequency for word {word:?}")]
    MissingFrequency { word: String },

    /// A frequency that is not an integer or out of range
    #[error("invalid frequency {value:?} for word {word:?}")]
    InvalidFrequency { word: String, value: String },
}
