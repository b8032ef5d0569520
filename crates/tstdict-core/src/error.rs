//! Error types for the tstdict-core crate

use crate::tst::NodeId;
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while compiling or reading a dictionary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The same word was inserted twice
    #[error("duplicate word: {0}")]
    DuplicateWord(String),

    /// Words must contain at least one character
    #[error("invalid word: {0:?}")]
    InvalidWord(String),

    /// Frequency is zero or does not fit the 32-bit record field
    #[error("invalid frequency {frequency} for word {word:?}")]
    InvalidFrequency { word: String, frequency: u32 },

    /// Nothing to compile
    #[error("word list is empty")]
    EmptyWordList,

    /// The canonicalization table has no empty bucket left
    #[error("canonicalization table saturated: {size} buckets")]
    TableSaturated { size: usize },

    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The serializer did not reach a fixed point within its pass budget
    #[error("no fixed point after {passes} passes ({fixups} fixups remaining)")]
    NoFixedPoint { passes: usize, fixups: usize },

    /// A node id referenced a released or never-allocated arena slot
    #[error("dangling node reference: {0}")]
    DanglingNode(NodeId),

    /// A value does not fit the 32-bit record fields
    #[error("record field overflow: {0}")]
    Overflow(String),

    /// The dictionary buffer is malformed
    #[error("corrupt dictionary: {0}")]
    Corrupt(String),
}
