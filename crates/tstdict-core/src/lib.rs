//! # tstdict Core
//!
//! Compiler from word/frequency lists to compact, pointer-based dictionary
//! images for memory-constrained input methods.
//!
//! This crate provides:
//! - **Ternary Search Trees**: arena-backed construction and weight balancing
//! - **DAG Compression**: hash consing of identical suffix subtrees
//! - **Binary Emission**: relocation-free records with relative child offsets,
//!   re-emitted until every offset is stable
//! - **Verification**: a reader and a text rendering of emitted images
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        (word, frequency) pairs          │
//! ├─────────────────────────────────────────┤
//! │   Builder  →  Balancer  →  Canonicalizer│
//! │            NodeArena (in place)         │
//! ├─────────────────────────────────────────┤
//! │      Emitter (fixed-point passes)       │
//! ├─────────────────────────────────────────┤
//! │     Bytes  →  DictReader / dump         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tstdict_core::{compile, CompileConfig, DictReader};
//!
//! let dict = compile([("cat", 10), ("car", 8), ("dog", 12)], &CompileConfig::default())?;
//! let reader = DictReader::new(dict.bytes)?;
//! assert_eq!(reader.frequency_of("car")?, Some(8));
//! # Ok::<(), tstdict_core::CoreError>(())
//! ```

pub mod config;
pub mod dump;
pub mod emit;
pub mod error;
pub mod pipeline;
pub mod reader;
pub mod tst;

pub use config::CompileConfig;
pub use emit::{Emitted, Emitter};
pub use error::{CoreError, Result};
pub use pipeline::{compile, CompileStats, CompiledDictionary};
pub use reader::{DictReader, Record};
pub use tst::{NodeArena, NodeId, TernaryTree};

/// Size of one record field in bytes
pub const FIELD_SIZE: usize = 4;

/// Fields per record: character, left, center, right, frequency
pub const RECORD_FIELDS: usize = 5;

/// Size of one node record in bytes
pub const RECORD_SIZE: usize = FIELD_SIZE * RECORD_FIELDS;
