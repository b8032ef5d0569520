//! End-to-end compilation: build, balance, canonicalize, emit

use crate::tst::TernaryTree;
use crate::{CompileConfig, CoreError, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Counters collected while compiling
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileStats {
    /// Words inserted
    pub words: usize,
    /// Nodes created by the builder
    pub nodes_allocated: usize,
    /// Nodes released as duplicates
    pub nodes_released: usize,
    /// Records in the output
    pub records: usize,
    /// Emission passes until the fixed point
    pub emit_passes: usize,
    /// Output size in bytes
    pub bytes: usize,
}

impl CompileStats {
    /// Nodes remaining after canonicalization
    pub fn nodes_live(&self) -> usize {
        self.nodes_allocated - self.nodes_released
    }
}

/// A finished dictionary image
#[derive(Clone, Debug)]
pub struct CompiledDictionary {
    /// Record buffer, root first
    pub bytes: Bytes,
    /// Compilation counters
    pub stats: CompileStats,
}

/// Compile `(word, frequency)` pairs into a dictionary image.
///
/// Runs every stage to completion in order; any failure aborts the run and
/// no image is produced.
#[instrument(skip_all, fields(table_size = config.table_size))]
pub fn compile<I, S>(words: I, config: &CompileConfig) -> Result<CompiledDictionary>
where
    I: IntoIterator<Item = (S, u32)>,
    S: AsRef<str>,
{
    config.validate()?;

    let mut tree = TernaryTree::from_words(words)?;
    if tree.is_empty() {
        return Err(CoreError::EmptyWordList);
    }
    let built = tree.stats();
    info!(
        words = built.words,
        nodes = built.allocated,
        "built ternary search tree"
    );
    if built.allocated > config.table_size / 2 {
        warn!(
            nodes = built.allocated,
            table_size = config.table_size,
            "canonicalization table is crowded; consider a larger table"
        );
    }

    tree.balance();
    info!("balanced ternary search tree");

    let canonical = tree.canonicalize(config.table_size)?;
    let compressed = tree.stats();
    info!(
        merged = canonical.merged,
        nodes = compressed.live,
        released = compressed.released,
        "compressed tree to DAG"
    );

    let emitted = tree.emit(config.max_emit_passes)?;
    info!(
        records = emitted.records,
        passes = emitted.passes,
        bytes = emitted.bytes.len(),
        "emitted dictionary"
    );

    Ok(CompiledDictionary {
        stats: CompileStats {
            words: built.words,
            nodes_allocated: compressed.allocated,
            nodes_released: compressed.released,
            records: emitted.records,
            emit_passes: emitted.passes,
            bytes: emitted.bytes.len(),
        },
        bytes: emitted.bytes,
    })
}
