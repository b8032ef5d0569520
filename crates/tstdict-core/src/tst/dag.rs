//! Suffix sharing: collapse structurally identical subtrees into a DAG

use super::{content_hash, Child, NodeArena, NodeId};
use crate::{CoreError, Result};
use tracing::{debug, instrument};

/// Outcome of a canonicalization run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CanonicalStats {
    /// Child links rebound to an existing canonical node
    pub merged: usize,
    /// Nodes released because they belonged to a duplicate subtree
    pub released: usize,
    /// Nodes registered as canonical
    pub canonical: usize,
}

/// Whether two subtrees are identical in characters, frequencies and shape
pub fn structurally_equal(arena: &NodeArena, a: NodeId, b: NodeId) -> bool {
    if a == b {
        return true;
    }
    let (x, y) = (&arena[a], &arena[b]);
    x.ch == y.ch
        && x.frequency == y.frequency
        && Child::ALL
            .into_iter()
            .all(|c| match (x.child(c), y.child(c)) {
                (None, None) => true,
                (Some(l), Some(r)) => structurally_equal(arena, l, r),
                _ => false,
            })
}

/// Open-addressing table of canonical nodes, probed linearly from each
/// node's content hash.
pub struct Canonicalizer {
    table: Vec<Option<NodeId>>,
    stats: CanonicalStats,
}

enum Interned {
    /// First of its kind; now canonical
    Inserted,
    /// An equal node is already canonical
    Found(NodeId),
}

impl Canonicalizer {
    /// Create a canonicalizer with `table_size` buckets
    pub fn new(table_size: usize) -> Result<Self> {
        if table_size == 0 || table_size > u32::MAX as usize {
            return Err(CoreError::Configuration(format!(
                "table size must be between 1 and {}",
                u32::MAX
            )));
        }
        Ok(Self {
            table: vec![None; table_size],
            stats: CanonicalStats::default(),
        })
    }

    /// Hash the whole tree, then merge duplicates below `root`.
    ///
    /// Hashes are computed over the complete unmerged tree before any link is
    /// rebound. The root itself is never a merge candidate.
    #[instrument(skip(self, arena))]
    pub fn run(mut self, arena: &mut NodeArena, root: NodeId) -> Result<CanonicalStats> {
        arena.get(root)?;
        content_hash(arena, Some(root), self.table.len());
        self.dedup_children(arena, root)?;
        debug!(
            merged = self.stats.merged,
            released = self.stats.released,
            canonical = self.stats.canonical,
            "canonicalization complete"
        );
        Ok(self.stats)
    }

    fn dedup_children(&mut self, arena: &mut NodeArena, id: NodeId) -> Result<()> {
        for child in [Child::Left, Child::Right, Child::Center] {
            let Some(candidate) = arena[id].child(child) else {
                continue;
            };
            match self.intern(arena, candidate)? {
                Interned::Inserted => self.dedup_children(arena, candidate)?,
                // Already deduplicated when it was first seen
                Interned::Found(canonical) if canonical == candidate => {}
                Interned::Found(canonical) => {
                    arena[id].set_child(child, Some(canonical));
                    self.stats.merged += 1;
                    self.release_subtree(arena, candidate);
                }
            }
        }
        Ok(())
    }

    fn intern(&mut self, arena: &NodeArena, id: NodeId) -> Result<Interned> {
        let size = self.table.len();
        let mut bucket = arena[id].hash as usize % size;
        for _ in 0..size {
            match self.table[bucket] {
                None => {
                    self.table[bucket] = Some(id);
                    self.stats.canonical += 1;
                    return Ok(Interned::Inserted);
                }
                Some(existing) if structurally_equal(arena, existing, id) => {
                    return Ok(Interned::Found(existing));
                }
                Some(_) => bucket = (bucket + 1) % size,
            }
        }
        Err(CoreError::TableSaturated { size })
    }

    /// Release a duplicate subtree. Its nodes were never visited, so nothing
    /// else links into it.
    fn release_subtree(&mut self, arena: &mut NodeArena, id: NodeId) {
        if let Some(node) = arena.release(id) {
            self.stats.released += 1;
            for (_, child) in node.children() {
                self.release_subtree(arena, child);
            }
        }
    }
}

/// Merge structurally identical subtrees below `root` using a table of
/// `table_size` buckets.
pub fn canonicalize(arena: &mut NodeArena, root: NodeId, table_size: usize) -> Result<CanonicalStats> {
    Canonicalizer::new(table_size)?.run(arena, root)
}
