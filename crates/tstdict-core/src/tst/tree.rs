//! Ternary search tree over a node arena

use super::{balance, canonicalize, insert, CanonicalStats, NodeArena, NodeId};
use crate::emit::{emit, Emitted};
use crate::{CoreError, Result};
use tracing::instrument;

/// A word tree and the arena that owns its nodes
#[derive(Debug, Default)]
pub struct TernaryTree {
    arena: NodeArena,
    root: Option<NodeId>,
    words: usize,
}

impl TernaryTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from `(word, frequency)` pairs
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut tree = Self::new();
        for (word, frequency) in words {
            tree.insert(word.as_ref(), frequency)?;
        }
        Ok(tree)
    }

    /// Insert a word; duplicates are rejected
    pub fn insert(&mut self, word: &str, frequency: u32) -> Result<()> {
        self.root = Some(insert(&mut self.arena, self.root, word, frequency)?);
        self.words += 1;
        Ok(())
    }

    /// Root node, if any word was inserted
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The node arena
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Number of inserted words
    pub fn len(&self) -> usize {
        self.words
    }

    /// Check if no word was inserted
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Rebalance every level around its weight median
    #[instrument(skip(self), fields(words = self.words))]
    pub fn balance(&mut self) {
        self.root = balance(&mut self.arena, self.root);
    }

    /// Merge identical subtrees, turning the tree into a DAG
    #[instrument(skip(self), fields(words = self.words))]
    pub fn canonicalize(&mut self, table_size: usize) -> Result<CanonicalStats> {
        let root = self.root.ok_or(CoreError::EmptyWordList)?;
        canonicalize(&mut self.arena, root, table_size)
    }

    /// Serialize to a fixed point
    pub fn emit(&mut self, max_passes: Option<usize>) -> Result<Emitted> {
        let root = self.root.ok_or(CoreError::EmptyWordList)?;
        emit(&mut self.arena, root, max_passes)
    }

    /// Every stored word with its frequency, in character order
    pub fn words(&self) -> Vec<(String, u32)> {
        let mut out = Vec::with_capacity(self.words);
        let mut prefix = String::new();
        self.collect(self.root, &mut prefix, &mut out);
        out
    }

    fn collect(&self, node: Option<NodeId>, prefix: &mut String, out: &mut Vec<(String, u32)>) {
        let Some(id) = node else {
            return;
        };
        let n = &self.arena[id];
        self.collect(n.left, prefix, out);
        prefix.push(n.ch);
        if n.is_terminal() {
            out.push((prefix.clone(), n.frequency));
        }
        self.collect(n.center, prefix, out);
        prefix.pop();
        self.collect(n.right, prefix, out);
    }

    /// Arena accounting
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            words: self.words,
            allocated: self.arena.allocated(),
            released: self.arena.released(),
            live: self.arena.live(),
        }
    }
}

/// Tree statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub words: usize,
    pub allocated: usize,
    pub released: usize,
    pub live: usize,
}
