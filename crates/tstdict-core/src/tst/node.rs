//! Ternary search tree nodes and the arena that owns them

use crate::{CoreError, Result};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Stable identity of a node inside a [`NodeArena`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of the node's slot in the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the three child links of a node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Child {
    /// Lower character, same position
    Left,
    /// Next character position
    Center,
    /// Higher character, same position
    Right,
}

impl Child {
    /// All child links in record order
    pub const ALL: [Child; 3] = [Child::Left, Child::Center, Child::Right];

    fn slot(self) -> usize {
        match self {
            Child::Left => 0,
            Child::Center => 1,
            Child::Right => 2,
        }
    }
}

/// A node of the ternary search tree (and, after canonicalization, of the DAG)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Character at this position
    pub ch: char,
    /// Non-zero when a word ends here
    pub frequency: u32,
    /// Sibling with a lower character
    pub left: Option<NodeId>,
    /// Continuation with the next character
    pub center: Option<NodeId>,
    /// Sibling with a higher character
    pub right: Option<NodeId>,
    /// Nodes reachable through left/right links, including this one
    pub weight: u32,
    /// Structural content hash, reduced modulo the canonicalization table size
    pub hash: u32,
    /// Byte offset of this node's record in the last emitted buffer
    pub stream_offset: Option<u32>,
    /// Child offsets as last written by the serializer
    pub(crate) child_offsets: [Option<u32>; 3],
}

impl Node {
    /// Create a detached, non-terminal node
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            frequency: 0,
            left: None,
            center: None,
            right: None,
            weight: 0,
            hash: 0,
            stream_offset: None,
            child_offsets: [None; 3],
        }
    }

    /// Whether a word terminates at this node
    pub fn is_terminal(&self) -> bool {
        self.frequency != 0
    }

    /// Get a child link
    pub fn child(&self, child: Child) -> Option<NodeId> {
        match child {
            Child::Left => self.left,
            Child::Center => self.center,
            Child::Right => self.right,
        }
    }

    /// Replace a child link
    pub fn set_child(&mut self, child: Child, id: Option<NodeId>) {
        match child {
            Child::Left => self.left = id,
            Child::Center => self.center = id,
            Child::Right => self.right = id,
        }
    }

    /// Iterate over present children in record order
    pub fn children(&self) -> impl Iterator<Item = (Child, NodeId)> + '_ {
        Child::ALL
            .into_iter()
            .filter_map(move |c| self.child(c).map(|id| (c, id)))
    }

    pub(crate) fn cached_offset(&self, child: Child) -> Option<u32> {
        self.child_offsets[child.slot()]
    }

    pub(crate) fn cache_offset(&mut self, child: Child, offset: Option<u32>) {
        self.child_offsets[child.slot()] = offset;
    }
}

/// Owner of every node in a tree.
///
/// Ids are handed out in increasing order and never reused, so an id doubles as
/// the node identity used for visited sets. Sharing a node between parents is
/// just several links holding the same id.
///
/// Indexing with an id whose slot was released panics: every link the compiler
/// follows is rebound before the slot it pointed to is freed.
#[derive(Debug, Default)]
pub struct NodeArena {
    slots: Vec<Option<Node>>,
    released: usize,
}

impl NodeArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node for `ch`
    pub fn alloc(&mut self, ch: char) -> Result<NodeId> {
        let id = u32::try_from(self.slots.len())
            .map_err(|_| CoreError::Overflow("node arena exceeds u32 ids".to_string()))?;
        self.slots.push(Some(Node::new(ch)));
        Ok(NodeId(id))
    }

    /// Free a node's slot, returning the node if it was live
    pub fn release(&mut self, id: NodeId) -> Option<Node> {
        let node = self.slots.get_mut(id.index())?.take();
        if node.is_some() {
            self.released += 1;
        }
        node
    }

    /// Look up a live node
    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.slots
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(CoreError::DanglingNode(id))
    }

    /// Look up a live node mutably
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(CoreError::DanglingNode(id))
    }

    /// Whether `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.index()), Some(Some(_)))
    }

    /// Number of ids ever issued
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Total allocations
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// Total releases
    pub fn released(&self) -> usize {
        self.released
    }

    /// Nodes currently live
    pub fn live(&self) -> usize {
        self.slots.len() - self.released
    }

    /// Iterate over live node ids
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| NodeId(i as u32))
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        match self.slots.get(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("dangling node reference {id}"),
        }
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match self.slots.get_mut(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("dangling node reference {id}"),
        }
    }
}
