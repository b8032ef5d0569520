//! Binary emission of the node graph
//!
//! Records are written breadth-first from the root, each distinct node once:
//!
//! ```text
//! ┌───────────┬───────────┬───────────┬───────────┬───────────┐
//! │ char: i32 │ left: i32 │center: i32│ right: i32│ freq: i32 │
//! └───────────┴───────────┴───────────┴───────────┴───────────┘
//! ```
//!
//! All fields are little-endian. Child fields hold the distance to the child's
//! record in 32-bit words (`(child_offset - offset) / 4`); `0` means no child.
//!
//! A child's offset is only known once the child has been written, which in
//! breadth-first order is after its parent. Emission therefore repeats until a
//! pass changes no offset (a fixed point).

use crate::tst::{Child, NodeArena, NodeId};
use crate::{CoreError, Result, FIELD_SIZE, RECORD_SIZE};
use bitvec::vec::BitVec;
use bytes::{BufMut, Bytes, BytesMut};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, instrument};

/// Extra passes allowed on top of the graph depth
const PASS_SLACK: usize = 3;

/// Result of a single emission pass
#[derive(Clone, Debug)]
pub struct EmitPass {
    /// Buffer produced by this pass
    pub bytes: Bytes,
    /// Offsets that changed during this pass
    pub fixups: usize,
    /// Records written
    pub records: usize,
}

/// Final, self-consistent emission
#[derive(Clone, Debug)]
pub struct Emitted {
    /// The finished buffer
    pub bytes: Bytes,
    /// Passes needed to reach the fixed point
    pub passes: usize,
    /// Records written
    pub records: usize,
}

/// Serializer for a canonicalized node graph
pub struct Emitter<'a> {
    arena: &'a mut NodeArena,
    root: NodeId,
}

impl<'a> Emitter<'a> {
    /// Create an emitter rooted at `root`
    pub fn new(arena: &'a mut NodeArena, root: NodeId) -> Self {
        Self { arena, root }
    }

    /// Emit one breadth-first pass, updating cached offsets.
    ///
    /// Shared nodes are written once, at their first visit. A child not yet
    /// placed in any pass is written as a `0` placeholder.
    pub fn pass(&mut self) -> Result<EmitPass> {
        let mut buf = BytesMut::with_capacity(self.arena.live() * RECORD_SIZE);
        let mut visited: BitVec = BitVec::repeat(false, self.arena.capacity());
        let mut queue = VecDeque::from([self.root]);
        let mut fixups = 0;
        let mut records = 0;

        while let Some(id) = queue.pop_front() {
            if visited[id.index()] {
                continue;
            }
            visited.set(id.index(), true);

            let offset = u32::try_from(buf.len())
                .map_err(|_| CoreError::Overflow("dictionary exceeds 4 GiB".to_string()))?;
            fixups += self.write_record(&mut buf, id, offset)?;
            records += 1;

            queue.extend(self.arena.get(id)?.children().map(|(_, child)| child));
        }

        Ok(EmitPass {
            bytes: buf.freeze(),
            fixups,
            records,
        })
    }

    fn write_record(&mut self, buf: &mut BytesMut, id: NodeId, offset: u32) -> Result<usize> {
        let mut fixups = 0;

        let node = self.arena.get_mut(id)?;
        if node.stream_offset != Some(offset) {
            node.stream_offset = Some(offset);
            fixups += 1;
        }
        buf.put_i32_le(u32::from(node.ch) as i32);

        for child in Child::ALL {
            let Some(target) = self.arena.get(id)?.child(child) else {
                buf.put_i32_le(0);
                continue;
            };
            let target_offset = self.arena.get(target)?.stream_offset;
            let node = self.arena.get_mut(id)?;
            if node.cached_offset(child) != target_offset {
                node.cache_offset(child, target_offset);
                fixups += 1;
            }
            let delta = match node.cached_offset(child) {
                Some(target_offset) => word_delta(offset, target_offset)?,
                None => 0,
            };
            buf.put_i32_le(delta);
        }

        let frequency = self.arena.get(id)?.frequency;
        let frequency = i32::try_from(frequency)
            .map_err(|_| CoreError::Overflow(format!("frequency {frequency}")))?;
        buf.put_i32_le(frequency);
        Ok(fixups)
    }

    /// Emit until a pass reports zero fixups, failing after `max_passes`.
    #[instrument(skip(self))]
    pub fn run(&mut self, max_passes: usize) -> Result<Emitted> {
        let mut fixups = 0;
        for passes in 1..=max_passes {
            let pass = self.pass()?;
            debug!(pass = passes, fixups = pass.fixups, "emission pass");
            if pass.fixups == 0 {
                return Ok(Emitted {
                    bytes: pass.bytes,
                    passes,
                    records: pass.records,
                });
            }
            fixups = pass.fixups;
        }
        Err(CoreError::NoFixedPoint {
            passes: max_passes,
            fixups,
        })
    }

    /// Pass budget derived from the graph: its depth plus a small slack
    pub fn default_pass_limit(&self) -> usize {
        graph_depth(self.arena, self.root) + PASS_SLACK
    }
}

/// Signed distance between two record offsets in 32-bit words
fn word_delta(from: u32, to: u32) -> Result<i32> {
    let delta = (i64::from(to) - i64::from(from)) / FIELD_SIZE as i64;
    i32::try_from(delta).map_err(|_| CoreError::Overflow(format!("child offset {delta}")))
}

/// Longest root-to-leaf path in edges
pub fn graph_depth(arena: &NodeArena, root: NodeId) -> usize {
    fn depth(arena: &NodeArena, id: NodeId, memo: &mut HashMap<NodeId, usize>) -> usize {
        if let Some(&d) = memo.get(&id) {
            return d;
        }
        // Released nodes are reported by the emission pass itself
        let Ok(node) = arena.get(id) else {
            return 0;
        };
        let d = node
            .children()
            .map(|(_, child)| depth(arena, child, memo) + 1)
            .max()
            .unwrap_or(0);
        memo.insert(id, d);
        d
    }
    depth(arena, root, &mut HashMap::new())
}

/// Emit `root` to a fixed point; `max_passes` defaults to [`Emitter::default_pass_limit`].
pub fn emit(arena: &mut NodeArena, root: NodeId, max_passes: Option<usize>) -> Result<Emitted> {
    let mut emitter = Emitter::new(arena, root);
    let limit = max_passes.unwrap_or_else(|| emitter.default_pass_limit());
    emitter.run(limit)
}
