//! Structural content hashing

use super::{NodeArena, NodeId};

/// Default number of buckets in the canonicalization table (2^20)
pub const DEFAULT_TABLE_SIZE: usize = 1 << 20;

/// Hash every node below `node` bottom-up, storing each node's hash.
///
/// `hash = ((ch - 'a') + 31 * hash(center)) ^ hash(left) ^ hash(right)`,
/// folded with its own high half (`h ^= h >> 16`) and reduced modulo
/// `table_size`. Absent children hash to 0. The left/right combination is
/// commutative, so mirrored siblings collide; equality is always checked
/// exactly before merging.
pub fn content_hash(arena: &mut NodeArena, node: Option<NodeId>, table_size: usize) -> u32 {
    let Some(id) = node else {
        return 0;
    };
    let (ch, left, center, right) = {
        let n = &arena[id];
        (n.ch, n.left, n.center, n.right)
    };

    let center = i64::from(content_hash(arena, center, table_size));
    let mut hash = (i64::from(u32::from(ch)) - i64::from(u32::from('a'))) + 31 * center;
    hash ^= i64::from(content_hash(arena, left, table_size));
    hash ^= i64::from(content_hash(arena, right, table_size));
    hash ^= hash >> 16;

    // Characters below 'a' can drive the value negative
    let hash = hash.rem_euclid(table_size as i64) as u32;
    arena[id].hash = hash;
    hash
}
