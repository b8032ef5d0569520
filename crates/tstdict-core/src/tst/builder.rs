//! Word insertion

use super::{NodeArena, NodeId};
use crate::{CoreError, Result};
use std::cmp::Ordering;

/// Largest frequency a record field can hold
pub const MAX_FREQUENCY: u32 = i32::MAX as u32;

/// Insert `word` with `frequency` below `root`, returning the subtree's root.
///
/// Nodes are created lazily along the insertion path. No balancing happens
/// here; sorted input produces right-leaning chains.
pub fn insert(
    arena: &mut NodeArena,
    root: Option<NodeId>,
    word: &str,
    frequency: u32,
) -> Result<NodeId> {
    if word.is_empty() {
        return Err(CoreError::InvalidWord(word.to_string()));
    }
    if frequency == 0 || frequency > MAX_FREQUENCY {
        return Err(CoreError::InvalidFrequency {
            word: word.to_string(),
            frequency,
        });
    }

    let chars: Vec<char> = word.chars().collect();
    insert_at(arena, root, &chars, word, frequency)
}

fn insert_at(
    arena: &mut NodeArena,
    node: Option<NodeId>,
    rest: &[char],
    word: &str,
    frequency: u32,
) -> Result<NodeId> {
    let Some((&ch, tail)) = rest.split_first() else {
        return Err(CoreError::InvalidWord(word.to_string()));
    };

    let id = match node {
        Some(id) => id,
        None => arena.alloc(ch)?,
    };

    match ch.cmp(&arena[id].ch) {
        Ordering::Less => {
            let left = arena[id].left;
            let left = insert_at(arena, left, rest, word, frequency)?;
            arena[id].left = Some(left);
        }
        Ordering::Greater => {
            let right = arena[id].right;
            let right = insert_at(arena, right, rest, word, frequency)?;
            arena[id].right = Some(right);
        }
        Ordering::Equal if tail.is_empty() => {
            if arena[id].is_terminal() {
                return Err(CoreError::DuplicateWord(word.to_string()));
            }
            arena[id].frequency = frequency;
        }
        Ordering::Equal => {
            let center = arena[id].center;
            let center = insert_at(arena, center, tail, word, frequency)?;
            arena[id].center = Some(center);
        }
    }

    Ok(id)
}
