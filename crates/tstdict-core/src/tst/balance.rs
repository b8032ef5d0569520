//! Weight balancing of tree levels
//!
//! A level is the binary search tree formed by nodes linked through
//! `left`/`right`, i.e. all candidates for one character position. Each level
//! is rebuilt independently so that its root is the weight median, then the
//! procedure recurses into the halves and into every `center` subtree.

use super::{NodeArena, NodeId};

/// Balance the whole tree and return its new root.
///
/// Populates `weight` on every reachable node.
pub fn balance(arena: &mut NodeArena, root: Option<NodeId>) -> Option<NodeId> {
    weigh(arena, root);
    let root = balance_level(arena, root);
    balance_centers(arena, root);
    root
}

/// Rank (0-based, in character order) of the node that becomes a level's root
pub fn median_rank(weight: u32) -> u32 {
    weight.saturating_sub(1) / 2
}

fn weight_of(arena: &NodeArena, node: Option<NodeId>) -> u32 {
    node.map_or(0, |id| arena[id].weight)
}

/// Compute level weights bottom-up; center subtrees are weighed on their own.
fn weigh(arena: &mut NodeArena, node: Option<NodeId>) -> u32 {
    let Some(id) = node else {
        return 0;
    };
    let (left, center, right) = (arena[id].left, arena[id].center, arena[id].right);
    let weight = weigh(arena, left) + weigh(arena, right) + 1;
    arena[id].weight = weight;
    weigh(arena, center);
    weight
}

fn refresh_weight(arena: &mut NodeArena, id: NodeId) {
    let weight = weight_of(arena, arena[id].left) + weight_of(arena, arena[id].right) + 1;
    arena[id].weight = weight;
}

fn rotate_right(arena: &mut NodeArena, id: NodeId) -> NodeId {
    let Some(pivot) = arena[id].left else {
        return id;
    };
    arena[id].left = arena[pivot].right;
    arena[pivot].right = Some(id);
    refresh_weight(arena, id);
    refresh_weight(arena, pivot);
    pivot
}

fn rotate_left(arena: &mut NodeArena, id: NodeId) -> NodeId {
    let Some(pivot) = arena[id].right else {
        return id;
    };
    arena[id].right = arena[pivot].left;
    arena[pivot].left = Some(id);
    refresh_weight(arena, id);
    refresh_weight(arena, pivot);
    pivot
}

/// Bring the node of in-order `rank` to the top of this level.
///
/// One rotation per level of descent: right rotations on the way back from a
/// left descent, left rotations from a right descent.
fn divide(arena: &mut NodeArena, id: NodeId, rank: u32) -> NodeId {
    let left_weight = weight_of(arena, arena[id].left);
    if rank < left_weight {
        if let Some(left) = arena[id].left {
            let left = divide(arena, left, rank);
            arena[id].left = Some(left);
            return rotate_right(arena, id);
        }
    } else if rank > left_weight {
        if let Some(right) = arena[id].right {
            let right = divide(arena, right, rank - left_weight - 1);
            arena[id].right = Some(right);
            return rotate_left(arena, id);
        }
    }
    id
}

fn balance_level(arena: &mut NodeArena, node: Option<NodeId>) -> Option<NodeId> {
    let id = node?;
    let weight = arena[id].weight;
    if weight <= 1 {
        return Some(id);
    }

    let id = divide(arena, id, median_rank(weight));
    let (left, right) = (arena[id].left, arena[id].right);
    let left = balance_level(arena, left);
    arena[id].left = left;
    let right = balance_level(arena, right);
    arena[id].right = right;
    Some(id)
}

fn balance_centers(arena: &mut NodeArena, node: Option<NodeId>) {
    let Some(id) = node else {
        return;
    };
    let center = arena[id].center;
    let center = balance_level(arena, center);
    arena[id].center = center;
    balance_centers(arena, center);
    let (left, right) = (arena[id].left, arena[id].right);
    balance_centers(arena, left);
    balance_centers(arena, right);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tst::insert;
    use rstest::rstest;

    fn build(words: &[&str]) -> (NodeArena, Option<NodeId>) {
        let mut arena = NodeArena::new();
        let mut root = None;
        for word in words {
            root = Some(insert(&mut arena, root, word, 2).unwrap());
        }
        (arena, root)
    }

    /// In-order characters of one level
    fn level(arena: &NodeArena, node: Option<NodeId>, out: &mut Vec<char>) {
        if let Some(id) = node {
            level(arena, arena[id].left, out);
            out.push(arena[id].ch);
            level(arena, arena[id].right, out);
        }
    }

    fn level_depth(arena: &NodeArena, node: Option<NodeId>) -> usize {
        node.map_or(0, |id| {
            1 + level_depth(arena, arena[id].left).max(level_depth(arena, arena[id].right))
        })
    }

    fn assert_ordered_and_weighed(arena: &NodeArena, node: Option<NodeId>) {
        let Some(id) = node else {
            return;
        };
        let n = &arena[id];
        if let Some(l) = n.left {
            assert!(arena[l].ch < n.ch);
        }
        if let Some(r) = n.right {
            assert!(arena[r].ch > n.ch);
        }
        assert_eq!(n.weight, weight_of(arena, n.left) + weight_of(arena, n.right) + 1);
        assert_ordered_and_weighed(arena, n.left);
        assert_ordered_and_weighed(arena, n.center);
        assert_ordered_and_weighed(arena, n.right);
    }

    /// Every node of every level has exactly `median_rank(weight)` nodes on its left
    fn assert_median_everywhere(arena: &NodeArena, node: Option<NodeId>) {
        let Some(id) = node else {
            return;
        };
        let n = &arena[id];
        assert_eq!(
            weight_of(arena, n.left),
            median_rank(n.weight),
            "level rooted at {:?} is not median-split",
            n.ch
        );
        assert_median_everywhere(arena, n.left);
        assert_median_everywhere(arena, n.center);
        assert_median_everywhere(arena, n.right);
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 0)]
    #[case(3, 1)]
    #[case(4, 1)]
    #[case(7, 3)]
    #[case(8, 3)]
    fn test_median_rank(#[case] weight: u32, #[case] rank: u32) {
        assert_eq!(median_rank(weight), rank);
    }

    #[test]
    fn test_seven_siblings_root_is_fourth() {
        let (mut arena, root) = build(&["aa", "bb", "cc", "dd", "ee", "ff", "gg"]);
        let root = balance(&mut arena, root).unwrap();

        assert_eq!(arena[root].ch, 'd');
        assert_eq!(weight_of(&arena, arena[root].left), 3);
        assert_eq!(weight_of(&arena, arena[root].right), 3);
        assert_eq!(level_depth(&arena, Some(root)), 3);
    }

    #[test]
    fn test_two_siblings_keep_lower_median() {
        let (mut arena, root) = build(&["cat", "car", "care", "dog"]);
        let root = balance(&mut arena, root).unwrap();
        assert_eq!(arena[root].ch, 'c');
        assert_eq!(arena[arena[root].right.unwrap()].ch, 'd');
    }

    #[test]
    fn test_balancing_preserves_order_and_weights() {
        let words = [
            "zebra", "apple", "mango", "kiwi", "banana", "cherry", "date", "fig", "grape",
            "lemon", "lime", "melon", "nut", "olive", "peach", "pear", "plum", "quince",
        ];
        let (mut arena, root) = build(&words);
        let mut before = Vec::new();
        level(&arena, root, &mut before);

        let root = balance(&mut arena, root);
        let mut after = Vec::new();
        level(&arena, root, &mut after);

        assert_eq!(before, after);
        assert_ordered_and_weighed(&arena, root);
    }

    #[test]
    fn test_sorted_chain_becomes_logarithmic() {
        let words: Vec<String> = ('a'..='z').map(|c| format!("{c}{c}")).collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let (mut arena, root) = build(&refs);
        assert_eq!(level_depth(&arena, root), 26);

        let root = balance(&mut arena, root);
        assert_eq!(level_depth(&arena, root), 5);
    }

    #[test]
    fn test_center_levels_balanced_independently() {
        let (mut arena, root) = build(&["xa", "xb", "xc", "xd", "xe"]);
        let root = balance(&mut arena, root).unwrap();
        let center = arena[root].center.unwrap();
        assert_eq!(arena[center].ch, 'c');
        assert_eq!(arena[center].weight, 5);
        assert_eq!(level_depth(&arena, Some(center)), 3);
    }

    #[test]
    fn test_center_below_sibling_is_balanced() {
        let (mut arena, root) = build(&["a", "ba", "bb", "bc", "bd", "be"]);
        let root = balance(&mut arena, root).unwrap();

        assert_eq!(arena[root].ch, 'a');
        let sibling = arena[root].right.unwrap();
        assert_eq!(arena[sibling].ch, 'b');
        let center = arena[sibling].center.unwrap();
        assert_eq!(arena[center].ch, 'c');
        assert_eq!(level_depth(&arena, Some(center)), 3);
        assert_median_everywhere(&arena, Some(root));
    }

    #[test]
    fn test_empty_tree() {
        let mut arena = NodeArena::new();
        assert_eq!(balance(&mut arena, None), None);
    }

    mod props {
        use super::*;
        use proptest::collection::btree_map;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_every_level_is_median_split(words in btree_map("[a-h]{1,6}", 1u32..50, 1..80)) {
                let mut arena = NodeArena::new();
                let mut root = None;
                for (word, freq) in &words {
                    root = Some(insert(&mut arena, root, word, *freq).unwrap());
                }
                let root = balance(&mut arena, root);
                assert_median_everywhere(&arena, root);
                assert_ordered_and_weighed(&arena, root);
            }
        }
    }
}
