//! End-to-end compilation tests
//!
//! Compile word lists, read the images back and check the structural
//! guarantees of the compressed graph.

use proptest::collection::btree_map;
use proptest::prelude::*;
use rstest::rstest;
use std::collections::BTreeMap;
use tstdict_core::emit::graph_depth;
use tstdict_core::tst::{structurally_equal, MAX_FREQUENCY};
use tstdict_core::{compile, dump, CompileConfig, CoreError, DictReader, TernaryTree, RECORD_SIZE};

fn compile_map(words: &BTreeMap<String, u32>, config: &CompileConfig) -> DictReader {
    let dict = compile(words.iter().map(|(w, f)| (w.as_str(), *f)), config).unwrap();
    assert_eq!(dict.bytes.len() % RECORD_SIZE, 0);
    DictReader::new(dict.bytes).unwrap()
}

fn word_map() -> impl Strategy<Value = BTreeMap<String, u32>> {
    btree_map("[a-f]{1,7}", 1u32..500, 1..60)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_every_word_reads_back(words in word_map()) {
        let reader = compile_map(&words, &CompileConfig::default());

        let mut entries = reader.entries().unwrap();
        entries.sort();
        let expected: Vec<(String, u32)> = words.iter().map(|(w, f)| (w.clone(), *f)).collect();
        prop_assert_eq!(entries, expected);

        for (word, freq) in &words {
            prop_assert_eq!(reader.frequency_of(word).unwrap(), Some(*freq));
        }
    }

    #[test]
    fn prop_absent_words_are_not_found(words in word_map(), lookup in "[a-g]{1,8}") {
        let reader = compile_map(&words, &CompileConfig::default());
        prop_assert_eq!(reader.frequency_of(&lookup).unwrap(), words.get(&lookup).copied());
    }

    #[test]
    fn prop_small_table_still_correct(words in btree_map("[a-c]{1,4}", 1u32..4, 1..20)) {
        // Heavy collisions: hash only steers probing, equality decides merges
        let config = CompileConfig::with_table_size(257).unwrap();
        let reader = compile_map(&words, &config);
        let mut entries = reader.entries().unwrap();
        entries.sort();
        prop_assert_eq!(entries.len(), words.len());
    }

    #[test]
    fn prop_no_equal_distinct_nodes(words in word_map()) {
        let mut tree = TernaryTree::from_words(words.iter().map(|(w, f)| (w.as_str(), *f))).unwrap();
        tree.balance();
        tree.canonicalize(1 << 16).unwrap();

        let arena = tree.arena();
        let ids: Vec<_> = arena.ids().collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                prop_assert!(!structurally_equal(arena, *a, *b), "{} and {} are equal", a, b);
            }
        }
    }

    #[test]
    fn prop_emission_converges_within_depth(words in word_map()) {
        let mut tree = TernaryTree::from_words(words.iter().map(|(w, f)| (w.as_str(), *f))).unwrap();
        tree.balance();
        tree.canonicalize(1 << 16).unwrap();
        let root = tree.root().unwrap();
        let depth = graph_depth(tree.arena(), root);
        let live = tree.arena().live();

        let emitted = tree.emit(None).unwrap();
        prop_assert!(emitted.passes <= depth + 3);
        prop_assert_eq!(emitted.records, live);
    }
}

#[test]
fn test_scenario_dictionary() {
    let words: BTreeMap<String, u32> = [("cat", 10), ("car", 8), ("care", 5), ("dog", 12)]
        .into_iter()
        .map(|(w, f)| (w.to_string(), f))
        .collect();
    let reader = compile_map(&words, &CompileConfig::default());

    let root = reader.record(0).unwrap();
    assert_eq!(root.ch, 'c');
    assert_eq!(root.frequency, 0);
    assert!(root.right.is_some());
    assert_eq!(reader.frequency_of("car").unwrap(), Some(8));
    assert_eq!(reader.frequency_of("ca").unwrap(), None);
    assert_eq!(reader.frequency_of("do").unwrap(), None);
}

#[test]
fn test_shared_suffix_dump() {
    let words: BTreeMap<String, u32> = [("run", 5), ("fun", 5)]
        .into_iter()
        .map(|(w, f)| (w.to_string(), f))
        .collect();
    let reader = compile_map(&words, &CompileConfig::default());
    assert_eq!(reader.len(), 4);

    let text = dump::render(&reader).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert_eq!(text.matches("ch: u").count(), 1);
    assert_eq!(text.matches("ch: n").count(), 1);
}

#[rstest]
#[case::unicode(&[("naïve", 7), ("café", 9), ("cafés", 3)])]
#[case::single_chars(&[("a", 2), ("b", 3), ("c", 4)])]
#[case::prefix_chain(&[("a", 1), ("ab", 2), ("abc", 3), ("abcd", 4)])]
#[case::max_frequency(&[("big", MAX_FREQUENCY), ("bag", 1)])]
fn test_word_lists_read_back(#[case] words: &[(&str, u32)]) {
    let map: BTreeMap<String, u32> = words.iter().map(|(w, f)| (w.to_string(), *f)).collect();
    let reader = compile_map(&map, &CompileConfig::default());
    for (word, freq) in words {
        assert_eq!(reader.frequency_of(word).unwrap(), Some(*freq));
    }
}

#[rstest]
#[case::zero_frequency(vec![("cat", 0)])]
#[case::too_frequent(vec![("cat", MAX_FREQUENCY + 1)])]
#[case::empty_word(vec![("", 3)])]
fn test_invalid_input_rejected(#[case] words: Vec<(&str, u32)>) {
    assert!(compile(words, &CompileConfig::default()).is_err());
}

#[test]
fn test_saturated_table_reports_error() {
    let config = CompileConfig::with_table_size(3).unwrap();
    let err = compile([("abcdef", 3), ("uvwxyz", 4)], &config).unwrap_err();
    assert!(matches!(err, CoreError::TableSaturated { .. }));
}
