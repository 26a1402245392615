//! Property tests for the codec: round trip, prefix-free codes, weight
//! conservation and determinism over arbitrary inputs.

use proptest::prelude::*;
use static_huffman::{CodeTable, HuffNode, HuffmanCodec, HuffmanTree};

/// Inputs skewed toward few distinct symbols, where padding is most likely to
/// decode to a real leaf.
fn skewed_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop_oneof![8 => Just(b'a'), 2 => Just(b'b'), 1 => any::<u8>()], 0..512)
}

proptest! {
    #[test]
    fn prop_roundtrip(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let compressed = HuffmanCodec::compress(&data).unwrap();
        let restored = HuffmanCodec::decompress(&compressed.payload, &compressed.trie).unwrap();
        prop_assert_eq!(restored, data);
    }

    #[test]
    fn prop_roundtrip_skewed(data in skewed_bytes()) {
        let compressed = HuffmanCodec::compress(&data).unwrap();
        let restored = HuffmanCodec::decompress(&compressed.payload, &compressed.trie).unwrap();
        prop_assert_eq!(restored, data);
    }

    #[test]
    fn prop_codes_prefix_free(data in prop::collection::vec(any::<u8>(), 1..1024)) {
        let tree = HuffmanTree::from_bytes(&data).unwrap();
        let table = CodeTable::from_tree(&tree);
        let codes: Vec<_> = table.iter().collect();
        for (a, code_a) in &codes {
            for (b, code_b) in &codes {
                if a != b {
                    prop_assert!(!code_a.is_prefix_of(code_b));
                }
            }
        }
        prop_assert!(table.max_code_len() <= tree.height().max(1));
    }

    #[test]
    fn prop_weights_conserved(data in prop::collection::vec(any::<u8>(), 0..1024)) {
        let tree = HuffmanTree::from_bytes(&data).unwrap();
        let leaf_sum: u64 = tree.leaves().map(|(_, weight)| weight).sum();
        prop_assert_eq!(leaf_sum, data.len() as u64);
        prop_assert_eq!(tree.total_weight(), data.len() as u64);
        for visit in tree.preorder() {
            if let HuffNode::Internal { weight, left, right } = visit.node {
                prop_assert_eq!(*weight, tree.node(*left).weight() + tree.node(*right).weight());
            }
        }

        let restored = HuffmanTree::deserialize(&tree.serialize()).unwrap();
        prop_assert!(restored.weights_consistent());
        prop_assert_eq!(restored, tree);
    }

    #[test]
    fn prop_deterministic(data in prop::collection::vec(any::<u8>(), 0..1024)) {
        let first = HuffmanCodec::compress(&data).unwrap();
        let second = HuffmanCodec::compress(&data).unwrap();
        prop_assert_eq!(first.payload, second.payload);
        prop_assert_eq!(first.trie, second.trie);
    }
}

#[test]
fn single_symbol_aaaa() {
    let compressed = HuffmanCodec::compress(b"aaaa").unwrap();
    let codec = HuffmanCodec::from_trie_artifact(&compressed.trie).unwrap();
    assert_eq!(codec.tree().leaves().collect::<Vec<_>>(), vec![(b'a', 4)]);
    assert_eq!(codec.table().get(b'a').unwrap().to_string(), "0");
    assert_eq!(codec.decode(&compressed.payload).unwrap(), b"aaaa");
}

#[test]
fn two_symbol_skewed() {
    let data = b"aaaab";
    let compressed = HuffmanCodec::compress(data).unwrap();
    let codec = HuffmanCodec::from_trie_artifact(&compressed.trie).unwrap();
    let a = codec.table().get(b'a').unwrap().len();
    let b = codec.table().get(b'b').unwrap().len();
    assert!(a <= b);
    assert_eq!(codec.decode(&compressed.payload).unwrap(), data);
}

#[test]
fn empty_input() {
    let compressed = HuffmanCodec::compress(b"").unwrap();
    assert!(compressed.payload.is_empty());
    let tree = HuffmanTree::deserialize(&compressed.trie).unwrap();
    assert_eq!(tree.leaf_count(), 0);
    assert!(HuffmanCodec::decompress(&compressed.payload, &compressed.trie)
        .unwrap()
        .is_empty());
}

#[test]
fn payload_from_another_trie_is_rejected_or_differs() {
    let original = b"the trie must come from the same run";
    let compressed = HuffmanCodec::compress(original).unwrap();
    let other = HuffmanCodec::compress(b"zzzz").unwrap();
    match HuffmanCodec::decompress(&compressed.payload, &other.trie) {
        Ok(decoded) => assert_ne!(decoded, original),
        Err(err) => assert!(err.to_string().contains("payload ended")),
    }
}
