use std::cmp::Ordering;

use tracing::debug;

use crate::error::Result;
use crate::frequency::{FrequencyTable, Symbol};
use crate::min_heap::MinHeap;

/// Handle of a node inside a [`HuffmanTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        byte: Symbol,
    },
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl HuffNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }
}

/// Which edge led to a node during a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Root,
    Left,
    Right,
}

/// A node reached by [`HuffmanTree::preorder`].
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub id: NodeId,
    pub node: &'a HuffNode,
    pub depth: usize,
    pub side: Side,
}

/// Prefix-code trie stored as an arena of nodes.
///
/// Every internal node owns exactly two children and no node is reachable
/// from two parents; `root` is the only entry point. An empty tree (no root)
/// is the trie of an empty input.
#[derive(Debug, Clone, Default)]
pub struct HuffmanTree {
    nodes: Vec<HuffNode>,
    root: Option<NodeId>,
}

/// Priority key for the merge loop: weight first, then insertion order.
#[derive(Debug)]
struct HeapEntry {
    weight: u64,
    seq: u32,
    id: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl HuffmanTree {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }

    /// Builds the trie by repeatedly merging the two lightest nodes.
    ///
    /// Leaves enter the heap in ascending symbol order and every merged node
    /// takes the next sequence number, so equal weights always resolve the same
    /// way. The first node removed becomes the right child, the second the
    /// left child.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let mut tree = HuffmanTree::default();
        let leaves: Vec<HeapEntry> = frequencies
            .iter()
            .enumerate()
            .map(|(seq, (byte, weight))| HeapEntry {
                weight,
                seq: seq as u32,
                id: tree.push(HuffNode::Leaf { weight, byte }),
            })
            .collect();

        if leaves.is_empty() {
            return Ok(tree);
        }
        let next_seq = leaves.len() as u32;
        tree.build_from_heap(MinHeap::build(leaves)?, next_seq)?;

        debug!(
            leaves = tree.leaf_count(),
            height = tree.height(),
            total_weight = tree.total_weight(),
            "built huffman trie"
        );
        Ok(tree)
    }

    fn build_from_heap(&mut self, mut heap: MinHeap<HeapEntry>, mut seq: u32) -> Result<()> {
        while heap.heap_size() > 1 {
            let first = heap.extract_min()?;
            let second = heap.extract_min()?;

            let weight = first.weight + second.weight;

            let id = self.push(HuffNode::Internal {
                weight,
                left: second.id,
                right: first.id,
            });
            heap.insert(HeapEntry { weight, seq, id });
            seq += 1;
        }
        self.root = Some(heap.extract_min()?.id);
        Ok(())
    }

    pub(crate) fn push(&mut self, node: HuffNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// # Panics
    ///
    /// If `id` was not handed out by this tree.
    pub fn node(&self, id: NodeId) -> &HuffNode {
        &self.nodes[id.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Weight of the root, which equals the length of the encoded input.
    pub fn total_weight(&self) -> u64 {
        self.root.map_or(0, |root| self.node(root).weight())
    }

    pub fn leaf_count(&self) -> usize {
        self.preorder().filter(|visit| visit.node.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path; a lone leaf has height 0.
    pub fn height(&self) -> usize {
        self.preorder().map(|visit| visit.depth).max().unwrap_or(0)
    }

    /// `(symbol, weight)` of every leaf, left to right.
    pub fn leaves(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.preorder().filter_map(|visit| match visit.node {
            HuffNode::Leaf { byte, weight } => Some((*byte, *weight)),
            HuffNode::Internal { .. } => None,
        })
    }

    /// Walks the trie root first, left subtree before right.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: self.root.map(|root| (root, 0, Side::Root)).into_iter().collect(),
        }
    }

    /// Human readable dump of the trie, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::from("Huffman Tree Structure:\n");
        if self.is_empty() {
            out.push_str("(empty)\n");
            return out;
        }
        for visit in self.preorder() {
            let indent = "  ".repeat(visit.depth);
            let label = match visit.side {
                Side::Root => "root",
                Side::Left => "L",
                Side::Right => "R",
            };
            let line = match visit.node {
                HuffNode::Leaf { byte, weight } => format!(
                    "{}{}-> Leaf: {:?} ({}) [weight: {}]\n",
                    indent,
                    label,
                    char::from(*byte),
                    byte,
                    weight
                ),
                HuffNode::Internal { weight, .. } => {
                    format!("{}{}-> Internal [weight: {}]\n", indent, label, weight)
                }
            };
            out.push_str(&line);
        }
        out
    }

    /// Checks that every internal weight is the sum of its children.
    pub fn weights_consistent(&self) -> bool {
        self.preorder().all(|visit| match visit.node {
            HuffNode::Leaf { weight, .. } => *weight > 0,
            HuffNode::Internal {
                weight,
                left,
                right,
            } => self
                .node(*left)
                .weight()
                .checked_add(self.node(*right).weight())
                == Some(*weight),
        })
    }
}

/// Structural equality: same shape, same symbols, same weights.
impl PartialEq for HuffmanTree {
    fn eq(&self, other: &Self) -> bool {
        let mut lhs = self.preorder();
        let mut rhs = other.preorder();
        loop {
            match (lhs.next(), rhs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) => {
                    let same = match (a.node, b.node) {
                        (
                            HuffNode::Leaf { byte: x, weight: w1 },
                            HuffNode::Leaf { byte: y, weight: w2 },
                        ) => x == y && w1 == w2,
                        (
                            HuffNode::Internal { weight: w1, .. },
                            HuffNode::Internal { weight: w2, .. },
                        ) => w1 == w2,
                        _ => false,
                    };
                    if !same || a.depth != b.depth {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

impl Eq for HuffmanTree {}

pub struct Preorder<'a> {
    tree: &'a HuffmanTree,
    stack: Vec<(NodeId, usize, Side)>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth, side) = self.stack.pop()?;
        let node = self.tree.node(id);
        if let HuffNode::Internal { left, right, .. } = node {
            self.stack.push((*right, depth + 1, Side::Right));
            self.stack.push((*left, depth + 1, Side::Left));
        }
        Some(Visit {
            id,
            node,
            depth,
            side,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty_input_builds_empty_tree() {
        let tree = HuffmanTree::from_bytes(b"").unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.leaf_count(), 0);
        assert_eq!(tree.total_weight(), 0);
        assert!(tree.root().is_none());
    }

    #[test]
    fn test_single_symbol_is_lone_leaf() {
        let tree = HuffmanTree::from_bytes(b"aaaa").unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root), &HuffNode::Leaf { weight: 4, byte: b'a' });
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_first_removed_goes_right() {
        // a:4 b:1 -> b is extracted first and becomes the right child
        let tree = HuffmanTree::from_bytes(b"aaaab").unwrap();
        let root = tree.root().unwrap();
        match tree.node(root) {
            HuffNode::Internal {
                weight,
                left,
                right,
            } => {
                assert_eq!(*weight, 5);
                assert_eq!(tree.node(*left), &HuffNode::Leaf { weight: 4, byte: b'a' });
                assert_eq!(tree.node(*right), &HuffNode::Leaf { weight: 1, byte: b'b' });
            }
            other => panic!("expected internal root, got {:?}", other),
        }
    }

    #[test]
    fn test_ties_resolve_by_insertion_order() {
        // all weights equal: 'a' (seq 0) leaves the heap first and goes right
        let tree = HuffmanTree::from_bytes(b"abcd").unwrap();
        let leaves: Vec<u8> = tree.leaves().map(|(byte, _)| byte).collect();
        assert_eq!(leaves, b"dcba".to_vec());
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_weights_are_conserved() {
        let text = b"this is an example of a huffman tree";
        let tree = HuffmanTree::from_bytes(text).unwrap();
        assert!(tree.weights_consistent());
        assert_eq!(tree.total_weight(), text.len() as u64);
        assert_eq!(tree.leaves().map(|(_, w)| w).sum::<u64>(), text.len() as u64);
    }

    #[test]
    fn test_building_twice_is_identical() {
        let text = b"mississippi river banks";
        let a = HuffmanTree::from_bytes(text).unwrap();
        let b = HuffmanTree::from_bytes(text).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.render(), b.render());
    }

    #[test]
    #[should_panic]
    fn test_node_from_another_tree_panics() {
        let small = HuffmanTree::from_bytes(b"a").unwrap();
        small.node(NodeId(40));
    }

    #[test]
    fn test_render_lists_every_node() {
        let tree = HuffmanTree::from_bytes(b"aab").unwrap();
        let rendered = tree.render();
        assert!(rendered.contains("root-> Internal [weight: 3]"));
        assert!(rendered.contains("L-> Leaf: 'a' (97) [weight: 2]"));
        assert!(rendered.contains("R-> Leaf: 'b' (98) [weight: 1]"));
    }
}
