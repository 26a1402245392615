//! Persisted form of the trie.
//!
//! The artifact is a preorder walk, left subtree before right. Every node
//! starts with a tag byte:
//!
//! | tag    | meaning  | payload                                  |
//! |--------|----------|------------------------------------------|
//! | `0x00` | internal | none, the two children follow            |
//! | `0x01` | leaf     | symbol byte, then weight as `u64` LE     |
//!
//! The trie of an empty input serializes to zero bytes. Internal weights are
//! not stored; they are recomputed from the leaves when reading.

use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::frequency::ALPHABET_SIZE;
use crate::hufftree::{HuffNode, HuffmanTree, NodeId};

pub const TAG_INTERNAL: u8 = 0x00;
pub const TAG_LEAF: u8 = 0x01;

const LEAF_LEN: usize = 1 + 1 + 8;
const MAX_INTERNAL_NODES: usize = ALPHABET_SIZE - 1;

/// An internal node whose children are still being read.
struct Pending {
    offset: usize,
    left: Option<NodeId>,
}

impl HuffmanTree {
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.leaf_count() * (LEAF_LEN + 1));
        for visit in self.preorder() {
            match visit.node {
                HuffNode::Internal { .. } => bytes.push(TAG_INTERNAL),
                HuffNode::Leaf { byte, weight } => {
                    bytes.push(TAG_LEAF);
                    bytes.push(*byte);
                    bytes.extend_from_slice(&weight.to_le_bytes());
                }
            }
        }
        bytes
    }

    /// Rebuilds a trie from its artifact, rejecting anything that is not
    /// exactly one well formed tree.
    pub fn deserialize(data: &[u8]) -> Result<HuffmanTree> {
        let mut tree = HuffmanTree::default();
        if data.is_empty() {
            return Ok(tree);
        }

        let mut pending: Vec<Pending> = Vec::new();
        let mut seen = [false; ALPHABET_SIZE];
        let mut internal_nodes = 0usize;
        let mut pos = 0usize;

        loop {
            let offset = pos;
            let tag = *data
                .get(pos)
                .ok_or_else(|| HuffmanError::malformed(offset, "tree ends before all children"))?;
            pos += 1;

            let mut completed = match tag {
                TAG_INTERNAL => {
                    internal_nodes += 1;
                    if internal_nodes > MAX_INTERNAL_NODES {
                        return Err(HuffmanError::malformed(offset, "too many internal nodes"));
                    }
                    pending.push(Pending { offset, left: None });
                    continue;
                }
                TAG_LEAF => {
                    let body = data
                        .get(pos..offset + LEAF_LEN)
                        .ok_or_else(|| HuffmanError::malformed(offset, "truncated leaf"))?;
                    pos = offset + LEAF_LEN;

                    let byte = body[0];
                    let mut weight_bytes = [0u8; 8];
                    weight_bytes.copy_from_slice(&body[1..]);
                    let weight = u64::from_le_bytes(weight_bytes);

                    if weight == 0 {
                        return Err(HuffmanError::malformed(offset, "leaf with zero weight"));
                    }
                    if std::mem::replace(&mut seen[byte as usize], true) {
                        return Err(HuffmanError::malformed(offset, "symbol appears in two leaves"));
                    }
                    tree.push(HuffNode::Leaf { weight, byte })
                }
                _ => return Err(HuffmanError::malformed(offset, "unknown node tag")),
            };

            // Hang the finished subtree on its parent, closing every parent
            // whose right child this completes.
            loop {
                match pending.pop() {
                    None => {
                        if pos != data.len() {
                            return Err(HuffmanError::malformed(pos, "trailing bytes after tree"));
                        }
                        tree.set_root(completed);
                        debug!(
                            bytes = data.len(),
                            leaves = tree.leaf_count(),
                            "read trie artifact"
                        );
                        return Ok(tree);
                    }
                    Some(Pending { offset, left: None }) => {
                        pending.push(Pending {
                            offset,
                            left: Some(completed),
                        });
                        break;
                    }
                    Some(Pending {
                        offset,
                        left: Some(left),
                    }) => {
                        let weight = tree
                            .node(left)
                            .weight()
                            .checked_add(tree.node(completed).weight())
                            .ok_or_else(|| {
                                HuffmanError::malformed(offset, "internal weight overflows")
                            })?;
                        completed = tree.push(HuffNode::Internal {
                            weight,
                            left,
                            right: completed,
                        });
                    }
                }
            }
        }
    }
}
