use std::fmt;

use crate::frequency::{Symbol, ALPHABET_SIZE};
use crate::hufftree::{HuffNode, HuffmanTree};

/// Bitstring assigned to one symbol, first bit first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Codeword {
    bits: Vec<bool>,
}

impl Codeword {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        other.bits.starts_with(&self.bits)
    }

    fn extended(&self, bit: bool) -> Codeword {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Codeword { bits }
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to codeword mapping derived from a finished trie.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Codeword>>,
}

impl CodeTable {
    /// Assigns every leaf the path leading to it, left edge `0`, right edge `1`.
    ///
    /// A trie made of a single leaf has no edges; that leaf gets the one-bit
    /// codeword `0` so it still occupies space in the payload.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; ALPHABET_SIZE];
        let Some(root) = tree.root() else {
            return CodeTable { codes };
        };

        if let HuffNode::Leaf { byte, .. } = tree.node(root) {
            codes[*byte as usize] = Some(Codeword { bits: vec![false] });
            return CodeTable { codes };
        }

        let mut stack = vec![(root, Codeword::default())];
        while let Some((id, code)) = stack.pop() {
            match tree.node(id) {
                HuffNode::Leaf { byte, .. } => {
                    codes[*byte as usize] = Some(code);
                }
                HuffNode::Internal { left, right, .. } => {
                    stack.push((*right, code.extended(true)));
                    stack.push((*left, code.extended(false)));
                }
            }
        }

        CodeTable { codes }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&Codeword> {
        self.codes[symbol as usize].as_ref()
    }

    /// Assigned codewords in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Codeword)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol as Symbol, code)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    pub fn max_code_len(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Codeword> = self.iter().map(|(_, code)| code).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    /// Number of payload bits needed to encode `data` with this table.
    pub fn encoded_bits(&self, data: &[u8]) -> Option<u64> {
        data.iter()
            .map(|&byte| self.get(byte).map(|code| code.len() as u64))
            .sum()
    }
}
