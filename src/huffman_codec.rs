use std::io::{Read, Write};

use tracing::{debug, trace};

use crate::bit_vec::{BitVec, Bits};
use crate::code_table::CodeTable;
use crate::compressed_data::CompressedData;
use crate::error::{HuffmanError, Result};
use crate::frequency::{Symbol, ALPHABET_SIZE};
use crate::hufftree::{HuffNode, HuffmanTree};

/// Encoder and decoder bound to one trie.
pub struct HuffmanCodec {
    tree: HuffmanTree,
    table: CodeTable,
}

/// Sizes observed by [`HuffmanCodec::compress_to`] and
/// [`HuffmanCodec::decompress_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecStats {
    pub original_len: usize,
    pub payload_len: usize,
    pub trie_len: usize,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree) -> Self {
        let table = CodeTable::from_tree(&tree);
        HuffmanCodec { tree, table }
    }

    /// Analyses `data` and builds the codec that compresses it.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self::new(HuffmanTree::from_bytes(data)?))
    }

    pub fn from_trie_artifact(artifact: &[u8]) -> Result<Self> {
        Ok(Self::new(HuffmanTree::deserialize(artifact)?))
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn encode(&self, data: &[u8]) -> Result<CompressedData> {
        let capacity = self.table.encoded_bits(data).unwrap_or(0) as usize;
        let mut bit_vec = BitVec::with_bit_capacity(capacity);
        for &byte in data {
            let code = self.table.get(byte).ok_or(HuffmanError::MissingCode(byte))?;
            bit_vec.push_codeword(code);
        }

        let trie = self.tree.serialize();
        debug!(
            input = data.len(),
            bits = bit_vec.bit_count(),
            trie = trie.len(),
            "encoded payload"
        );

        Ok(CompressedData {
            bit_count: bit_vec.bit_count(),
            payload: bit_vec.into_bytes(),
            trie,
            original_length: data.len(),
        })
    }

    /// Walks the trie bit by bit over the whole payload.
    ///
    /// Padding bits in the last byte can trace a path to a leaf. Every leaf
    /// carries the number of times its symbol occurs in the input, so once a
    /// symbol has been emitted that many times further hits on it are dropped.
    pub fn decode(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let Some(root) = self.tree.root() else {
            if !payload.is_empty() {
                debug!(bytes = payload.len(), "empty trie, ignoring payload");
            }
            return Ok(Vec::new());
        };

        let expected = self.tree.total_weight();
        // A corrupt artifact can claim any weight; one bit emits at most one symbol.
        let capacity = expected.min(payload.len() as u64 * 8) as usize;
        let mut sink = Emitter::with_capacity(capacity);

        match self.tree.node(root) {
            // No edges to follow: every bit is one `0` codeword.
            HuffNode::Leaf { byte, weight } => {
                for _ in Bits::new(payload) {
                    sink.emit(*byte, *weight);
                }
            }
            HuffNode::Internal { .. } => {
                let mut cursor = root;
                for bit in Bits::new(payload) {
                    cursor = match self.tree.node(cursor) {
                        HuffNode::Internal { left, right, .. } => {
                            if bit {
                                *right
                            } else {
                                *left
                            }
                        }
                        HuffNode::Leaf { .. } => root,
                    };
                    if let HuffNode::Leaf { byte, weight } = self.tree.node(cursor) {
                        sink.emit(*byte, *weight);
                        cursor = root;
                    }
                }
            }
        }

        if sink.suppressed > 0 {
            trace!(suppressed = sink.suppressed, "dropped padding emissions");
        }
        let decoded = sink.out.len() as u64;
        if decoded < expected {
            return Err(HuffmanError::TruncatedPayload { expected, decoded });
        }
        Ok(sink.out)
    }

    /// Encodes `data` with a trie built from its own frequencies.
    pub fn compress(data: &[u8]) -> Result<CompressedData> {
        HuffmanCodec::from_bytes(data)?.encode(data)
    }

    pub fn decompress(payload: &[u8], trie: &[u8]) -> Result<Vec<u8>> {
        HuffmanCodec::from_trie_artifact(trie)?.decode(payload)
    }

    /// Reads all of `source`, then writes the payload and the trie artifact
    /// to their sinks. The readers and writers are held only for this call.
    pub fn compress_to<R: Read, P: Write, T: Write>(
        mut source: R,
        mut payload_sink: P,
        mut trie_sink: T,
    ) -> Result<CodecStats> {
        let mut data = Vec::new();
        source.read_to_end(&mut data)?;

        let compressed = HuffmanCodec::compress(&data)?;
        compressed.write_to(&mut payload_sink, &mut trie_sink)?;

        Ok(CodecStats {
            original_len: data.len(),
            payload_len: compressed.payload.len(),
            trie_len: compressed.trie.len(),
        })
    }

    /// Reads the trie artifact first so a malformed one aborts before anything
    /// reaches `sink`; output is written only once decoding has succeeded.
    pub fn decompress_from<P: Read, T: Read, W: Write>(
        mut payload_source: P,
        mut trie_source: T,
        mut sink: W,
    ) -> Result<CodecStats> {
        let mut trie = Vec::new();
        trie_source.read_to_end(&mut trie)?;
        let codec = HuffmanCodec::from_trie_artifact(&trie)?;

        let mut payload = Vec::new();
        payload_source.read_to_end(&mut payload)?;
        let decoded = codec.decode(&payload)?;

        sink.write_all(&decoded)?;
        sink.flush()?;

        Ok(CodecStats {
            original_len: decoded.len(),
            payload_len: payload.len(),
            trie_len: trie.len(),
        })
    }
}

/// Output buffer that caps each symbol at its leaf weight.
struct Emitter {
    counts: [u64; ALPHABET_SIZE],
    out: Vec<u8>,
    suppressed: u64,
}

impl Emitter {
    fn with_capacity(capacity: usize) -> Self {
        Emitter {
            counts: [0; ALPHABET_SIZE],
            out: Vec::with_capacity(capacity),
            suppressed: 0,
        }
    }

    fn emit(&mut self, byte: Symbol, weight: u64) {
        let count = &mut self.counts[byte as usize];
        if *count < weight {
            *count += 1;
            self.out.push(byte);
        } else {
            self.suppressed += 1;
        }
    }
}
