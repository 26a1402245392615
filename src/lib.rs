//! # static_huffman
//!
//! Static Huffman compression that writes two artifacts: the packed payload
//! and the trie needed to decode it.
//!
//! ## Quick Start
//!
//! ```rust
//! use static_huffman::HuffmanCodec;
//!
//! let data = b"abracadabra";
//! let compressed = HuffmanCodec::compress(data)?;
//!
//! let restored = HuffmanCodec::decompress(&compressed.payload, &compressed.trie)?;
//! assert_eq!(restored, data);
//! # Ok::<(), static_huffman::HuffmanError>(())
//! ```
//!
//! The payload does not record its bit length. The decoder stops each symbol
//! at the count stored in its leaf, which discards whatever the zero padding
//! of the final byte happens to decode to.

pub mod code_table;
pub mod compressed_data;
pub mod config;
pub mod error;
pub mod files;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod trie_format;

// Internal modules - not part of public API
mod bit_vec;
mod min_heap;

// Re-export main types for convenience
pub use code_table::{CodeTable, Codeword};
pub use compressed_data::CompressedData;
pub use config::ArtifactConfig;
pub use error::{HuffmanError, Result};
pub use frequency::{FrequencyTable, Symbol};
pub use huffman_codec::{CodecStats, HuffmanCodec};
pub use hufftree::{HuffNode, HuffmanTree};
