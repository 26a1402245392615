use std::io::{self, Write};

/// The two artifacts produced by one compression run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedData {
    /// Concatenated codewords packed MSB first, last byte zero padded.
    pub payload: Vec<u8>,
    /// Serialized trie, see [`crate::trie_format`].
    pub trie: Vec<u8>,
    /// Meaningful bits in `payload`; not persisted.
    pub bit_count: usize,
    pub original_length: usize,
}

impl CompressedData {
    pub fn write_to<P: Write, T: Write>(&self, payload_sink: &mut P, trie_sink: &mut T) -> io::Result<()> {
        payload_sink.write_all(&self.payload)?;
        payload_sink.flush()?;
        trie_sink.write_all(&self.trie)?;
        trie_sink.flush()
    }

    /// Bytes written across both artifacts.
    pub fn stored_len(&self) -> usize {
        self.payload.len() + self.trie.len()
    }

    /// Stored size relative to the input; `0.0` for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.original_length == 0 {
            return 0.0;
        }
        self.stored_len() as f64 / self.original_length as f64
    }
}
