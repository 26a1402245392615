use std::io;

use thiserror::Error;

use crate::min_heap::HeapErr;

/// Errors produced while compressing or decompressing.
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// A byte source or sink could not be opened, read or written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The trie artifact could not be interpreted.
    #[error("malformed trie artifact at byte {offset}: {reason}")]
    MalformedTrie { offset: usize, reason: &'static str },

    /// The payload ran out of bits before every leaf reached its weight.
    #[error("payload ended after {decoded} of {expected} symbols")]
    TruncatedPayload { expected: u64, decoded: u64 },

    #[error("byte {0:#04x} has no codeword")]
    MissingCode(u8),

    #[error("heap error: {0}")]
    Heap(#[from] HeapErr),
}

impl HuffmanError {
    pub(crate) fn malformed(offset: usize, reason: &'static str) -> Self {
        HuffmanError::MalformedTrie { offset, reason }
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
