//! Symbol alphabet and per-symbol occurrence counts.

/// One input byte.
pub type Symbol = u8;

/// Number of distinct values a [`Symbol`] can take.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence counts for every byte value seen in an input.
///
/// Counts are kept in a dense table indexed by symbol, but only symbols with a
/// non-zero count are ever reported, so iteration yields exactly the observed
/// subset of the alphabet in ascending symbol order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
    distinct: usize,
    total: u64,
}

impl FrequencyTable {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut counts = [0u64; ALPHABET_SIZE];
        for &byte in bytes {
            counts[byte as usize] += 1;
        }
        let distinct = counts.iter().filter(|&&c| c > 0).count();

        FrequencyTable {
            counts,
            distinct,
            total: bytes.len() as u64,
        }
    }

    pub fn count(&self, symbol: Symbol) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols observed.
    pub fn distinct(&self) -> usize {
        self.distinct
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, &count)| (symbol as Symbol, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        FrequencyTable::from_bytes(&[])
    }
}

impl From<&[u8]> for FrequencyTable {
    fn from(bytes: &[u8]) -> Self {
        FrequencyTable::from_bytes(bytes)
    }
}
