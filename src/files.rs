//! File-level compress and decompress.
//!
//! Each call works on in-memory buffers and only creates its output files
//! once the codec has succeeded.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::compressed_data::CompressedData;
use crate::config::ArtifactConfig;
use crate::error::Result;
use crate::huffman_codec::{CodecStats, HuffmanCodec};

#[derive(Debug, Clone)]
pub struct CompressReport {
    pub stats: CodecStats,
    pub payload_path: PathBuf,
    pub trie_path: PathBuf,
}

/// Reads the whole input before touching any artifact, so an input that is
/// itself one of the artifact paths is never truncated before it is read.
/// On a failed write both artifacts are removed.
pub fn compress_file(input: &Path, config: &ArtifactConfig) -> Result<CompressReport> {
    let data = fs::read(input)?;
    let compressed = HuffmanCodec::compress(&data)?;

    fs::create_dir_all(config.out_dir())?;
    let payload_path = config.payload_path();
    let trie_path = config.trie_path();
    if let Err(err) = write_artifacts(&compressed, &payload_path, &trie_path) {
        let _ = fs::remove_file(&payload_path);
        let _ = fs::remove_file(&trie_path);
        return Err(err.into());
    }

    let stats = CodecStats {
        original_len: data.len(),
        payload_len: compressed.payload.len(),
        trie_len: compressed.trie.len(),
    };
    info!(
        input = %input.display(),
        original = stats.original_len,
        payload = stats.payload_len,
        trie = stats.trie_len,
        "compressed"
    );

    Ok(CompressReport {
        stats,
        payload_path,
        trie_path,
    })
}

fn write_artifacts(compressed: &CompressedData, payload: &Path, trie: &Path) -> io::Result<()> {
    let mut payload_sink = BufWriter::new(File::create(payload)?);
    let mut trie_sink = BufWriter::new(File::create(trie)?);
    compressed.write_to(&mut payload_sink, &mut trie_sink)
}

/// Decodes into memory first; `output` is only created once decoding succeeded.
pub fn decompress_file(payload: &Path, trie: &Path, output: &Path) -> Result<CodecStats> {
    let payload_source = BufReader::new(File::open(payload)?);
    let trie_source = BufReader::new(File::open(trie)?);

    let mut decoded = Vec::new();
    let stats = HuffmanCodec::decompress_from(payload_source, trie_source, &mut decoded)?;
    fs::write(output, &decoded)?;

    info!(
        output = %output.display(),
        restored = stats.original_len,
        "decompressed"
    );
    Ok(stats)
}

pub fn load_trie(trie: &Path) -> Result<HuffmanCodec> {
    HuffmanCodec::from_trie_artifact(&fs::read(trie)?)
}
