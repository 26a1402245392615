//! `huff`: compress a file into a payload plus trie artifact, and back.
//!
//! ```bash
//! huff compress notes.txt                      # writes ./compressed.bin and ./huffTrieRoot.bin
//! huff compress notes.txt --out-dir build/
//! huff decompress compressed.bin huffTrieRoot.bin notes.out
//! huff inspect huffTrieRoot.bin
//! ```
//!
//! Logging goes through `RUST_LOG` (tracing-subscriber EnvFilter), default
//! `warn,static_huffman=info`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use static_huffman::config::{DEFAULT_PAYLOAD_NAME, DEFAULT_TRIE_NAME};
use static_huffman::files::{compress_file, decompress_file, load_trie};
use static_huffman::ArtifactConfig;

/// Static Huffman compressor.
#[derive(Parser, Debug)]
#[command(name = "huff")]
#[command(about = "Huffman compression with a separate trie artifact")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file into a payload and a trie artifact
    Compress {
        /// File to compress
        input: PathBuf,

        /// Directory receiving both artifacts
        #[arg(long, default_value = ".", env = "HUFF_OUT_DIR")]
        out_dir: PathBuf,

        /// File name of the packed payload
        #[arg(long, default_value = DEFAULT_PAYLOAD_NAME, env = "HUFF_PAYLOAD_NAME")]
        payload_name: String,

        /// File name of the serialized trie
        #[arg(long, default_value = DEFAULT_TRIE_NAME, env = "HUFF_TRIE_NAME")]
        trie_name: String,
    },
    /// Restore the original file from a payload and its trie artifact
    Decompress {
        payload: PathBuf,
        trie: PathBuf,
        output: PathBuf,
    },
    /// Print the structure and code table of a trie artifact
    Inspect { trie: PathBuf },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,static_huffman=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Command::Compress {
            input,
            out_dir,
            payload_name,
            trie_name,
        } => {
            let config = ArtifactConfig {
                out_dir,
                payload_name,
                trie_name,
            };
            let report = compress_file(&input, &config)
                .with_context(|| format!("failed to compress {}", input.display()))?;
            println!(
                "{} -> {} ({} bytes) + {} ({} bytes)",
                input.display(),
                report.payload_path.display(),
                report.stats.payload_len,
                report.trie_path.display(),
                report.stats.trie_len
            );
            info!(elapsed = ?start.elapsed(), "compress finished");
        }
        Command::Decompress {
            payload,
            trie,
            output,
        } => {
            let stats = decompress_file(&payload, &trie, &output).with_context(|| {
                format!(
                    "failed to decompress {} with trie {}",
                    payload.display(),
                    trie.display()
                )
            })?;
            println!("{} ({} bytes)", output.display(), stats.original_len);
            info!(elapsed = ?start.elapsed(), "decompress finished");
        }
        Command::Inspect { trie } => {
            let codec = load_trie(&trie)
                .with_context(|| format!("failed to read trie {}", trie.display()))?;
            print!("{}", codec.tree().render());
            println!(
                "leaves: {}  height: {}  total weight: {}",
                codec.tree().leaf_count(),
                codec.tree().height(),
                codec.tree().total_weight()
            );
            for (symbol, code) in codec.table().iter() {
                println!("{:3} {:?}\t{}", symbol, char::from(symbol), code);
            }
        }
    }

    Ok(())
}
