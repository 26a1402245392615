use std::path::{Path, PathBuf};

pub const DEFAULT_PAYLOAD_NAME: &str = "compressed.bin";
pub const DEFAULT_TRIE_NAME: &str = "huffTrieRoot.bin";

/// Where `compress` puts its two artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactConfig {
    pub out_dir: PathBuf,
    pub payload_name: String,
    pub trie_name: String,
}

impl ArtifactConfig {
    pub fn in_dir(out_dir: impl Into<PathBuf>) -> Self {
        ArtifactConfig {
            out_dir: out_dir.into(),
            ..Default::default()
        }
    }

    pub fn payload_path(&self) -> PathBuf {
        self.out_dir.join(&self.payload_name)
    }

    pub fn trie_path(&self) -> PathBuf {
        self.out_dir.join(&self.trie_name)
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        ArtifactConfig {
            out_dir: PathBuf::from("."),
            payload_name: DEFAULT_PAYLOAD_NAME.to_string(),
            trie_name: DEFAULT_TRIE_NAME.to_string(),
        }
    }
}
