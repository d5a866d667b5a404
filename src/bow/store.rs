// On-disk artifacts of a prepared corpus.
//
// Layout of a save directory:
//   vocab.json                 JSON array of words, position = id
//   bow_<tag>_tokens.json.gz   per-document token ids, one file per split
//   bow_<tag>_counts.json.gz   per-document counts, same document order
//   manifest.json              run summary (thresholds, seed, sizes)
//
// Split arrays are gzip-compressed JSON. Loading a split re-validates it
// against the stored vocabulary size.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::BowSplit;
use crate::partition::{Split, SplitSizes};
use crate::vocab::{VocabParams, Vocabulary};

pub const VOCAB_FILE: &str = "vocab.json";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Per-split counts recorded in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitSummary {
    pub split: Split,
    pub documents: usize,
    pub tokens: u64,
}

/// Summary of one prepare run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub created_at: DateTime<Utc>,
    pub seed: u64,
    pub params: VocabParams,
    /// Documents that survived cleaning
    pub corpus_documents: usize,
    pub initial_vocab_size: usize,
    pub vocab_size: usize,
    /// Split sizes before empty-document filtering
    pub planned: SplitSizes,
    pub splits: Vec<SplitSummary>,
}

impl Manifest {
    pub fn summary(&self, split: Split) -> Option<&SplitSummary> {
        self.splits.iter().find(|s| s.split == split)
    }
}

pub fn tokens_path(dir: &Path, split: Split) -> PathBuf {
    dir.join(format!("bow_{}_tokens.json.gz", split.tag()))
}

pub fn counts_path(dir: &Path, split: Split) -> PathBuf {
    dir.join(format!("bow_{}_counts.json.gz", split.tag()))
}

/// Create the save directory (and parents) if needed.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create save directory: {}", dir.display()))
}

pub fn save_vocab(dir: &Path, vocab: &Vocabulary) -> Result<()> {
    write_json(&dir.join(VOCAB_FILE), vocab)
}

pub fn load_vocab(dir: &Path) -> Result<Vocabulary> {
    load_vocab_file(&dir.join(VOCAB_FILE))
}

/// Load a vocabulary from an explicit `vocab.json` path.
pub fn load_vocab_file(path: &Path) -> Result<Vocabulary> {
    read_json(path)
}

/// Validate and write both arrays of a split.
pub fn save_split(dir: &Path, split: Split, bow: &BowSplit, vocab_size: usize) -> Result<()> {
    bow.validate(vocab_size)
        .with_context(|| format!("Refusing to save invalid {split} split"))?;
    write_json_gz(&tokens_path(dir, split), &bow.tokens)?;
    write_json_gz(&counts_path(dir, split), &bow.counts)?;
    debug!(split = split.tag(), documents = bow.num_docs(), "Saved split");
    Ok(())
}

/// Read both arrays of a split and validate them against `vocab_size`.
pub fn load_split(dir: &Path, split: Split, vocab_size: usize) -> Result<BowSplit> {
    let bow = BowSplit {
        tokens: read_json_gz(&tokens_path(dir, split))?,
        counts: read_json_gz(&counts_path(dir, split))?,
    };
    bow.validate(vocab_size)
        .with_context(|| format!("Stored {split} split is invalid"))?;
    Ok(bow)
}

pub fn save_manifest(dir: &Path, manifest: &Manifest) -> Result<()> {
    write_json(&dir.join(MANIFEST_FILE), manifest)
}

pub fn load_manifest(dir: &Path) -> Result<Manifest> {
    read_json(&dir.join(MANIFEST_FILE))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_json_gz<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    serde_json::to_writer(&mut encoder, value)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    encoder
        .finish()
        .and_then(|mut w| w.flush())
        .with_context(|| format!("Failed to finish {}", path.display()))?;
    Ok(())
}

fn read_json_gz<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(GzDecoder::new(BufReader::new(file)))
        .with_context(|| format!("Failed to parse {}", path.display()))
}
