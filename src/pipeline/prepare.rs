// Corpus preparation pipeline: raw text in, bag-of-words artifacts out.
//
// Stages:
//   1. Clean the corpus into documents
//   2. Build the initial (frequency-filtered) vocabulary
//   3. Permute and partition; re-derive the vocabulary from the train split
//   4. Encode each split as sparse token/count records
//   5. Persist vocabulary, splits and manifest
//
// Everything is materialized in memory and written once at the end. A run
// either completes or fails with the first error; there is no partial output
// to resume from.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use tracing::info;

use crate::bow::store::{self, Manifest, SplitSummary};
use crate::bow::BowSplit;
use crate::corpus::cleaner::{self, CleanOptions};
use crate::corpus::stopwords::StopWords;
use crate::partition::{Partition, Split};
use crate::vocab::{InitialVocabulary, VocabParams, Vocabulary};

/// Knobs for one prepare run.
#[derive(Debug, Clone, Default)]
pub struct PrepareOptions {
    pub params: VocabParams,
    /// Permutation seed; drawn at random (and recorded) when absent
    pub seed: Option<u64>,
    pub clean: CleanOptions,
}

/// A fully prepared corpus held in memory.
#[derive(Debug, Clone)]
pub struct PreparedCorpus {
    pub vocab: Vocabulary,
    /// One entry per split, in `Split::ALL` order
    pub splits: Vec<(Split, BowSplit)>,
    pub manifest: Manifest,
}

impl PreparedCorpus {
    pub fn split(&self, split: Split) -> Option<&BowSplit> {
        self.splits
            .iter()
            .find(|(s, _)| *s == split)
            .map(|(_, bow)| bow)
    }
}

/// Run stages 2-4 over already-cleaned documents.
pub fn prepare_documents(
    docs: &[String],
    options: &PrepareOptions,
    stopwords: &StopWords,
) -> Result<PreparedCorpus> {
    let initial = InitialVocabulary::build(docs, &options.params, stopwords)
        .context("Failed to build the initial vocabulary")?;

    let seed = options.seed.unwrap_or_else(|| rand::rng().random());
    info!(seed, documents = docs.len(), "Partitioning corpus");
    let partition = Partition::build(docs, &initial, seed);

    let vocab_size = partition.vocab.len();
    let mut splits = Vec::with_capacity(Split::ALL.len());
    let mut summaries = Vec::with_capacity(Split::ALL.len());
    for split in Split::ALL {
        let bow = BowSplit::encode(partition.docs(split), vocab_size)
            .with_context(|| format!("Failed to encode {split} split"))?;
        summaries.push(SplitSummary {
            split,
            documents: bow.num_docs(),
            tokens: bow.total_tokens(),
        });
        info!(
            split = split.tag(),
            documents = bow.num_docs(),
            tokens = bow.total_tokens(),
            "Encoded split"
        );
        splits.push((split, bow));
    }

    let manifest = Manifest {
        created_at: Utc::now(),
        seed,
        params: options.params,
        corpus_documents: initial.num_docs(),
        initial_vocab_size: initial.len(),
        vocab_size,
        planned: partition.sizes,
        splits: summaries,
    };

    Ok(PreparedCorpus {
        vocab: partition.vocab,
        splits,
        manifest,
    })
}

/// Persist a prepared corpus into `save_dir`, creating it if needed.
pub fn save(prepared: &PreparedCorpus, save_dir: &Path) -> Result<()> {
    store::ensure_dir(save_dir)?;
    store::save_vocab(save_dir, &prepared.vocab)?;

    let vocab_size = prepared.vocab.len();
    let pb = ProgressBar::new(prepared.splits.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Saving [{bar:30}] {pos}/{len} {msg}")
            .unwrap(),
    );
    for (split, bow) in &prepared.splits {
        pb.set_message(split.tag());
        store::save_split(save_dir, *split, bow, vocab_size)?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    store::save_manifest(save_dir, &prepared.manifest)?;
    info!(dir = %save_dir.display(), "Saved prepared corpus");
    Ok(())
}

/// Read a corpus file, prepare it, and write every artifact to `save_dir`.
pub fn process_data(
    corpus_path: &Path,
    save_dir: &Path,
    options: &PrepareOptions,
    stopwords: &StopWords,
) -> Result<PreparedCorpus> {
    let docs = cleaner::read_corpus(corpus_path, &options.clean)?;
    let prepared = prepare_documents(&docs, options, stopwords)?;
    save(&prepared, save_dir)?;
    Ok(prepared)
}
