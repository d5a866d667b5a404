// Initial vocabulary construction.
//
// Counts, for every candidate word, how many documents contain it (a word
// repeated inside one document counts once). Stopwords never become
// candidates. Words outside the [min_df, max_df] document-frequency band are
// pruned, and the survivors are ordered by ascending document frequency.
//
// This is only the first pass: the final vocabulary is re-derived from the
// train split once the partition is known (see `from_train_split`).

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::vocabulary::Vocabulary;
use crate::corpus::stopwords::StopWords;

/// A document-frequency threshold: a proportion of documents or an absolute count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocFrequency {
    Proportion(f64),
    Count(usize),
}

impl DocFrequency {
    /// The threshold expressed as a document count for a corpus of `num_docs`.
    pub fn as_count(&self, num_docs: usize) -> f64 {
        match *self {
            DocFrequency::Proportion(p) => p * num_docs as f64,
            DocFrequency::Count(c) => c as f64,
        }
    }
}

impl FromStr for DocFrequency {
    type Err = anyhow::Error;

    /// `"0.9"` is a proportion, `"1"` is a count.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.contains('.') {
            let p: f64 = s
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid document-frequency proportion {s:?}: {e}"))?;
            if !(0.0..=1.0).contains(&p) {
                anyhow::bail!("Document-frequency proportion must be within [0.0, 1.0], got {p}");
            }
            Ok(DocFrequency::Proportion(p))
        } else {
            let c: usize = s
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid document-frequency count {s:?}: {e}"))?;
            Ok(DocFrequency::Count(c))
        }
    }
}

impl fmt::Display for DocFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocFrequency::Proportion(p) => write!(f, "{p:?}"),
            DocFrequency::Count(c) => write!(f, "{c}"),
        }
    }
}

/// Frequency band for vocabulary candidates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VocabParams {
    pub max_df: DocFrequency,
    pub min_df: DocFrequency,
}

impl Default for VocabParams {
    fn default() -> Self {
        Self {
            max_df: DocFrequency::Proportion(0.9),
            min_df: DocFrequency::Count(1),
        }
    }
}

/// First-pass vocabulary: frequency-filtered words, ascending by document frequency.
#[derive(Debug, Clone)]
pub struct InitialVocabulary {
    words: Vec<String>,
    doc_freq: Vec<usize>,
    positions: HashMap<String, usize>,
    num_docs: usize,
}

impl InitialVocabulary {
    /// Count document frequencies over `docs` and apply the thresholds.
    ///
    /// Fails if there are no documents, if the thresholds are inverted, or
    /// if no word survives pruning.
    pub fn build(docs: &[String], params: &VocabParams, stopwords: &StopWords) -> Result<Self> {
        if docs.is_empty() {
            anyhow::bail!("No documents survived cleaning (cannot build a vocabulary)");
        }

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for doc in docs {
            let present: HashSet<&str> = doc
                .split_whitespace()
                .filter(|w| !stopwords.contains(w))
                .collect();
            for word in present {
                *doc_freq.entry(word).or_insert(0) += 1;
            }
        }
        let candidates = doc_freq.len();

        let num_docs = docs.len();
        let max_count = params.max_df.as_count(num_docs);
        let min_count = params.min_df.as_count(num_docs);
        if max_count < min_count {
            anyhow::bail!(
                "max_df ({}) corresponds to fewer documents than min_df ({})",
                params.max_df,
                params.min_df
            );
        }

        let mut kept: Vec<(&str, usize)> = doc_freq
            .into_iter()
            .filter(|&(_, df)| (df as f64) >= min_count && (df as f64) <= max_count)
            .collect();

        if kept.is_empty() {
            anyhow::bail!(
                "After pruning, no terms remain ({candidates} candidates, {num_docs} documents); \
                 try a lower min_df or a higher max_df"
            );
        }

        // Alphabetical first so the stable frequency sort has a fixed tie order.
        kept.sort_unstable_by(|a, b| a.0.cmp(b.0));
        kept.sort_by_key(|&(_, df)| df);

        let (words, doc_freq): (Vec<String>, Vec<usize>) = kept
            .into_iter()
            .filter(|(w, _)| !stopwords.contains(w))
            .map(|(w, df)| (w.to_string(), df))
            .unzip();

        let positions = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();

        info!(
            candidates,
            initial_size = words.len(),
            documents = num_docs,
            "Built initial vocabulary"
        );

        Ok(Self {
            words,
            doc_freq,
            positions,
            num_docs,
        })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.positions.contains_key(word)
    }

    /// Document frequency of a word, if it survived pruning.
    pub fn doc_frequency(&self, word: &str) -> Option<usize> {
        self.positions.get(word).map(|&i| self.doc_freq[i])
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    /// Restrict to the words that occur in the train documents.
    ///
    /// The result keeps this vocabulary's ordering and assigns fresh
    /// contiguous ids.
    pub fn from_train_split<'a, I>(&self, train_docs: I) -> Vocabulary
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = vec![false; self.words.len()];
        for doc in train_docs {
            for word in doc.split_whitespace() {
                if let Some(&pos) = self.positions.get(word) {
                    seen[pos] = true;
                }
            }
        }

        Vocabulary::from_words(
            self.words
                .iter()
                .zip(seen)
                .filter(|(_, seen)| *seen)
                .map(|(w, _)| w.as_str()),
        )
    }
}
