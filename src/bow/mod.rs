// Bag-of-words encoding.
//
// A split's token-id sequences are flattened to (document, token) pairs and
// assembled into a compressed sparse row matrix. Coincident pairs are summed:
// a word that appears three times in a document becomes one entry with value
// three. Each row is then read back as two parallel sequences: ascending
// token ids and their counts, which is the persisted form of a split.

pub mod store;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sprs::{CsMat, TriMat};

/// Sparse documents × vocabulary count matrix in CSR layout.
#[derive(Debug, Clone)]
pub struct BowMatrix {
    matrix: CsMat<u32>,
}

impl BowMatrix {
    /// Build from coordinate pairs, summing duplicates.
    ///
    /// Every document index must be `< num_docs` and every token id
    /// `< vocab_size`.
    pub fn from_pairs(
        doc_indices: &[usize],
        words: &[u32],
        num_docs: usize,
        vocab_size: usize,
    ) -> Result<Self> {
        if doc_indices.len() != words.len() {
            anyhow::bail!(
                "Coordinate arrays differ in length: {} document indices vs {} words",
                doc_indices.len(),
                words.len()
            );
        }

        let mut triplets: TriMat<u32> = TriMat::new((num_docs, vocab_size));
        for (&doc, &word) in doc_indices.iter().zip(words) {
            if doc >= num_docs {
                anyhow::bail!("Document index {doc} out of range for {num_docs} documents");
            }
            if word as usize >= vocab_size {
                anyhow::bail!("Token id {word} out of range for vocabulary of size {vocab_size}");
            }
            triplets.add_triplet(doc, word as usize, 1);
        }

        // Coincident triplets are summed by the CSR conversion.
        Ok(Self {
            matrix: triplets.to_csr(),
        })
    }

    /// Build from per-document token-id sequences.
    pub fn from_docs(docs: &[Vec<u32>], vocab_size: usize) -> Result<Self> {
        let (doc_indices, words) = flatten(docs);
        Self::from_pairs(&doc_indices, &words, docs.len(), vocab_size)
    }

    pub fn num_docs(&self) -> usize {
        self.matrix.rows()
    }

    pub fn vocab_size(&self) -> usize {
        self.matrix.cols()
    }

    /// Number of stored (nonzero) entries.
    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    /// Token ids (ascending) and counts of one document.
    pub fn row(&self, doc: usize) -> (Vec<u32>, Vec<u32>) {
        match self.matrix.outer_view(doc) {
            Some(row) => (
                row.indices().iter().map(|&id| id as u32).collect(),
                row.data().to_vec(),
            ),
            None => (Vec::new(), Vec::new()),
        }
    }

    /// Split every row into parallel token and count sequences.
    pub fn to_split(&self) -> BowSplit {
        let (tokens, counts): (Vec<Vec<u32>>, Vec<Vec<u32>>) =
            (0..self.num_docs()).map(|d| self.row(d)).unzip();
        BowSplit { tokens, counts }
    }
}

/// Flatten documents into parallel (document index, token id) arrays.
pub fn flatten(docs: &[Vec<u32>]) -> (Vec<usize>, Vec<u32>) {
    docs.iter()
        .enumerate()
        .flat_map(|(d, doc)| doc.iter().map(move |&w| (d, w)))
        .unzip()
}

/// The persisted form of one split: per-document token ids and counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BowSplit {
    pub tokens: Vec<Vec<u32>>,
    pub counts: Vec<Vec<u32>>,
}

impl BowSplit {
    /// Encode token-id sequences through the sparse matrix.
    pub fn encode(docs: &[Vec<u32>], vocab_size: usize) -> Result<Self> {
        Ok(BowMatrix::from_docs(docs, vocab_size)?.to_split())
    }

    pub fn num_docs(&self) -> usize {
        self.tokens.len()
    }

    /// Total token occurrences across the split.
    pub fn total_tokens(&self) -> u64 {
        self.counts
            .iter()
            .flat_map(|c| c.iter())
            .map(|&c| c as u64)
            .sum()
    }

    /// Check the structural invariants against a vocabulary of `vocab_size`.
    ///
    /// Token and count arrays must pair up document by document, ids must be
    /// strictly ascending and `< vocab_size`, counts positive, and no
    /// document may be empty.
    pub fn validate(&self, vocab_size: usize) -> Result<()> {
        if self.tokens.len() != self.counts.len() {
            anyhow::bail!(
                "Split has {} token rows but {} count rows",
                self.tokens.len(),
                self.counts.len()
            );
        }
        for (d, (tokens, counts)) in self.tokens.iter().zip(&self.counts).enumerate() {
            if tokens.len() != counts.len() {
                anyhow::bail!(
                    "Document {d} has {} token ids but {} counts",
                    tokens.len(),
                    counts.len()
                );
            }
            if tokens.is_empty() {
                anyhow::bail!("Document {d} is empty");
            }
            if let Some(&id) = tokens.iter().find(|&&id| id as usize >= vocab_size) {
                anyhow::bail!(
                    "Document {d} has token id {id} outside vocabulary of size {vocab_size}"
                );
            }
            if tokens.windows(2).any(|w| w[0] >= w[1]) {
                anyhow::bail!("Document {d} token ids are not strictly ascending");
            }
            if counts.contains(&0) {
                anyhow::bail!("Document {d} has a zero count");
            }
        }
        Ok(())
    }
}
