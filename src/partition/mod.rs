// Corpus partitioning: train/test/validation splits and test halves.
//
// Documents are permuted with a seeded RNG, cut 85/10/5, and encoded against
// a vocabulary derived from the train split alone. Test and validation words
// the train split never saw are dropped. Empty documents are removed from
// every split, single-token test documents are removed too (they cannot be
// halved), and each test document is cut at its midpoint into the two halves
// used for document-completion evaluation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::vocab::{InitialVocabulary, Vocabulary};

pub const TRAIN_FRACTION: f64 = 0.85;
pub const TEST_FRACTION: f64 = 0.10;

/// A named partition of the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Train,
    Test,
    TestHalf1,
    TestHalf2,
    Valid,
}

impl Split {
    pub const ALL: [Split; 5] = [
        Split::Train,
        Split::Test,
        Split::TestHalf1,
        Split::TestHalf2,
        Split::Valid,
    ];

    /// Short tag used in artifact file names.
    pub fn tag(&self) -> &'static str {
        match self {
            Split::Train => "tr",
            Split::Test => "ts",
            Split::TestHalf1 => "ts_h1",
            Split::TestHalf2 => "ts_h2",
            Split::Valid => "va",
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Split::Train => "train",
            Split::Test => "test",
            Split::TestHalf1 => "test (half 1)",
            Split::TestHalf2 => "test (half 2)",
            Split::Valid => "validation",
        };
        f.write_str(name)
    }
}

/// Document counts per split before any filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSizes {
    pub train: usize,
    pub test: usize,
    pub valid: usize,
}

impl SplitSizes {
    /// `floor(0.85 N)` train, `floor(0.10 N)` test, remainder validation.
    pub fn for_docs(num_docs: usize) -> Self {
        let train = (TRAIN_FRACTION * num_docs as f64).floor() as usize;
        let test = (TEST_FRACTION * num_docs as f64).floor() as usize;
        Self {
            train,
            test,
            valid: num_docs - train - test,
        }
    }

    pub fn total(&self) -> usize {
        self.train + self.test + self.valid
    }
}

/// Encoded splits plus the train-derived vocabulary they refer to.
#[derive(Debug, Clone)]
pub struct Partition {
    pub vocab: Vocabulary,
    pub sizes: SplitSizes,
    pub seed: u64,
    pub train: Vec<Vec<u32>>,
    pub test: Vec<Vec<u32>>,
    pub test_h1: Vec<Vec<u32>>,
    pub test_h2: Vec<Vec<u32>>,
    pub valid: Vec<Vec<u32>>,
}

impl Partition {
    /// Partition `docs` with a permutation drawn from `seed`.
    pub fn build(docs: &[String], initial: &InitialVocabulary, seed: u64) -> Self {
        let sizes = SplitSizes::for_docs(docs.len());
        let order = permutation(docs.len(), seed);

        let (train_idx, rest) = order.split_at(sizes.train);
        let (test_idx, valid_idx) = rest.split_at(sizes.test);

        let vocab = initial.from_train_split(train_idx.iter().map(|&i| docs[i].as_str()));
        info!(
            initial_size = initial.len(),
            final_size = vocab.len(),
            "Restricted vocabulary to words in the train split"
        );

        let encode = |idx: &[usize]| -> Vec<Vec<u32>> {
            idx.iter().map(|&i| vocab.encode(&docs[i])).collect()
        };
        let mut train = encode(train_idx);
        let mut test = encode(test_idx);
        let mut valid = encode(valid_idx);

        remove_empty(&mut train, Split::Train);
        remove_empty(&mut test, Split::Test);
        remove_empty(&mut valid, Split::Valid);

        let before = test.len();
        test.retain(|doc| doc.len() > 1);
        if test.len() < before {
            info!(
                removed = before - test.len(),
                "Removed single-token test documents"
            );
        }

        let (test_h1, test_h2): (Vec<_>, Vec<_>) =
            test.iter().map(|doc| split_halves(doc)).unzip();

        let partition = Self {
            vocab,
            sizes,
            seed,
            train,
            test,
            test_h1,
            test_h2,
            valid,
        };
        for split in Split::ALL {
            if partition.docs(split).is_empty() {
                warn!(split = split.tag(), "Split is empty after filtering");
            }
        }
        partition
    }

    pub fn docs(&self, split: Split) -> &[Vec<u32>] {
        match split {
            Split::Train => &self.train,
            Split::Test => &self.test,
            Split::TestHalf1 => &self.test_h1,
            Split::TestHalf2 => &self.test_h2,
            Split::Valid => &self.valid,
        }
    }
}

/// A permutation of `[0, n)` drawn from a seeded RNG.
pub fn permutation(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);
    order
}

/// Cut a document at its midpoint.
///
/// The first half holds positions `i` with `i <= len/2 - 1`, i.e. the first
/// `floor(len/2)` tokens; the second half holds the rest.
pub fn split_halves(doc: &[u32]) -> (Vec<u32>, Vec<u32>) {
    let (h1, h2) = doc.split_at(doc.len() / 2);
    (h1.to_vec(), h2.to_vec())
}

fn remove_empty(docs: &mut Vec<Vec<u32>>, split: Split) {
    let before = docs.len();
    docs.retain(|doc| !doc.is_empty());
    if docs.len() < before {
        info!(
            split = split.tag(),
            removed = before - docs.len(),
            "Removed empty documents"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes() {
        assert_eq!(
            SplitSizes::for_docs(100),
            SplitSizes {
                train: 85,
                test: 10,
                valid: 5
            }
        );
        assert_eq!(
            SplitSizes::for_docs(7),
            SplitSizes {
                train: 5,
                test: 0,
                valid: 2
            }
        );
        assert_eq!(SplitSizes::for_docs(0).total(), 0);
    }

    #[test]
    fn test_permutation_is_seeded() {
        let a = permutation(50, 7);
        let b = permutation(50, 7);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_halves_even() {
        let (h1, h2) = split_halves(&[1, 2, 3, 4]);
        assert_eq!(h1, vec![1, 2]);
        assert_eq!(h2, vec![3, 4]);
    }

    #[test]
    fn test_split_halves_odd_gives_first_half_smaller_share() {
        let (h1, h2) = split_halves(&[1, 2, 3, 4, 5]);
        assert_eq!(h1, vec![1, 2]);
        assert_eq!(h2, vec![3, 4, 5]);
    }

    #[test]
    fn test_split_tags() {
        let tags: Vec<&str> = Split::ALL.iter().map(|s| s.tag()).collect();
        assert_eq!(tags, ["tr", "ts", "ts_h1", "ts_h2", "va"]);
    }
}
