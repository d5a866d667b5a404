// Word embeddings and topic vectors: loaded, never computed here.
//
// The embedding table comes from an external word-vector file in the common
// whitespace-separated text format (`word v1 v2 ... vd`, optional
// `<count> <dim>` header). Topic vectors come from a JSON array of arrays.
//
// A document is represented by the elementwise *sum* of its eligible word
// vectors. Cosine similarity is scale-invariant, so summing and averaging
// rank topics identically; the zero-word case is handled explicitly as a
// zero vector.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::corpus::stopwords::StopWords;

/// Word → vector lookup with a fixed dimensionality.
#[derive(Debug, Clone)]
pub struct EmbeddingTable {
    dim: usize,
    index: HashMap<String, usize>,
    vectors: Vec<Vec<f64>>,
}

impl EmbeddingTable {
    /// Build a table from (word, vector) rows. All vectors must share one
    /// non-zero dimensionality; repeated words keep their first vector.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<f64>)>,
    {
        let mut dim = 0;
        let mut index = HashMap::new();
        let mut vectors = Vec::new();

        for (word, vector) in rows {
            if vectors.is_empty() {
                dim = vector.len();
                if dim == 0 {
                    anyhow::bail!("Embedding for {word:?} has no components");
                }
            } else if vector.len() != dim {
                anyhow::bail!(
                    "Embedding for {word:?} has {} components, expected {dim}",
                    vector.len()
                );
            }
            if index.contains_key(&word) {
                continue;
            }
            index.insert(word, vectors.len());
            vectors.push(vector);
        }

        if vectors.is_empty() {
            anyhow::bail!("Embedding table is empty");
        }

        Ok(Self {
            dim,
            index,
            vectors,
        })
    }

    /// Parse the text format: one `word v1 ... vd` row per line.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let rest: Vec<&str> = fields.collect();

            // word2vec-style header: "<count> <dim>"
            if line_no == 0 && rest.len() == 1 && is_header(word, rest[0]) {
                continue;
            }

            let vector = rest
                .iter()
                .map(|v| v.parse::<f64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .with_context(|| format!("Invalid embedding value on line {}", line_no + 1))?;
            rows.push((word.to_string(), vector));
        }
        Self::from_rows(rows)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read embeddings: {}", path.display()))?;
        let table = Self::parse(&text)
            .with_context(|| format!("Failed to parse embeddings: {}", path.display()))?;
        debug!(
            words = table.len(),
            dim = table.dim(),
            "Loaded embedding table from {}",
            path.display()
        );
        Ok(table)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn vector(&self, word: &str) -> Option<&[f64]> {
        self.index.get(word).map(|&i| self.vectors[i].as_slice())
    }
}

fn is_header(a: &str, b: &str) -> bool {
    a.parse::<usize>().is_ok() && b.parse::<usize>().is_ok()
}

/// Load topic vectors from a JSON array of arrays.
pub fn load_topic_vectors(path: &Path) -> Result<Vec<Vec<f64>>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read topic vectors: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse topic vectors: {}", path.display()))
}

/// Sum the vectors of `words` that are in the table and not stopwords.
///
/// Returns the summed vector (always `table.dim()` long, zero when nothing
/// was eligible) and how many words contributed.
pub fn sum_word_vectors<'a, I>(
    words: I,
    table: &EmbeddingTable,
    stopwords: &StopWords,
) -> (Vec<f64>, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sum = vec![0.0_f64; table.dim()];
    let mut used = 0;
    for word in words {
        if stopwords.contains(word) {
            continue;
        }
        if let Some(vector) = table.vector(word) {
            for (acc, v) in sum.iter_mut().zip(vector) {
                *acc += v;
            }
            used += 1;
        }
    }
    (sum, used)
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 for mismatched or empty inputs and when either side has
/// zero magnitude. Negative similarities are kept as-is.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        dot / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> EmbeddingTable {
        EmbeddingTable::parse("cat 1 0\ndog 0.5 0.5\nthe 9 9\n").unwrap()
    }

    #[test]
    fn test_parse_with_header() {
        let t = EmbeddingTable::parse("2 3\nx 1 2 3\ny 4 5 6\n").unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.dim(), 3);
        assert_eq!(t.vector("y"), Some(&[4.0, 5.0, 6.0][..]));
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        assert!(EmbeddingTable::parse("x 1 2\ny 1 2 3\n").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        assert!(EmbeddingTable::parse("x 1 two\n").is_err());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(EmbeddingTable::parse("\n\n").is_err());
    }

    #[test]
    fn test_sum_skips_stopwords_and_unknown() {
        let stops = StopWords::from_words(["the"]);
        let (v, used) = sum_word_vectors(["the", "cat", "dog", "cat", "zebra"], &table(), &stops);
        assert_eq!(used, 3);
        assert!((v[0] - 2.5).abs() < 1e-12);
        assert!((v[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sum_with_no_eligible_words_is_zero_vector() {
        let (v, used) = sum_word_vectors(["zebra"], &table(), &StopWords::none());
        assert_eq!(used, 0);
        assert_eq!(v, vec![0.0, 0.0]);
    }

    #[test]
    fn test_cosine_identical() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!((sim - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_proportional() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!((sim - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_opposite_is_negative() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]);
        assert!((sim + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let sim = cosine_similarity(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]);
        assert!(sim.abs() < f64::EPSILON);
    }

    #[test]
    fn test_cosine_mismatched_dimensions() {
        let sim = cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]);
        assert!(sim.abs() < f64::EPSILON, "Mismatched dims should return 0.0");
    }
}
