// Top words per topic from an externally trained topic-word matrix.
//
// `gammas` has one row per topic and one column per vocabulary id. The
// highest-weighted columns of a row are that topic's words; they double as a
// human-readable label and, summed through the embedding table, as a topic
// vector when no precomputed vectors are available.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

use super::embeddings::{sum_word_vectors, EmbeddingTable};
use crate::corpus::stopwords::StopWords;
use crate::vocab::Vocabulary;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicWords {
    pub topic: usize,
    /// Highest-weighted first
    pub words: Vec<String>,
}

impl TopicWords {
    pub fn label(&self) -> String {
        self.words.join(" ")
    }
}

pub fn load_gammas(path: &Path) -> Result<Vec<Vec<f64>>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read topic-word matrix: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse topic-word matrix: {}", path.display()))
}

/// The `num_words` highest-weighted words of every topic row.
///
/// Ties keep the lower vocabulary id first. Every row must be exactly as
/// wide as the vocabulary.
pub fn top_words(
    gammas: &[Vec<f64>],
    vocab: &Vocabulary,
    num_words: usize,
) -> Result<Vec<TopicWords>> {
    gammas
        .iter()
        .enumerate()
        .map(|(topic, row)| {
            if row.len() != vocab.len() {
                anyhow::bail!(
                    "Topic {topic} has {} weights but the vocabulary has {} words",
                    row.len(),
                    vocab.len()
                );
            }
            let mut ranked: Vec<usize> = (0..row.len()).collect();
            ranked.sort_by(|&a, &b| row[b].total_cmp(&row[a]));
            let words = ranked
                .into_iter()
                .take(num_words)
                .filter_map(|id| vocab.id2word(id as u32).map(str::to_string))
                .collect();
            Ok(TopicWords { topic, words })
        })
        .collect()
}

/// Derive one topic vector per topic by summing its words' embeddings.
pub fn topic_vectors_from_words(
    topics: &[TopicWords],
    table: &EmbeddingTable,
    stopwords: &StopWords,
) -> Vec<Vec<f64>> {
    topics
        .iter()
        .map(|t| {
            let words = t.words.iter().map(String::as_str);
            let (vector, used) = sum_word_vectors(words, table, stopwords);
            if used == 0 {
                warn!(
                    topic = t.topic,
                    "No topic word has an embedding; using a zero vector"
                );
            }
            vector
        })
        .collect()
}
