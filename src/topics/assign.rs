// Topic assignment: nearest topic vector by cosine similarity.
//
// Every cleaned sentence is embedded as the sum of its eligible word vectors
// and assigned to the topic whose vector it is most similar to. Ties go to
// the lowest topic index. Sentences with no eligible words embed as the zero
// vector, score 0.0 against every topic, and therefore land in topic 0; a
// warning is logged for each one.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use super::embeddings::{cosine_similarity, sum_word_vectors, EmbeddingTable};
use crate::corpus::cleaner::{self, CleanOptions};
use crate::corpus::stopwords::StopWords;

/// Assigns documents to topics. All state is passed in at construction.
pub struct TopicAssigner {
    embeddings: EmbeddingTable,
    topic_vectors: Vec<Vec<f64>>,
    stopwords: StopWords,
}

/// Topic index → assigned documents, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopicAssignments {
    pub by_topic: BTreeMap<usize, Vec<String>>,
}

impl TopicAssignments {
    pub fn docs(&self, topic: usize) -> &[String] {
        self.by_topic.get(&topic).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of assigned documents.
    pub fn len(&self) -> usize {
        self.by_topic.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_topic.is_empty()
    }
}

impl TopicAssigner {
    /// Fails when there are no topics or a topic vector's dimensionality
    /// differs from the embedding table's.
    pub fn new(
        embeddings: EmbeddingTable,
        topic_vectors: Vec<Vec<f64>>,
        stopwords: StopWords,
    ) -> Result<Self> {
        if topic_vectors.is_empty() {
            anyhow::bail!("No topic vectors supplied (cannot assign topics)");
        }
        for (i, v) in topic_vectors.iter().enumerate() {
            if v.len() != embeddings.dim() {
                anyhow::bail!(
                    "Topic vector {i} has {} components but embeddings have {}",
                    v.len(),
                    embeddings.dim()
                );
            }
        }
        Ok(Self {
            embeddings,
            topic_vectors,
            stopwords,
        })
    }

    pub fn num_topics(&self) -> usize {
        self.topic_vectors.len()
    }

    /// Sum of the document's eligible word vectors (zero vector if none).
    pub fn document_vector(&self, doc: &str) -> Vec<f64> {
        let (vector, used) =
            sum_word_vectors(doc.split_whitespace(), &self.embeddings, &self.stopwords);
        if used == 0 {
            warn!(doc, "Document has no words with embeddings; using a zero vector");
        }
        vector
    }

    /// Cosine similarity of the document to every topic, in topic order.
    pub fn similarities(&self, doc: &str) -> Vec<f64> {
        let doc_vec = self.document_vector(doc);
        self.topic_vectors
            .iter()
            .map(|t| cosine_similarity(t, &doc_vec))
            .collect()
    }

    /// Index of the most similar topic.
    pub fn assign(&self, doc: &str) -> usize {
        best_topic(&self.similarities(doc))
    }

    pub fn cluster(&self, docs: &[String]) -> TopicAssignments {
        let mut assignments = TopicAssignments::default();
        for doc in docs {
            let topic = self.assign(doc);
            assignments
                .by_topic
                .entry(topic)
                .or_default()
                .push(doc.clone());
        }
        info!(
            documents = docs.len(),
            topics_used = assignments.by_topic.len(),
            "Assigned documents to topics"
        );
        assignments
    }

    /// Clean a text file into sentences and assign each one.
    pub fn cluster_file(&self, path: &Path, options: &CleanOptions) -> Result<TopicAssignments> {
        let docs = cleaner::read_corpus(path, options)?;
        Ok(self.cluster(&docs))
    }
}

/// First index holding the maximum similarity.
pub fn best_topic(similarities: &[f64]) -> usize {
    let mut best = 0;
    for (i, &s) in similarities.iter().enumerate() {
        if s > similarities[best] {
            best = i;
        }
    }
    best
}
