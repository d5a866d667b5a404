// Topic assignment: embeddings, topic words, and nearest-topic clustering.

pub mod assign;
pub mod embeddings;
pub mod topic_words;
