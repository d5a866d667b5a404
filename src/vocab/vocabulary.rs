// Vocabulary: the bijection between words and dense ids [0, V).
//
// Serialized as a plain list of words where each word's position is its id,
// so the persisted `vocab.json` is readable by anything that understands a
// JSON array.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    words: Vec<String>,
    ids: HashMap<String, u32>,
}

impl Vocabulary {
    /// Build a vocabulary from an ordered word list. Later duplicates are
    /// ignored so ids stay contiguous.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocab = Self::default();
        for word in words {
            vocab.push(word.into());
        }
        vocab
    }

    fn push(&mut self, word: String) {
        if self.ids.contains_key(&word) {
            return;
        }
        self.ids.insert(word.clone(), self.words.len() as u32);
        self.words.push(word);
    }

    pub fn word2id(&self, word: &str) -> Option<u32> {
        self.ids.get(word).copied()
    }

    pub fn id2word(&self, id: u32) -> Option<&str> {
        self.words.get(id as usize).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.ids.contains_key(word)
    }

    /// Number of words (V).
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in id order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Map whitespace-separated tokens to ids, silently dropping unknown words.
    pub fn encode(&self, doc: &str) -> Vec<u32> {
        doc.split_whitespace()
            .filter_map(|w| self.word2id(w))
            .collect()
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(words: Vec<String>) -> Self {
        Self::from_words(words)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocab: Vocabulary) -> Self {
        vocab.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_positions() {
        let vocab = Vocabulary::from_words(["cat", "mat", "ran"]);
        assert_eq!(vocab.word2id("cat"), Some(0));
        assert_eq!(vocab.word2id("ran"), Some(2));
        assert_eq!(vocab.id2word(1), Some("mat"));
        assert_eq!(vocab.id2word(3), None);
    }

    #[test]
    fn test_duplicates_ignored() {
        let vocab = Vocabulary::from_words(["a", "b", "a", "c"]);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.word2id("c"), Some(2));
    }

    #[test]
    fn test_encode_drops_unknown() {
        let vocab = Vocabulary::from_words(["cat", "mat"]);
        assert_eq!(vocab.encode("the cat sat on the mat cat"), vec![0, 1, 0]);
    }

    #[test]
    fn test_serializes_as_word_list() {
        let vocab = Vocabulary::from_words(["x", "y"]);
        let json = serde_json::to_string(&vocab).unwrap();
        assert_eq!(json, r#"["x","y"]"#);
        let back: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vocab);
    }
}
