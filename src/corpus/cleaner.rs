// Sentence cleaner: turns raw text into whitespace-joined word documents.
//
// The corpus is split on literal periods. Each segment keeps only its word
// runs (word characters plus apostrophes), and segments with too few words
// are dropped entirely. Both the prepare pipeline and the topic assigner
// read text through this module so they agree on what a "word" is.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::info;

/// Word runs: Unicode word characters or apostrophes.
static WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w']+").expect("word-run pattern is valid"));

/// A segment must yield more than this many words to become a document.
pub const MIN_SEGMENT_WORDS: usize = 3;

/// Options for cleaning raw text.
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Lowercase every kept document
    pub lowercase: bool,
}

/// Extract the word runs of a single segment, in order.
pub fn word_runs(segment: &str) -> Vec<&str> {
    WORD_RUN.find_iter(segment).map(|m| m.as_str()).collect()
}

/// Clean raw text into documents with the default options.
pub fn clean_text(text: &str) -> Vec<String> {
    clean_text_with(text, &CleanOptions::default())
}

/// Clean raw text into documents.
///
/// Splits on `.`, keeps segments with more than [`MIN_SEGMENT_WORDS`] word
/// runs, and joins each kept segment's runs with single spaces. Input order
/// is preserved.
pub fn clean_text_with(text: &str, options: &CleanOptions) -> Vec<String> {
    text.split('.')
        .filter_map(|segment| {
            let words = word_runs(segment);
            if words.len() <= MIN_SEGMENT_WORDS {
                return None;
            }
            let doc = words.join(" ");
            Some(if options.lowercase {
                doc.to_lowercase()
            } else {
                doc
            })
        })
        .collect()
}

/// Read a text file and clean it into documents.
pub fn read_corpus(path: &Path, options: &CleanOptions) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;

    let docs = clean_text_with(&text, options);
    info!(
        path = %path.display(),
        bytes = text.len(),
        documents = docs.len(),
        "Cleaned corpus"
    );
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_segments_dropped() {
        let docs = clean_text("the cat sat on the mat and the cat ran. a b c.");
        assert_eq!(docs, vec!["the cat sat on the mat and the cat ran"]);
    }

    #[test]
    fn test_exactly_four_words_kept() {
        let docs = clean_text("one two three four. one two three.");
        assert_eq!(docs, vec!["one two three four"]);
    }

    #[test]
    fn test_punctuation_and_newlines_stripped() {
        let docs = clean_text("Hello, world!\nIt's a\tfine -- day");
        assert_eq!(docs, vec!["Hello world It's a fine day"]);
    }

    #[test]
    fn test_unicode_words_kept_whole() {
        let docs = clean_text("le café est très bon");
        assert_eq!(docs, vec!["le café est très bon"]);
    }

    #[test]
    fn test_lowercase_option() {
        let opts = CleanOptions { lowercase: true };
        let docs = clean_text_with("The Cat Sat On The Mat", &opts);
        assert_eq!(docs, vec!["the cat sat on the mat"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(clean_text("").is_empty());
        assert!(clean_text("...").is_empty());
    }
}
