// Stopword sets.
//
// Stopwords are excluded from vocabulary candidacy and from document vectors
// during topic assignment. The default list is English from the `stop-words`
// crate; a plain-text file (one word per line) can replace it. Matching
// ignores case, so sentence-initial "The" is as much a stopword as "the".

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use stop_words::{get, LANGUAGE};

#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// English stopwords from the `stop-words` crate.
    pub fn english() -> Self {
        let words: Vec<String> = get(LANGUAGE::English);
        Self::from_words(words)
    }

    /// An empty set; nothing is treated as a stopword.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| {
                    let w: String = w.into();
                    w.to_lowercase()
                })
                .collect(),
        }
    }

    /// Load a stopword file: one word per line, blank lines and `#` comments ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stopword file: {}", path.display()))?;
        Ok(Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        ))
    }

    /// Resolve a stopword source: `english`, `none`, or a path to a word list.
    pub fn resolve(source: &str) -> Result<Self> {
        match source {
            "english" => Ok(Self::english()),
            "none" => Ok(Self::none()),
            path => Self::from_file(Path::new(path)),
        }
    }

    /// Case-insensitive membership: "The" is a stopword when "the" is.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        word.chars().any(char::is_uppercase) && self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
