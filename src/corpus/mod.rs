// Corpus intake: sentence cleaning and stopword handling.

pub mod cleaner;
pub mod stopwords;
