// Vocabulary construction: document-frequency filtering and id assignment.

pub mod builder;
pub mod vocabulary;

pub use builder::{DocFrequency, InitialVocabulary, VocabParams};
pub use vocabulary::Vocabulary;
