// Unit tests for vocabulary construction.
//
// Tests document-frequency threshold parsing and pruning, stopword sources,
// deterministic ordering, and the word <-> id bijection.

use topicprep::corpus::cleaner;
use topicprep::corpus::stopwords::StopWords;
use topicprep::vocab::{DocFrequency, InitialVocabulary, VocabParams, Vocabulary};

fn docs(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

fn params(max_df: DocFrequency, min_df: DocFrequency) -> VocabParams {
    VocabParams { max_df, min_df }
}

// ============================================================
// DocFrequency parsing
// ============================================================

#[test]
fn doc_frequency_decimal_is_proportion() {
    assert_eq!("0.5".parse::<DocFrequency>().unwrap(), DocFrequency::Proportion(0.5));
    assert_eq!("1.0".parse::<DocFrequency>().unwrap(), DocFrequency::Proportion(1.0));
}

#[test]
fn doc_frequency_integer_is_count() {
    assert_eq!("1".parse::<DocFrequency>().unwrap(), DocFrequency::Count(1));
    assert_eq!(" 25 ".parse::<DocFrequency>().unwrap(), DocFrequency::Count(25));
}

#[test]
fn doc_frequency_rejects_garbage() {
    assert!("1.5".parse::<DocFrequency>().is_err());
    assert!("-1".parse::<DocFrequency>().is_err());
    assert!("often".parse::<DocFrequency>().is_err());
}

#[test]
fn doc_frequency_display_round_trips() {
    for raw in ["0.9", "1.0", "3"] {
        let df: DocFrequency = raw.parse().unwrap();
        assert_eq!(df.to_string(), raw);
    }
}

// ============================================================
// Threshold pruning
// ============================================================

#[test]
fn max_df_proportion_prunes_common_words() {
    let corpus = docs(&["apple banana", "apple cherry", "apple banana", "date"]);
    let initial = InitialVocabulary::build(
        &corpus,
        &params(DocFrequency::Proportion(0.5), DocFrequency::Count(1)),
        &StopWords::none(),
    )
    .unwrap();
    // apple is in 3 of 4 documents, above 0.5 * 4 = 2
    assert!(!initial.contains("apple"));
    assert!(initial.contains("banana"));
    assert_eq!(initial.doc_frequency("banana"), Some(2));
}

#[test]
fn min_df_count_prunes_rare_words() {
    let corpus = docs(&["apple banana", "apple cherry", "apple banana"]);
    let initial = InitialVocabulary::build(
        &corpus,
        &params(DocFrequency::Proportion(1.0), DocFrequency::Count(2)),
        &StopWords::none(),
    )
    .unwrap();
    assert_eq!(initial.words(), ["banana", "apple"]);
}

#[test]
fn repeated_word_counts_once_per_document() {
    let corpus = docs(&["echo echo echo echo", "other words here"]);
    let initial = InitialVocabulary::build(
        &corpus,
        &params(DocFrequency::Count(1), DocFrequency::Count(1)),
        &StopWords::none(),
    )
    .unwrap();
    assert_eq!(initial.doc_frequency("echo"), Some(1));
}

#[test]
fn inverted_thresholds_fail() {
    let corpus = docs(&["a b", "c d", "e f", "g h"]);
    let result = InitialVocabulary::build(
        &corpus,
        &params(DocFrequency::Count(1), DocFrequency::Count(2)),
        &StopWords::none(),
    );
    assert!(result.is_err());
}

#[test]
fn no_surviving_terms_fails() {
    let corpus = docs(&["unique words only", "nothing shared here"]);
    let result = InitialVocabulary::build(
        &corpus,
        &params(DocFrequency::Proportion(1.0), DocFrequency::Count(2)),
        &StopWords::none(),
    );
    assert!(result.is_err());
}

#[test]
fn empty_corpus_fails() {
    let result = InitialVocabulary::build(&[], &VocabParams::default(), &StopWords::none());
    assert!(result.is_err());
}

// ============================================================
// Stopwords
// ============================================================

#[test]
fn stopwords_never_enter_the_vocabulary() {
    let corpus = docs(&["the cat and the dog", "the bird and a fish"]);
    let initial =
        InitialVocabulary::build(&corpus, &VocabParams::default(), &StopWords::english()).unwrap();
    for stop in ["the", "and", "a"] {
        assert!(!initial.contains(stop), "{stop} leaked into the vocabulary");
    }
    assert!(initial.contains("cat"));
}

#[test]
fn capitalized_stopwords_never_enter_the_vocabulary() {
    let corpus = cleaner::clean_text(
        "The cat sat on a mat. It was a very warm day. The dog ran far away.",
    );
    assert_eq!(corpus.len(), 3);

    let initial = InitialVocabulary::build(
        &corpus,
        &params(DocFrequency::Proportion(1.0), DocFrequency::Count(1)),
        &StopWords::english(),
    )
    .unwrap();
    for stop in ["The", "It", "the", "it"] {
        assert!(!initial.contains(stop), "{stop} leaked into the vocabulary");
    }
    for word in ["cat", "dog", "mat", "warm"] {
        assert!(initial.contains(word), "{word} missing");
    }
    assert_eq!(initial.num_docs(), 3);
}

#[test]
fn stopword_file_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stop.txt");
    std::fs::write(&path, "# custom list\nfoo\n\n  bar  \n").unwrap();

    let stop = StopWords::resolve(path.to_str().unwrap()).unwrap();
    assert_eq!(stop.len(), 2);
    assert!(stop.contains("foo"));
    assert!(stop.contains("bar"));
    assert!(!stop.contains("# custom list"));
}

#[test]
fn stopword_named_sources() {
    assert!(StopWords::resolve("none").unwrap().is_empty());
    assert!(StopWords::resolve("english").unwrap().contains("the"));
    assert!(StopWords::resolve("/no/such/stopword/file").is_err());
}

// ============================================================
// Ordering and id mapping
// ============================================================

#[test]
fn order_is_ascending_frequency_then_alphabetical() {
    let corpus = docs(&["zeta beta alpha", "beta alpha", "alpha gamma"]);
    let initial = InitialVocabulary::build(
        &corpus,
        &params(DocFrequency::Proportion(1.0), DocFrequency::Count(1)),
        &StopWords::none(),
    )
    .unwrap();
    assert_eq!(initial.words(), ["gamma", "zeta", "beta", "alpha"]);
}

#[test]
fn train_restriction_keeps_order_and_renumbers() {
    let corpus = docs(&["zeta beta alpha", "beta alpha", "alpha gamma"]);
    let initial = InitialVocabulary::build(
        &corpus,
        &params(DocFrequency::Proportion(1.0), DocFrequency::Count(1)),
        &StopWords::none(),
    )
    .unwrap();
    let vocab = initial.from_train_split(["alpha zeta", "unknown alpha"]);
    assert_eq!(vocab.words(), ["zeta", "alpha"]);
    assert_eq!(vocab.word2id("zeta"), Some(0));
    assert_eq!(vocab.word2id("alpha"), Some(1));
    assert_eq!(vocab.word2id("gamma"), None);
}

#[test]
fn vocabulary_is_a_bijection() {
    let vocab = Vocabulary::from_words(["red", "green", "blue"]);
    for (id, word) in vocab.words().iter().enumerate() {
        assert_eq!(vocab.word2id(word), Some(id as u32));
        assert_eq!(vocab.id2word(id as u32), Some(word.as_str()));
    }
    assert_eq!(vocab.id2word(3), None);
    assert_eq!(vocab.encode("blue purple red blue"), vec![2, 0, 2]);
}

#[test]
fn vocabulary_serializes_as_word_list() {
    let vocab = Vocabulary::from_words(["x", "y"]);
    let json = serde_json::to_string(&vocab).unwrap();
    assert_eq!(json, r#"["x","y"]"#);
    let back: Vocabulary = serde_json::from_str(&json).unwrap();
    assert_eq!(back, vocab);
}
