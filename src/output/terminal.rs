// Colored terminal output for prepare summaries, topic words and assignments.
//
// main.rs delegates all user-facing rendering here; logging goes through
// tracing instead.

use colored::Colorize;

use crate::bow::store::Manifest;
use crate::partition::Split;
use crate::topics::assign::TopicAssignments;
use crate::topics::topic_words::TopicWords;

/// Display the summary of a prepare run.
pub fn display_manifest(manifest: &Manifest) {
    println!(
        "\n{}",
        format!(
            "=== Prepared corpus ({} documents, seed {}) ===",
            manifest.corpus_documents, manifest.seed
        )
        .bold()
    );
    println!();
    println!(
        "  Thresholds: max_df={}  min_df={}",
        manifest.params.max_df, manifest.params.min_df
    );
    println!(
        "  Vocabulary: {} words ({} before train restriction)",
        manifest.vocab_size, manifest.initial_vocab_size
    );
    println!(
        "  Planned split: train {} / test {} / valid {}",
        manifest.planned.train, manifest.planned.test, manifest.planned.valid
    );
    println!();

    println!(
        "  {:<16} {:>9}  {:>10}",
        "Split".dimmed(),
        "Docs".dimmed(),
        "Tokens".dimmed(),
    );
    println!("  {}", "-".repeat(38).dimmed());

    for split in Split::ALL {
        let Some(summary) = manifest.summary(split) else {
            continue;
        };
        let docs = format!("{:>9}", summary.documents);
        let docs = if summary.documents == 0 {
            docs.yellow()
        } else {
            docs.normal()
        };
        println!(
            "  {:<16} {}  {:>10}",
            split.to_string(),
            docs,
            summary.tokens
        );
    }

    let empty: Vec<&str> = manifest
        .splits
        .iter()
        .filter(|s| s.documents == 0)
        .map(|s| s.split.tag())
        .collect();
    if !empty.is_empty() {
        println!(
            "\n  {} empty split(s): {}",
            "!".yellow(),
            empty.join(", ")
        );
    }
}

/// Display the top words of every topic.
pub fn display_topic_words(topics: &[TopicWords]) {
    if topics.is_empty() {
        println!("No topics.");
        return;
    }

    println!("\n{}", format!("=== Topics ({}) ===", topics.len()).bold());
    println!();
    for t in topics {
        println!("  {:>3}. {}", t.topic, t.label());
    }
}

/// Display topic assignments, optionally labelled with topic words.
pub fn display_assignments(assignments: &TopicAssignments, labels: Option<&[TopicWords]>) {
    if assignments.is_empty() {
        println!("No sentences to assign.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Topic assignments ({} sentences, {} topics used) ===",
            assignments.len(),
            assignments.by_topic.len()
        )
        .bold()
    );

    for (topic, docs) in &assignments.by_topic {
        let label = labels
            .and_then(|l| l.iter().find(|t| t.topic == *topic))
            .map(|t| t.label())
            .unwrap_or_default();
        println!(
            "\n  {} {} {}",
            format!("Topic {topic}").bright_green().bold(),
            format!("({} sentences)", docs.len()).dimmed(),
            label
        );
        for doc in docs {
            println!("    - {}", super::truncate_chars(doc, 120));
        }
    }
    println!();
}
