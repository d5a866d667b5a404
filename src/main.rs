use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use topicprep::bow::store;
use topicprep::config::Config;
use topicprep::corpus::cleaner::CleanOptions;
use topicprep::corpus::stopwords::StopWords;
use topicprep::output::terminal;
use topicprep::pipeline::prepare::{self, PrepareOptions};
use topicprep::topics::assign::TopicAssigner;
use topicprep::topics::embeddings::{self, EmbeddingTable};
use topicprep::topics::topic_words::{self, TopicWords};
use topicprep::vocab::{DocFrequency, VocabParams, Vocabulary};

/// topicprep: prepare text corpora for topic models and assign topics.
///
/// Turns a raw text corpus into a vocabulary plus sparse bag-of-words
/// train/test/validation splits, and assigns new sentences to topics using
/// externally trained topic vectors.
#[derive(Parser)]
#[command(name = "topicprep", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the vocabulary and bag-of-words splits from a corpus file
    Prepare {
        /// Plain-text corpus; sentences end with periods
        corpus: PathBuf,

        /// Output directory (default: TOPICPREP_SAVE_DIR or the platform data dir)
        #[arg(long)]
        save_dir: Option<PathBuf>,

        /// Maximum document frequency: proportion (0.9) or document count (50)
        #[arg(long)]
        max_df: Option<DocFrequency>,

        /// Minimum document frequency: proportion (0.01) or document count (1)
        #[arg(long)]
        min_df: Option<DocFrequency>,

        /// Permutation seed (random and recorded in the manifest when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Stopwords: english, none, or a path to a word list
        #[arg(long)]
        stopwords: Option<String>,

        /// Lowercase documents before building the vocabulary
        #[arg(long)]
        lowercase: bool,
    },

    /// Assign each sentence of a text file to its nearest topic
    Assign {
        /// Text file to cluster
        text: PathBuf,

        /// Word embeddings (text format: word v1 v2 ...)
        #[arg(long)]
        embeddings: PathBuf,

        /// Topic vectors as a JSON array of arrays
        #[arg(long, required_unless_present = "gammas")]
        topic_vectors: Option<PathBuf>,

        /// Topic-word matrix (JSON) used to label topics, or to derive topic
        /// vectors when --topic-vectors is omitted
        #[arg(long)]
        gammas: Option<PathBuf>,

        /// Vocabulary for --gammas (default: vocab.json in the save dir)
        #[arg(long)]
        vocab: Option<PathBuf>,

        /// Expected number of topics
        #[arg(long)]
        num_topics: Option<usize>,

        /// Words per topic when reading --gammas (default: 10)
        #[arg(long, default_value = "10")]
        num_words: usize,

        /// Stopwords: english, none, or a path to a word list
        #[arg(long)]
        stopwords: Option<String>,

        /// Lowercase sentences before embedding
        #[arg(long)]
        lowercase: bool,

        /// Also write the assignments as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show the top words of each topic in a topic-word matrix
    Topics {
        /// Topic-word matrix as a JSON array of arrays
        #[arg(long)]
        gammas: PathBuf,

        /// Vocabulary (default: vocab.json in the save dir)
        #[arg(long)]
        vocab: Option<PathBuf>,

        /// Words per topic (default: 10)
        #[arg(long, default_value = "10")]
        num_words: usize,
    },

    /// Show what a save directory contains
    Status {
        /// Directory to inspect (default: TOPICPREP_SAVE_DIR or the platform data dir)
        #[arg(long)]
        save_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("topicprep=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Prepare {
            corpus,
            save_dir,
            max_df,
            min_df,
            seed,
            stopwords,
            lowercase,
        } => {
            let save_dir = save_dir.unwrap_or_else(|| config.save_dir.clone());
            let stopwords = StopWords::resolve(stopwords.as_deref().unwrap_or(&config.stopwords))?;
            let options = PrepareOptions {
                params: VocabParams {
                    max_df: max_df.unwrap_or(config.params.max_df),
                    min_df: min_df.unwrap_or(config.params.min_df),
                },
                seed: seed.or(config.seed),
                clean: CleanOptions { lowercase },
            };

            println!("Preparing corpus {}...", corpus.display());
            info!(
                stopwords = stopwords.len(),
                max_df = %options.params.max_df,
                min_df = %options.params.min_df,
                "Starting prepare run"
            );

            let prepared = prepare::process_data(&corpus, &save_dir, &options, &stopwords)?;
            terminal::display_manifest(&prepared.manifest);

            println!("\n{}", "Data ready.".bold());
            println!("  Saved to: {}", save_dir.display());
        }

        Commands::Assign {
            text,
            embeddings: embeddings_path,
            topic_vectors,
            gammas,
            vocab,
            num_topics,
            num_words,
            stopwords,
            lowercase,
            output,
        } => {
            let stopwords = StopWords::resolve(stopwords.as_deref().unwrap_or(&config.stopwords))?;
            let table = EmbeddingTable::load(&embeddings_path)?;
            println!(
                "Loaded {} word embeddings ({} dimensions)",
                table.len(),
                table.dim()
            );

            let labels: Option<Vec<TopicWords>> = match &gammas {
                Some(path) => {
                    let vocab = load_vocab(vocab.as_deref(), &config.save_dir)?;
                    let gammas = topic_words::load_gammas(path)?;
                    Some(topic_words::top_words(&gammas, &vocab, num_words)?)
                }
                None => None,
            };

            let vectors = match (&topic_vectors, &labels) {
                (Some(path), _) => embeddings::load_topic_vectors(path)?,
                (None, Some(labels)) => {
                    println!("Deriving topic vectors from the top {num_words} words per topic");
                    topic_words::topic_vectors_from_words(labels, &table, &stopwords)
                }
                (None, None) => anyhow::bail!("Either --topic-vectors or --gammas is required"),
            };

            if let Some(expected) = num_topics {
                if expected != vectors.len() {
                    anyhow::bail!(
                        "Expected {expected} topics but found {} topic vectors",
                        vectors.len()
                    );
                }
            }

            let assigner = TopicAssigner::new(table, vectors, stopwords)?;
            let assignments = assigner.cluster_file(&text, &CleanOptions { lowercase })?;
            terminal::display_assignments(&assignments, labels.as_deref());

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&assignments)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Assignments written to: {}", path.display());
            }
        }

        Commands::Topics {
            gammas,
            vocab,
            num_words,
        } => {
            let vocab = load_vocab(vocab.as_deref(), &config.save_dir)?;
            let gammas = topic_words::load_gammas(&gammas)?;
            let topics = topic_words::top_words(&gammas, &vocab, num_words)?;
            terminal::display_topic_words(&topics);
        }

        Commands::Status { save_dir } => {
            let save_dir = save_dir.unwrap_or(config.save_dir);
            topicprep::status::show(&save_dir)?;
        }
    }

    Ok(())
}

/// Load an explicit vocabulary file, or the one in the save directory.
fn load_vocab(path: Option<&Path>, save_dir: &Path) -> Result<Vocabulary> {
    match path {
        Some(p) => store::load_vocab_file(p),
        None => store::load_vocab(save_dir),
    }
}
