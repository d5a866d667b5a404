use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::vocab::VocabParams;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every value
/// here can be overridden by the matching CLI flag.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where prepared artifacts are written (TOPICPREP_SAVE_DIR)
    pub save_dir: PathBuf,
    pub params: VocabParams,
    /// Fixed permutation seed (TOPICPREP_SEED); random when unset
    pub seed: Option<u64>,
    /// `english`, `none`, or a path to a word list (TOPICPREP_STOPWORDS)
    pub stopwords: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults; set-but-malformed ones are errors.
    pub fn load() -> Result<Self> {
        let defaults = VocabParams::default();

        let max_df = parse_var("TOPICPREP_MAX_DF")?.unwrap_or(defaults.max_df);
        let min_df = parse_var("TOPICPREP_MIN_DF")?.unwrap_or(defaults.min_df);
        let seed = parse_var::<u64>("TOPICPREP_SEED")?;

        Ok(Self {
            save_dir: env::var("TOPICPREP_SAVE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_save_dir()),
            params: VocabParams { max_df, min_df },
            seed,
            stopwords: env::var("TOPICPREP_STOPWORDS").unwrap_or_else(|_| "english".to_string()),
        })
    }
}

/// Returns the default directory for prepared corpora.
/// Uses the platform data directory: ~/.local/share/topicprep/corpus/ on Linux.
pub fn default_save_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("topicprep")
        .join("corpus")
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Invalid value for {name}: {raw:?}")),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::DocFrequency;

    #[test]
    fn test_default_save_dir_ends_with_app_dir() {
        let dir = default_save_dir();
        assert!(dir.ends_with("topicprep/corpus"));
    }

    #[test]
    fn test_default_params() {
        let params = VocabParams::default();
        assert_eq!(params.max_df, DocFrequency::Proportion(0.9));
        assert_eq!(params.min_df, DocFrequency::Count(1));
    }
}
