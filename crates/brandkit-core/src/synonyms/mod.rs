//! Lexical synonym lookup.
//!
//! The generators only need one question answered: "which senses does this
//! word have, and which word forms belong to each sense?". [`SynonymSource`]
//! is that question; [`Thesaurus`] is the in-memory answer, filled from a
//! WordNet dictionary directory, a JSON file, or by hand in tests.

pub mod morphy;
pub mod wordnet;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;

/// One sense of a word: the interchangeable word forms (lemmas) for it.
///
/// Multiword lemmas keep WordNet's underscore convention (`ice_cream`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Synset {
    pub lemmas: Vec<String>,
}

impl Synset {
    pub fn new<I, L>(lemmas: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Synset {
            lemmas: lemmas.into_iter().map(Into::into).collect(),
        }
    }
}

/// Read-only synonym oracle.
///
/// Lookups never fold case: the word is matched as passed. Unknown words
/// yield an empty list.
pub trait SynonymSource: Send + Sync {
    fn synsets(&self, word: &str) -> Vec<Synset>;
}

#[derive(Debug, Error)]
pub enum SynonymError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("invalid thesaurus JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// In-memory synonym dictionary.
///
/// Synsets are stored once and referenced by index from every word that
/// belongs to them. Dictionaries built by hand or from JSON match words
/// exactly; one loaded from WordNet also reduces inflected forms (`dogs`,
/// `ran`) to their base form before matching.
#[derive(Debug, Default, Clone)]
pub struct Thesaurus {
    synsets: Vec<Synset>,
    index: HashMap<String, Vec<usize>>,
    lexicon: Option<wordnet::Lexicon>,
}

impl Thesaurus {
    /// A dictionary with no entries; every lookup returns nothing.
    pub fn empty() -> Self {
        Thesaurus::default()
    }

    /// Register a synset under `word`.
    pub fn insert<I, L>(&mut self, word: impl Into<String>, lemmas: I)
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let id = self.push_synset(Synset::new(lemmas));
        self.link(word.into(), id);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_synset<I, L>(mut self, word: impl Into<String>, lemmas: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.insert(word, lemmas);
        self
    }

    pub(crate) fn push_synset(&mut self, synset: Synset) -> usize {
        self.synsets.push(synset);
        self.synsets.len() - 1
    }

    pub(crate) fn link(&mut self, word: String, synset_id: usize) {
        let ids = self.index.entry(word).or_default();
        if !ids.contains(&synset_id) {
            ids.push(synset_id);
        }
    }

    /// Number of distinct words with at least one synset.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of stored synsets.
    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    /// Parse a JSON thesaurus: `{"word": [["lemma", ...], ...], ...}`.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, Vec<Synset>> = serde_json::from_str(json)?;
        let mut thesaurus = Thesaurus::empty();
        // Sorted for a stable synset numbering.
        let mut words: Vec<_> = raw.into_iter().collect();
        words.sort_by(|a, b| a.0.cmp(&b.0));
        for (word, synsets) in words {
            for synset in synsets {
                let id = thesaurus.push_synset(synset);
                thesaurus.link(word.clone(), id);
            }
        }
        Ok(thesaurus)
    }

    /// Load a JSON thesaurus file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SynonymError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SynonymError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Thesaurus::from_json_str(&json).map_err(|source| SynonymError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a WordNet 3.x `dict/` directory.
    pub fn load_wordnet(dir: impl AsRef<Path>) -> Result<Self, SynonymError> {
        wordnet::load(dir.as_ref())
    }

    /// Build the dictionary named by the configuration.
    ///
    /// `WORDNET_DIR` wins over `THESAURUS_PATH`; with neither set the
    /// generators run against an empty dictionary and fall back to the
    /// literal keywords.
    pub fn from_config(config: &Config) -> Result<Self, SynonymError> {
        if let Some(dir) = &config.wordnet_dir {
            let thesaurus = Thesaurus::load_wordnet(dir)?;
            tracing::info!(
                words = thesaurus.len(),
                synsets = thesaurus.synset_count(),
                "Loaded WordNet from {}",
                dir.display()
            );
            return Ok(thesaurus);
        }

        if let Some(path) = &config.thesaurus_path {
            let thesaurus = Thesaurus::from_json_file(path)?;
            tracing::info!(
                words = thesaurus.len(),
                "Loaded thesaurus from {}",
                path.display()
            );
            return Ok(thesaurus);
        }

        tracing::warn!(
            "Neither WORDNET_DIR nor THESAURUS_PATH is set; name and hashtag generators will not find synonyms"
        );
        Ok(Thesaurus::empty())
    }
}

impl SynonymSource for Thesaurus {
    fn synsets(&self, word: &str) -> Vec<Synset> {
        let ids = match &self.lexicon {
            Some(lexicon) => lexicon.lookup(word),
            None => self.index.get(word).cloned().unwrap_or_default(),
        };
        ids.into_iter().map(|id| self.synsets[id].clone()).collect()
    }
}
