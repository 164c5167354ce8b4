use std::collections::HashSet;

use indexmap::IndexSet;

use crate::config::EngineConfig;

/// Unique keywords in order of first occurrence.
///
/// The order matters only for [`Keywords::phrase`], which must be
/// reproducible across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords(IndexSet<String>);

impl Keywords {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of keywords in `self` also present in `other`.
    pub fn overlap(&self, other: &Keywords) -> usize {
        self.iter().filter(|word| other.contains(word)).count()
    }

    /// Keywords joined by single spaces.
    pub fn phrase(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }
}

#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    stop_words: HashSet<String>,
    punctuation: Vec<char>,
    min_chars: usize,
}

impl KeywordExtractor {
    pub fn new<I, S>(stop_words: I, punctuation: &[char], min_chars: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stop_words: stop_words.into_iter().map(Into::into).collect(),
            punctuation: punctuation.to_vec(),
            min_chars,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.stop_words.iter().cloned(),
            &config.punctuation,
            config.min_keyword_chars,
        )
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn extract(&self, text: &str) -> Keywords {
        let normalized: String = text
            .chars()
            .map(|c| if self.punctuation.contains(&c) { ' ' } else { c })
            .collect();

        Keywords(
            normalized
                .split_whitespace()
                .filter(|word| word.chars().count() >= self.min_chars)
                .filter(|word| !self.is_stop_word(word))
                .map(str::to_string)
                .collect(),
        )
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
