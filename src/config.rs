use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{MatchError, Result};
use crate::model::RankingMode;

pub const DEFAULT_RELEVANCE_WEIGHT: i64 = 5;
pub const DEFAULT_PHRASE_BONUS: usize = 2;
pub const DEFAULT_PAGE_SIZE: usize = 3;
pub const DEFAULT_MIN_KEYWORD_CHARS: usize = 2;

/// Persian closed-class words ignored during keyword extraction.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "از", "به", "با", "در", "که", "و", "را", "برای", "یک", "است", "هست", "بود", "شد", "شود",
    "کنم", "کنید", "باشد", "باشند", "چه", "چطور", "چگونه", "آیا", "کیست", "چیست", "من",
];

pub const DEFAULT_PUNCTUATION: &[char] = &['.', ',', '؟', '?', '،'];

pub const DEFAULT_VIDEO_HOSTS: &[&str] = &["aparat.com", "youtube.com", "youtu.be"];

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub stop_words: Vec<String>,
    pub punctuation: Vec<char>,
    pub min_keyword_chars: usize,
    pub video_hosts: Vec<String>,
    pub relevance_weight: i64,
    pub phrase_bonus: usize,
    pub ranking: RankingMode,
    pub page_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            punctuation: DEFAULT_PUNCTUATION.to_vec(),
            min_keyword_chars: DEFAULT_MIN_KEYWORD_CHARS,
            video_hosts: DEFAULT_VIDEO_HOSTS.iter().map(|h| h.to_string()).collect(),
            relevance_weight: DEFAULT_RELEVANCE_WEIGHT,
            phrase_bonus: DEFAULT_PHRASE_BONUS,
            ranking: RankingMode::Feedback,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Explicit path wins; otherwise the per-user config file is used when it
    /// exists, and built-in defaults when it does not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "loading user config");
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(MatchError::InvalidArg("page_size must be > 0".to_string()));
        }
        if self.relevance_weight <= 0 {
            return Err(MatchError::InvalidArg(
                "relevance_weight must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("faq-match").join("config.toml"))
}
