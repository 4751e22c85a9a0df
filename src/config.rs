use serde::{Deserialize, Serialize};

use crate::{error::Result, segment::DEFAULT_MAX_COMPOUND_LEN};

fn default_max_compound_len() -> usize {
    DEFAULT_MAX_COMPOUND_LEN
}

fn default_cache_capacity() -> usize {
    4096
}

fn default_max_input_len() -> usize {
    1_000_000
}

fn default_true() -> bool {
    true
}

/// Granularity of the spans produced for Chinese text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChineseGrouping {
    /// One span per character.
    #[default]
    Character,
    /// One span per segmented word.
    Word,
}

/// Built-in gloss markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    /// `<ruby>漢<rt>kan</rt></ruby>`
    #[default]
    Html,
    /// `漢(kan)`
    Inline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Longest dictionary compound, in characters, the segmenter looks ahead for
    #[serde(default = "default_max_compound_len")]
    pub max_compound_len: usize,
    /// Split Japanese particles from the kana that follow them
    pub particle_spacing: bool,
    pub chinese_grouping: ChineseGrouping,
    /// Attach grammatical classes from the word segmenter's tags to Chinese spans
    pub grammatical_classes: bool,
    /// Memoize results by text and language
    #[serde(default = "default_true")]
    pub cache: bool,
    /// Entries kept before the cache is cleared
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    /// Inputs longer than this many bytes are returned unread
    #[serde(default = "default_max_input_len")]
    pub max_input_len: usize,
    pub markup: Markup,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_compound_len: default_max_compound_len(),
            particle_spacing: false,
            chinese_grouping: ChineseGrouping::default(),
            grammatical_classes: false,
            cache: true,
            cache_capacity: default_cache_capacity(),
            max_input_len: default_max_input_len(),
            markup: Markup::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}
