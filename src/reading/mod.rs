pub mod arabic;
pub mod cyrillic;
pub mod devanagari;
pub mod hangul;
#[cfg(feature = "pinyin")]
pub mod pinyin;
#[cfg(feature = "romaji")]
pub mod romaji;
pub mod translit;

use crate::{script::Script, segment::ScriptRun};

/// How a token's reading relates to its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadingKind {
    /// A pronunciation in the source writing tradition (pinyin, kana romaji).
    Phonetic,
    /// A letter-by-letter rendering in Latin script.
    Romanized,
    /// The source text itself; punctuation and unknown characters.
    Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReadingToken {
    /// The original text this reading covers.
    pub source: String,
    /// Byte offset of `source` in the transliterated text.
    pub start: usize,
    pub reading: String,
    pub kind: ReadingKind,
    /// Grammatical class of the word, when the segmenter tagged it.
    pub class: Option<String>,
}

impl ReadingToken {
    pub fn new(source: &str, start: usize, reading: String, kind: ReadingKind) -> Self {
        if reading.is_empty() || reading == source {
            return Self::identity(source, start);
        }

        Self {
            source: source.to_string(),
            start,
            reading,
            kind,
            class: None,
        }
    }

    pub fn identity(source: &str, start: usize) -> Self {
        Self {
            source: source.to_string(),
            start,
            reading: source.to_string(),
            kind: ReadingKind::Identity,
            class: None,
        }
    }

    pub fn with_class(mut self, class: Option<String>) -> Self {
        self.class = class;
        self
    }

    pub fn of_run(run: &ScriptRun<'_>) -> Self {
        Self::identity(run.text, run.start)
    }

    pub fn is_identity(&self) -> bool {
        self.kind == ReadingKind::Identity
    }
}

/// A pluggable strategy that turns the runs of one script into readings.
///
/// Implementations must be total: every run yields at least one token and
/// runs they cannot read come back as identity tokens.
pub trait ReadingProvider: Send + Sync {
    /// Convert the ordered runs of one input into reading tokens, in order.
    fn read(&self, runs: &[ScriptRun<'_>]) -> Vec<ReadingToken>;

    /// The script this provider reads.
    fn script(&self) -> Script;
}
