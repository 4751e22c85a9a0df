use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::{
    error::Error,
    script::{Script, ScriptCategory, classify},
};

/// Languages with a registered reading strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Japanese,
    Korean,
    Chinese,
    Hindi,
    Arabic,
    Russian,
}

/// How a language's reading is shaped when handed back to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// One token per run or syllable.
    Tokens,
    /// A flat string of phonetic syllables.
    Phonetic,
    /// One romanized word per whitespace-separated word.
    Words,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Japanese,
        Language::Korean,
        Language::Chinese,
        Language::Hindi,
        Language::Arabic,
        Language::Russian,
    ];

    pub fn script(self) -> Script {
        match self {
            Language::Japanese => Script::Japanese,
            Language::Korean => Script::Hangul,
            Language::Chinese => Script::Han,
            Language::Hindi => Script::Devanagari,
            Language::Arabic => Script::Arabic,
            Language::Russian => Script::Cyrillic,
        }
    }

    pub fn shape(self) -> ResultShape {
        match self {
            Language::Japanese | Language::Korean => ResultShape::Tokens,
            Language::Chinese => ResultShape::Phonetic,
            Language::Hindi | Language::Arabic | Language::Russian => ResultShape::Words,
        }
    }

    pub fn script_name(self) -> &'static str {
        self.script().name()
    }

    /// Characters that never count as word content for this language, on top
    /// of the shared punctuation table.
    fn excluded(self) -> &'static [char] {
        match self {
            Language::Hindi => &['।', '॥', '\u{093c}', '\u{094d}'],
            Language::Arabic => &[
                '\u{0640}', '\u{064e}', '\u{064f}', '\u{0650}', '\u{0651}', '\u{0652}',
            ],
            Language::Russian => &['«', '»', '—', '…'],
            Language::Japanese | Language::Chinese | Language::Korean => &['-'],
        }
    }

    /// Whether `ch` is punctuation from this language's point of view.
    pub fn is_punctuation(self, ch: char) -> bool {
        classify(ch) == ScriptCategory::Punctuation || self.excluded().contains(&ch)
    }

    /// Whether a word is made only of punctuation and excluded marks.
    pub fn is_punctuation_word(self, word: &str) -> bool {
        word.chars().all(|ch| self.is_punctuation(ch))
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_lowercase().as_str() {
            "ja" | "jp" | "japanese" => Ok(Language::Japanese),
            "ko" | "kr" | "korean" => Ok(Language::Korean),
            "zh" | "zh-cn" | "zh-ch" | "zh-hans" | "chinese" => Ok(Language::Chinese),
            "hi" | "in" | "hindi" => Ok(Language::Hindi),
            "ar" | "arabic" => Ok(Language::Arabic),
            "ru" | "russian" => Ok(Language::Russian),
            _ => Err(Error::UnsupportedScript(tag.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Japanese => "japanese",
            Language::Korean => "korean",
            Language::Chinese => "chinese",
            Language::Hindi => "hindi",
            Language::Arabic => "arabic",
            Language::Russian => "russian",
        };

        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tags_and_aliases() {
        assert_eq!("ja".parse::<Language>().unwrap(), Language::Japanese);
        assert_eq!("JP".parse::<Language>().unwrap(), Language::Japanese);
        assert_eq!("zh-CN".parse::<Language>().unwrap(), Language::Chinese);
        assert_eq!("kr".parse::<Language>().unwrap(), Language::Korean);
        assert_eq!("in".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!(" Russian ".parse::<Language>().unwrap(), Language::Russian);
    }

    #[test]
    fn rejects_unknown_tags() {
        let err = "tlh".parse::<Language>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedScript(tag) if tag == "tlh"));
    }

    #[test]
    fn punctuation_words_use_language_excludes() {
        assert!(Language::Hindi.is_punctuation_word("।"));
        assert!(Language::Russian.is_punctuation_word("«—»"));
        assert!(!Language::Russian.is_punctuation_word("мир"));
        assert!(Language::Arabic.is_punctuation_word("ـ"));
    }
}
