//! Splits text into runs of a single writing system.
//!
//! The segmenter is a character-at-a-time state machine. Its state is the
//! category of the run being accumulated; every character selects one
//! [`Action`]. Han characters are matched against an optional reading
//! dictionary with bounded maximal munch, so a compound such as `日本語`
//! becomes one run carrying its dictionary reading.

use crate::{
    dictionary::{Entry, ReadingDictionary},
    script::{ScriptCategory, classify, is_prolonged_sound_mark},
};

pub const DEFAULT_MAX_COMPOUND_LEN: usize = 4;

/// A contiguous span of the input sharing one script category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun<'a> {
    pub text: &'a str,
    pub category: ScriptCategory,
    /// Byte offset of the run in the segmented text.
    pub start: usize,
    /// Dictionary entry consumed by a Han lookup, if one matched.
    pub entry: Option<&'a Entry>,
}

impl<'a> ScriptRun<'a> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_pass_through(&self) -> bool {
        self.category.is_pass_through()
    }

    pub fn is_prolonged_sound_mark(&self) -> bool {
        let mut chars = self.text.chars();
        matches!((chars.next(), chars.next()), (Some(ch), None) if is_prolonged_sound_mark(ch))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Accumulating(ScriptCategory),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Close the current run and open a new one with this character.
    Start,
    /// Extend the current run.
    Append,
    /// Close the current run and emit the character as a run of its own,
    /// keeping the state.
    Marker,
    /// Close the current run, emit the character as an identity run and reset.
    PassThrough,
    /// Close the current run, drop the character and reset.
    Drop,
    /// Close the current run and consume the longest dictionary match.
    Lookup,
}

pub struct RunSegmenter {
    dictionary: Option<ReadingDictionary>,
    max_compound_len: usize,
}

impl RunSegmenter {
    /// A segmenter that groups Han characters like any other script.
    pub fn new() -> Self {
        Self {
            dictionary: None,
            max_compound_len: DEFAULT_MAX_COMPOUND_LEN,
        }
    }

    /// A segmenter that resolves Han characters against `dictionary`,
    /// looking ahead at most `max_compound_len` characters.
    pub fn with_dictionary(dictionary: ReadingDictionary, max_compound_len: usize) -> Self {
        Self {
            dictionary: Some(dictionary),
            max_compound_len: max_compound_len.max(1),
        }
    }

    pub fn dictionary(&self) -> Option<&ReadingDictionary> {
        self.dictionary.as_ref()
    }

    fn action(&self, state: State, ch: char, category: ScriptCategory) -> Action {
        match category {
            ScriptCategory::PrivateUse => Action::Drop,
            ScriptCategory::Punctuation | ScriptCategory::Unknown => Action::PassThrough,
            _ if is_prolonged_sound_mark(ch) => Action::Marker,
            ScriptCategory::Han if self.dictionary.is_some() => Action::Lookup,
            _ if state == State::Accumulating(category) => Action::Append,
            _ => Action::Start,
        }
    }

    pub fn segment<'a>(&'a self, text: &'a str) -> Vec<ScriptRun<'a>> {
        let mut scanner = Scanner {
            text,
            runs: Vec::new(),
            state: State::Idle,
            run_start: 0,
        };
        let mut pos = 0;

        while let Some(ch) = text[pos..].chars().next() {
            let category = classify(ch);
            let width = ch.len_utf8();

            match self.action(scanner.state, ch, category) {
                Action::Append => pos += width,
                Action::Start => {
                    scanner.flush(pos);
                    scanner.run_start = pos;
                    scanner.state = State::Accumulating(category);
                    pos += width;
                }
                Action::Marker => {
                    scanner.flush(pos);
                    scanner.emit(pos, pos + width, category, None);
                    pos += width;
                    scanner.run_start = pos;
                }
                Action::PassThrough => {
                    scanner.flush(pos);
                    scanner.emit(pos, pos + width, category, None);
                    scanner.state = State::Idle;
                    pos += width;
                }
                Action::Drop => {
                    scanner.flush(pos);
                    scanner.state = State::Idle;
                    pos += width;
                }
                Action::Lookup => {
                    scanner.flush(pos);
                    scanner.state = State::Idle;

                    let matched = self
                        .dictionary
                        .as_ref()
                        .and_then(|dict| dict.longest_match(&text[pos..], self.max_compound_len));

                    match matched {
                        Some(entry) => {
                            let end = pos + entry.surface().len();
                            scanner.emit(pos, end, category, Some(entry));
                            pos = end;
                        }
                        None => {
                            tracing::debug!(character = %ch, "no dictionary reading");
                            scanner.emit(pos, pos + width, category, None);
                            pos += width;
                        }
                    }
                }
            }
        }

        scanner.flush(pos);
        tracing::trace!(runs = scanner.runs.len(), "segmented text");

        scanner.runs
    }
}

impl Default for RunSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// A word and the part-of-speech tag a segmenter assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedWord<'a> {
    pub word: &'a str,
    pub tag: Option<String>,
}

/// Splits a run of Han characters into words.
///
/// Words must be non-empty, in order, and concatenate back to the input.
pub trait WordSegmenter: Send + Sync {
    fn cut<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// [`WordSegmenter::cut`] with part-of-speech tags, for segmenters
    /// that know them. The words must match those of `cut`.
    fn tag<'a>(&self, text: &'a str) -> Vec<TaggedWord<'a>> {
        self.cut(text)
            .into_iter()
            .map(|word| TaggedWord { word, tag: None })
            .collect()
    }
}

/// Maximal munch over a phrase dictionary; characters that start no
/// phrase become one-character words.
pub struct DictionarySegmenter {
    dictionary: ReadingDictionary,
    max_len: usize,
}

impl DictionarySegmenter {
    pub fn new(dictionary: ReadingDictionary, max_len: usize) -> Self {
        Self {
            dictionary,
            max_len: max_len.max(1),
        }
    }
}

impl WordSegmenter for DictionarySegmenter {
    fn cut<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut words = Vec::new();
        let mut pos = 0;

        while let Some(ch) = text[pos..].chars().next() {
            let end = match self.dictionary.longest_match(&text[pos..], self.max_len) {
                Some(entry) => pos + entry.surface().len(),
                None => pos + ch.len_utf8(),
            };

            words.push(&text[pos..end]);
            pos = end;
        }

        words
    }
}

#[cfg(feature = "jieba")]
pub struct JiebaSegmenter {
    jieba: jieba_rs::Jieba,
}

#[cfg(feature = "jieba")]
impl JiebaSegmenter {
    pub fn new() -> Self {
        Self {
            jieba: jieba_rs::Jieba::new(),
        }
    }
}

#[cfg(feature = "jieba")]
impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "jieba")]
impl WordSegmenter for JiebaSegmenter {
    fn cut<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.jieba.cut(text, true)
    }

    fn tag<'a>(&self, text: &'a str) -> Vec<TaggedWord<'a>> {
        let mut pos = 0;

        // jieba ties tagged words to its own lifetime; re-slice the input
        self.jieba
            .tag(text, true)
            .into_iter()
            .map(|tagged| {
                let end = pos + tagged.word.len();
                let word = &text[pos..end];
                pos = end;

                TaggedWord {
                    word,
                    tag: Some(tagged.tag.to_string()),
                }
            })
            .collect()
    }
}

struct Scanner<'a> {
    text: &'a str,
    runs: Vec<ScriptRun<'a>>,
    state: State,
    run_start: usize,
}

impl<'a> Scanner<'a> {
    fn flush(&mut self, end: usize) {
        if let State::Accumulating(category) = self.state {
            if end > self.run_start {
                self.emit(self.run_start, end, category, None);
            }
        }

        self.run_start = end;
    }

    fn emit(&mut self, start: usize, end: usize, category: ScriptCategory, entry: Option<&'a Entry>) {
        self.runs.push(ScriptRun {
            text: &self.text[start..end],
            category,
            start,
            entry,
        });
    }
}
