use std::sync::Arc;

use ::pinyin::ToPinyin;

use crate::{
    dictionary::ReadingDictionary,
    grammar::grammatical_class,
    reading::{ReadingKind, ReadingProvider, ReadingToken},
    script::{Script, ScriptCategory},
    segment::{ScriptRun, WordSegmenter},
};

/// Tone-marked pinyin for Han runs, one token per segmented word. Words the
/// segmenter tags carry their grammatical class.
pub struct PinyinProvider {
    words: Arc<dyn WordSegmenter>,
    /// Phrase readings that override the per-character table.
    phrases: ReadingDictionary,
}

impl PinyinProvider {
    pub fn new(words: Arc<dyn WordSegmenter>, phrases: ReadingDictionary) -> Self {
        Self { words, phrases }
    }

    /// One syllable per character of `word`; characters without a reading
    /// stand for themselves.
    pub fn syllables(&self, word: &str) -> Vec<String> {
        let mut syllables = Vec::with_capacity(word.len() / 3);
        let mut pos = 0;

        while let Some(ch) = word[pos..].chars().next() {
            let phrase = self
                .phrases
                .longest_match(&word[pos..], self.phrases.max_entry_len())
                .filter(|entry| entry.is_per_character());

            if let Some(entry) = phrase {
                syllables.extend(entry.parts().iter().cloned());
                pos += entry.surface().len();
                continue;
            }

            match ch.to_pinyin() {
                Some(p) => syllables.push(p.with_tone().to_string()),
                None => syllables.push(ch.to_string()),
            }
            pos += ch.len_utf8();
        }

        syllables
    }
}

impl ReadingProvider for PinyinProvider {
    fn read(&self, runs: &[ScriptRun<'_>]) -> Vec<ReadingToken> {
        let mut tokens = Vec::with_capacity(runs.len());

        for run in runs {
            if run.category != ScriptCategory::Han {
                tokens.push(ReadingToken::of_run(run));
                continue;
            }

            let mut offset = 0;
            for tagged in self.words.tag(run.text) {
                let word = tagged.word;
                let class = tagged.tag.as_deref().map(|tag| grammatical_class(tag).into_owned());

                tokens.push(
                    ReadingToken::new(
                        word,
                        run.start + offset,
                        self.syllables(word).join(" "),
                        ReadingKind::Phonetic,
                    )
                    .with_class(class),
                );
                offset += word.len();
            }
        }

        tokens
    }

    fn script(&self) -> Script {
        Script::Han
    }
}
