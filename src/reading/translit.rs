use crate::{
    reading::{ReadingKind, ReadingProvider, ReadingToken},
    script::{Script, ScriptCategory},
    segment::ScriptRun,
};

/// Reads runs of one alphabetic script with a table-driven word
/// transliteration. Punctuation runs go through the same table so the
/// script's own marks come out as their Latin counterparts; everything else
/// passes through untouched.
pub struct TableTransliterator {
    script: Script,
    category: ScriptCategory,
    romanize: fn(&str) -> String,
}

impl TableTransliterator {
    pub fn new(script: Script, category: ScriptCategory, romanize: fn(&str) -> String) -> Self {
        Self {
            script,
            category,
            romanize,
        }
    }

    pub fn romanize(&self, word: &str) -> String {
        (self.romanize)(word)
    }
}

impl ReadingProvider for TableTransliterator {
    fn read(&self, runs: &[ScriptRun<'_>]) -> Vec<ReadingToken> {
        runs.iter()
            .map(|run| {
                if run.category == self.category || run.category == ScriptCategory::Punctuation {
                    ReadingToken::new(
                        run.text,
                        run.start,
                        self.romanize(run.text),
                        ReadingKind::Romanized,
                    )
                } else {
                    ReadingToken::of_run(run)
                }
            })
            .collect()
    }

    fn script(&self) -> Script {
        self.script
    }
}
