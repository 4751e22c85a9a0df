use wana_kana::ConvertJapanese;

use crate::{
    reading::{ReadingKind, ReadingProvider, ReadingToken},
    script::{Script, ScriptCategory},
    segment::ScriptRun,
};

/// Grammatical particles after which a boundary is inserted, with their
/// particle pronunciation.
const PARTICLES: [(char, &str); 9] = [
    ('は', "wa"),
    ('が', "ga"),
    ('を', "o"),
    ('に', "ni"),
    ('へ', "e"),
    ('で', "de"),
    ('と', "to"),
    ('も', "mo"),
    ('の', "no"),
];

/// Hepburn romaji for Japanese runs.
///
/// Kanji readings come from the dictionary entry the segmenter attached to
/// the run; kana are romanized directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct RomajiProvider {
    particle_spacing: bool,
}

impl RomajiProvider {
    pub fn new(particle_spacing: bool) -> Self {
        Self { particle_spacing }
    }

    fn read_kanji(&self, run: &ScriptRun<'_>, out: &mut Vec<ReadingToken>) {
        let Some(entry) = run.entry else {
            out.push(ReadingToken::of_run(run));
            return;
        };

        if entry.is_per_character() {
            for ((offset, ch), part) in run.text.char_indices().zip(entry.parts()) {
                let mut buf = [0; 4];
                out.push(ReadingToken::new(
                    ch.encode_utf8(&mut buf),
                    run.start + offset,
                    kana_to_romaji(&strip_pitch_accent(part)),
                    ReadingKind::Phonetic,
                ));
            }
        } else {
            out.push(ReadingToken::new(
                run.text,
                run.start,
                kana_to_romaji(&strip_pitch_accent(&entry.reading())),
                ReadingKind::Phonetic,
            ));
        }
    }

    fn read_kana(&self, run: &ScriptRun<'_>, after_word: bool, out: &mut Vec<ReadingToken>) {
        if run.is_prolonged_sound_mark() {
            let vowel = out.last().and_then(trailing_vowel);
            out.push(match vowel {
                Some(vowel) => ReadingToken::new(
                    run.text,
                    run.start,
                    vowel.to_string(),
                    ReadingKind::Phonetic,
                ),
                None => ReadingToken::of_run(run),
            });
            return;
        }

        if self.particle_spacing && after_word && run.category == ScriptCategory::Hiragana {
            let mut chars = run.text.chars();
            let particle = chars
                .next()
                .and_then(|first| PARTICLES.iter().find(|(p, _)| *p == first));

            if let Some(&(particle, reading)) = particle {
                let split = particle.len_utf8();
                out.push(ReadingToken::new(
                    &run.text[..split],
                    run.start,
                    reading.to_string(),
                    ReadingKind::Phonetic,
                ));

                let rest = &run.text[split..];
                if !rest.is_empty() {
                    out.push(ReadingToken::new(
                        rest,
                        run.start + split,
                        kana_to_romaji(rest),
                        ReadingKind::Phonetic,
                    ));
                }
                return;
            }
        }

        out.push(ReadingToken::new(
            run.text,
            run.start,
            kana_to_romaji(run.text),
            ReadingKind::Phonetic,
        ));
    }
}

impl ReadingProvider for RomajiProvider {
    fn read(&self, runs: &[ScriptRun<'_>]) -> Vec<ReadingToken> {
        let mut tokens = Vec::with_capacity(runs.len());
        let mut previous = None;

        for run in runs {
            match run.category {
                ScriptCategory::Han => self.read_kanji(run, &mut tokens),
                ScriptCategory::Hiragana | ScriptCategory::Katakana => {
                    let after_word = matches!(
                        previous,
                        Some(ScriptCategory::Han | ScriptCategory::Katakana)
                    );
                    self.read_kana(run, after_word, &mut tokens);
                }
                _ => tokens.push(ReadingToken::of_run(run)),
            }

            previous = Some(run.category);
        }

        tokens
    }

    fn script(&self) -> Script {
        Script::Japanese
    }
}

/// Remove pitch-accent digits some dictionaries append to readings.
pub fn strip_pitch_accent(reading: &str) -> String {
    reading.chars().filter(|ch| !ch.is_ascii_digit()).collect()
}

fn kana_to_romaji(kana: &str) -> String {
    let romaji = kana.to_romaji();

    if romaji.is_empty() || romaji == kana || romaji == "-" {
        return String::new();
    }

    romaji
}

fn trailing_vowel(token: &ReadingToken) -> Option<char> {
    if token.is_identity() {
        return None;
    }

    token
        .reading
        .chars()
        .last()
        .filter(|ch| matches!(ch, 'a' | 'i' | 'u' | 'e' | 'o'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dictionary::ReadingDictionary, segment::RunSegmenter};

    fn segmenter() -> RunSegmenter {
        RunSegmenter::with_dictionary(ReadingDictionary::embedded_japanese(), 4)
    }

    fn pairs(provider: RomajiProvider, text: &str) -> Vec<(String, String)> {
        let segmenter = segmenter();
        provider
            .read(&segmenter.segment(text))
            .into_iter()
            .map(|token| (token.source, token.reading))
            .collect()
    }

    #[test]
    fn compound_is_read_per_character() {
        let tokens = RomajiProvider::default().read(&segmenter().segment("日本語"));

        let sources: Vec<&str> = tokens.iter().map(|t| t.source.as_str()).collect();
        let reading: String = tokens.iter().map(|t| t.reading.as_str()).collect();
        assert_eq!(sources, ["日", "本", "語"]);
        assert_eq!(reading, "nihongo");
        assert!(tokens.iter().all(|t| t.kind == ReadingKind::Phonetic));
    }

    #[test]
    fn whole_word_readings_cover_the_compound() {
        assert_eq!(
            pairs(RomajiProvider::default(), "今日"),
            [("今日".to_string(), "kyou".to_string())]
        );
    }

    #[test]
    fn pitch_accent_digits_are_stripped() {
        assert_eq!(strip_pitch_accent("はし1"), "はし");
        assert_eq!(
            pairs(RomajiProvider::default(), "箸"),
            [("箸".to_string(), "hashi".to_string())]
        );
    }

    #[test]
    fn kana_runs_are_romanized() {
        assert_eq!(
            pairs(RomajiProvider::default(), "ひらがなカタカナ"),
            [
                ("ひらがな".to_string(), "hiragana".to_string()),
                ("カタカナ".to_string(), "katakana".to_string()),
            ]
        );
    }

    #[test]
    fn prolonged_sound_mark_repeats_previous_vowel() {
        let reading: String = pairs(RomajiProvider::default(), "コーヒー")
            .into_iter()
            .map(|(_, reading)| reading)
            .collect();
        assert_eq!(reading, "koohii");
    }

    #[test]
    fn unknown_kanji_and_punctuation_are_identity() {
        let tokens = RomajiProvider::default().read(&segmenter().segment("鬱。"));
        assert!(tokens.iter().all(ReadingToken::is_identity));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn particle_spacing_splits_after_particles() {
        let spaced = pairs(RomajiProvider::new(true), "私は学生です");
        assert_eq!(spaced[1], ("は".to_string(), "wa".to_string()));

        let plain = pairs(RomajiProvider::new(false), "私は学生です");
        assert_eq!(plain[1], ("は".to_string(), "ha".to_string()));
    }

    #[test]
    fn particle_spacing_keeps_the_rest_of_the_run() {
        let spaced = pairs(RomajiProvider::new(true), "日本のです");
        let sources: Vec<&str> = spaced.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(sources, ["日", "本", "の", "です"]);
    }
}
