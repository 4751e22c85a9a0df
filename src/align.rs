//! Pairs readings with the substrings of the original they belong to.
//!
//! Token results already carry their source spans. Flat Chinese syllables
//! are sliced back onto the words of a fresh segmentation of the original,
//! and word readings are paired positionally with whitespace-separated words.

use std::ops::Range;

use thiserror::Error;

use crate::{
    config::ChineseGrouping,
    grammar::grammatical_class,
    language::Language,
    reading::ReadingToken,
    result::ReadingResult,
    script::ScriptCategory,
    segment::{RunSegmenter, WordSegmenter},
};

/// A piece of the original text and the gloss to show with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedSpan {
    pub original: String,
    pub reading: String,
    pub is_annotated: bool,
    /// Grammatical class of the word the span belongs to.
    pub class: Option<String>,
}

impl AnnotatedSpan {
    /// A glossed span; falls back to a plain one when the reading adds
    /// nothing.
    pub fn annotated(original: &str, reading: String) -> Self {
        if reading.trim().is_empty() || reading == original {
            return Self::plain(original);
        }

        Self {
            original: original.to_string(),
            reading,
            is_annotated: true,
            class: None,
        }
    }

    pub fn plain(original: &str) -> Self {
        Self {
            original: original.to_string(),
            reading: original.to_string(),
            is_annotated: false,
            class: None,
        }
    }

    pub fn with_class(mut self, class: Option<String>) -> Self {
        self.class = class;
        self
    }
}

/// Reading units and text units disagree in number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{readings} readings for {units} units, sliced proportionally")]
pub struct AlignmentMismatch {
    pub units: usize,
    pub readings: usize,
}

/// Split `readings` reading units over words of the given lengths.
///
/// Every word receives a contiguous range, proportional to its share of the
/// total length and rounded up, so when readings run short the trailing
/// words are the ones left empty. Equal totals give an exact one-to-one
/// slicing.
pub fn proportional_slices(word_lengths: &[usize], readings: usize) -> Vec<Range<usize>> {
    let total: usize = word_lengths.iter().sum();
    let boundary = |units: usize| {
        if units >= total {
            readings
        } else {
            (units * readings).div_ceil(total)
        }
    };

    let mut slices = Vec::with_capacity(word_lengths.len());
    let mut units = 0;

    for &len in word_lengths {
        let start = boundary(units);
        units += len;
        slices.push(start..boundary(units));
    }

    slices
}

pub struct AlignmentAnnotator<'a> {
    language: Language,
    words: &'a dyn WordSegmenter,
    grouping: ChineseGrouping,
    classes: bool,
}

impl<'a> AlignmentAnnotator<'a> {
    pub fn new(language: Language, words: &'a dyn WordSegmenter, grouping: ChineseGrouping) -> Self {
        Self {
            language,
            words,
            grouping,
            classes: false,
        }
    }

    /// Attach the grammatical class of each word to its spans.
    pub fn with_grammatical_classes(mut self, classes: bool) -> Self {
        self.classes = classes;
        self
    }

    pub fn annotate(&self, original: &str, result: &ReadingResult) -> Vec<AnnotatedSpan> {
        match result {
            ReadingResult::Tokens(tokens) => self.pair_tokens(original, tokens),
            ReadingResult::Phonetic(flat) => self.pair_syllables(original, flat),
            ReadingResult::Words(words) => self.pair_words(original, words),
        }
    }

    fn pair_tokens(&self, original: &str, tokens: &[ReadingToken]) -> Vec<AnnotatedSpan> {
        let mut spans = Vec::with_capacity(tokens.len());
        let mut pos = 0;

        for token in tokens {
            let end = token.start + token.source.len();
            if token.start < pos || original.get(token.start..end) != Some(token.source.as_str()) {
                tracing::warn!(
                    offset = token.start,
                    "reading tokens do not belong to the annotated text"
                );
                break;
            }

            if token.start > pos {
                spans.push(AnnotatedSpan::plain(&original[pos..token.start]));
            }

            let span = if token.is_identity() {
                AnnotatedSpan::plain(&token.source)
            } else {
                AnnotatedSpan::annotated(&token.source, token.reading.clone())
            };
            spans.push(span.with_class(token.class.clone().filter(|_| self.classes)));
            pos = end;
        }

        if pos < original.len() {
            spans.push(AnnotatedSpan::plain(&original[pos..]));
        }

        spans
    }

    fn pair_syllables(&self, original: &str, flat: &str) -> Vec<AnnotatedSpan> {
        let syllables: Vec<&str> = flat.split_whitespace().collect();

        let segmenter = RunSegmenter::new();
        let mut pieces = Vec::new();
        for run in segmenter.segment(original) {
            if run.category != ScriptCategory::Han {
                pieces.push((run.text, None, false));
            } else if self.classes {
                pieces.extend(self.words.tag(run.text).into_iter().map(|tagged| {
                    let class = tagged.tag.as_deref().map(|tag| grammatical_class(tag).into_owned());
                    (tagged.word, class, true)
                }));
            } else {
                pieces.extend(self.words.cut(run.text).into_iter().map(|word| (word, None, true)));
            }
        }

        let lengths: Vec<usize> = pieces
            .iter()
            .filter(|(_, _, is_word)| *is_word)
            .map(|(word, _, _)| word.chars().count())
            .collect();
        let units: usize = lengths.iter().sum();
        if units != syllables.len() {
            let mismatch = AlignmentMismatch {
                units,
                readings: syllables.len(),
            };
            tracing::warn!("{mismatch}");
        }

        let mut slices = proportional_slices(&lengths, syllables.len()).into_iter();
        let mut spans: Vec<AnnotatedSpan> = Vec::with_capacity(pieces.len());

        for (text, class, is_word) in pieces {
            if !is_word {
                match spans.last_mut() {
                    Some(last) if self.language.is_punctuation_word(text) => {
                        last.original.push_str(text);
                        if !last.is_annotated {
                            last.reading.push_str(text);
                        }
                    }
                    _ => spans.push(AnnotatedSpan::plain(text)),
                }
                continue;
            }

            let word_syllables = &syllables[slices.next().unwrap_or_default()];
            match self.grouping {
                ChineseGrouping::Word => {
                    spans.push(AnnotatedSpan::annotated(text, word_syllables.join(" ")).with_class(class));
                }
                ChineseGrouping::Character => {
                    let ones = vec![1; text.chars().count()];
                    let per_char = proportional_slices(&ones, word_syllables.len());

                    for ((offset, ch), range) in text.char_indices().zip(per_char) {
                        let source = &text[offset..offset + ch.len_utf8()];
                        let span = AnnotatedSpan::annotated(source, word_syllables[range].join(" "));
                        spans.push(span.with_class(class.clone()));
                    }
                }
            }
        }

        spans
    }

    fn pair_words(&self, original: &str, words: &[String]) -> Vec<AnnotatedSpan> {
        let mut spans = Vec::new();
        let mut readings = words.iter();

        for piece in whitespace_pieces(original) {
            if piece.chars().all(char::is_whitespace) {
                spans.push(AnnotatedSpan::plain(piece));
                continue;
            }

            // punctuation-only words still own a reading slot
            let reading = readings.next();
            if self.language.is_punctuation_word(piece) {
                spans.push(AnnotatedSpan::plain(piece));
                continue;
            }

            match reading {
                Some(reading) => {
                    let cleaned = self.strip_edge_punctuation(piece, reading);
                    spans.push(AnnotatedSpan::annotated(piece, cleaned.to_string()));
                }
                None => spans.push(AnnotatedSpan::plain(piece)),
            }
        }

        spans
    }

    /// Trim punctuation off the ends of a word's reading where the word
    /// itself starts or ends with punctuation. The reading may spell those
    /// marks differently (`،` reads `,`), so both sides are tested by
    /// category rather than by character.
    fn strip_edge_punctuation<'r>(&self, word: &str, reading: &'r str) -> &'r str {
        let is_mark = |ch: char| self.language.is_punctuation(ch);
        let mut reading = reading;

        if word.starts_with(is_mark) {
            reading = reading.trim_start_matches(is_mark);
        }
        if word.ends_with(is_mark) {
            reading = reading.trim_end_matches(is_mark);
        }

        reading
    }
}

/// Alternating runs of whitespace and non-whitespace, covering `text`.
fn whitespace_pieces(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_space = None;

    for (offset, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        if in_space.is_some_and(|previous| previous != space) {
            pieces.push(&text[start..offset]);
            start = offset;
        }
        in_space = Some(space);
    }

    if start < text.len() {
        pieces.push(&text[start..]);
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dictionary::ReadingDictionary,
        reading::ReadingKind,
        segment::{DictionarySegmenter, TaggedWord},
    };

    /// Tags every character-pair word as a noun.
    struct Nouns;

    impl WordSegmenter for Nouns {
        fn cut<'a>(&self, text: &'a str) -> Vec<&'a str> {
            self.tag(text).into_iter().map(|t| t.word).collect()
        }

        fn tag<'a>(&self, text: &'a str) -> Vec<TaggedWord<'a>> {
            let mut words = Vec::new();
            let mut rest = text;

            while !rest.is_empty() {
                let end = rest.char_indices().nth(2).map_or(rest.len(), |(end, _)| end);
                let (word, tail) = rest.split_at(end);
                words.push(TaggedWord {
                    word,
                    tag: Some("n".to_string()),
                });
                rest = tail;
            }

            words
        }
    }

    fn chinese_words() -> DictionarySegmenter {
        DictionarySegmenter::new(
            ReadingDictionary::from_tsv("我们\two|men\n喜欢\txi|huan\n").unwrap(),
            4,
        )
    }

    fn pairs(spans: &[AnnotatedSpan]) -> Vec<(&str, &str, bool)> {
        spans
            .iter()
            .map(|s| (s.original.as_str(), s.reading.as_str(), s.is_annotated))
            .collect()
    }

    #[test]
    fn exact_slices_when_counts_agree() {
        assert_eq!(proportional_slices(&[2, 1, 3], 6), [0..2, 2..3, 3..6]);
    }

    #[test]
    fn short_readings_leave_trailing_words_empty() {
        assert_eq!(proportional_slices(&[1, 1], 1), [0..1, 1..1]);
        assert_eq!(proportional_slices(&[2, 2], 3), [0..2, 2..3]);
    }

    #[test]
    fn extra_readings_are_spread_over_words() {
        assert_eq!(proportional_slices(&[1, 1], 3), [0..2, 2..3]);
        assert!(proportional_slices(&[], 3).is_empty());
    }

    #[test]
    fn chinese_characters_pair_with_syllables() {
        let words = chinese_words();
        let annotator = AlignmentAnnotator::new(Language::Chinese, &words, ChineseGrouping::Character);
        let spans = annotator.annotate("我们", &ReadingResult::Phonetic("wǒ men".into()));

        assert_eq!(pairs(&spans), [("我", "wǒ", true), ("们", "men", true)]);
    }

    #[test]
    fn chinese_word_grouping_and_trailing_punctuation() {
        let words = chinese_words();
        let annotator = AlignmentAnnotator::new(Language::Chinese, &words, ChineseGrouping::Word);
        let spans = annotator.annotate(
            "「我们喜欢。」",
            &ReadingResult::Phonetic("wǒ men xǐ huan".into()),
        );

        assert_eq!(
            pairs(&spans),
            [
                ("「", "「", false),
                ("我们", "wǒ men", true),
                ("喜欢。」", "xǐ huan", true),
            ]
        );
    }

    #[test]
    fn chinese_mismatch_pads_with_original() {
        let words = chinese_words();
        let annotator = AlignmentAnnotator::new(Language::Chinese, &words, ChineseGrouping::Character);
        let spans = annotator.annotate("我们好", &ReadingResult::Phonetic("wǒ men".into()));

        assert_eq!(
            pairs(&spans),
            [("我", "wǒ", true), ("们", "men", true), ("好", "好", false)]
        );
    }

    #[test]
    fn tokens_pair_one_to_one() {
        let words = chinese_words();
        let annotator = AlignmentAnnotator::new(Language::Korean, &words, ChineseGrouping::Character);
        let tokens = vec![
            ReadingToken::new("한", 0, "han".into(), ReadingKind::Romanized),
            ReadingToken::new("글", 3, "geul".into(), ReadingKind::Romanized),
            ReadingToken::identity("!", 6),
        ];

        let spans = annotator.annotate("한글!", &ReadingResult::Tokens(tokens));
        assert_eq!(
            pairs(&spans),
            [("한", "han", true), ("글", "geul", true), ("!", "!", false)]
        );
    }

    #[test]
    fn tokens_for_other_text_leave_it_plain() {
        let words = chinese_words();
        let annotator = AlignmentAnnotator::new(Language::Korean, &words, ChineseGrouping::Character);
        let tokens = vec![ReadingToken::new("한", 0, "han".into(), ReadingKind::Romanized)];

        let spans = annotator.annotate("abc", &ReadingResult::Tokens(tokens));
        assert_eq!(pairs(&spans), [("abc", "abc", false)]);
    }

    #[test]
    fn words_pair_positionally() {
        let words = chinese_words();
        let annotator = AlignmentAnnotator::new(Language::Russian, &words, ChineseGrouping::Character);
        let result = ReadingResult::Words(vec!["privet,".into(), "—".into(), "mir".into()]);

        let spans = annotator.annotate("привет, — мир  друг", &result);
        assert_eq!(
            pairs(&spans),
            [
                ("привет,", "privet", true),
                (" ", " ", false),
                ("—", "—", false),
                (" ", " ", false),
                ("мир", "mir", true),
                ("  ", "  ", false),
                ("друг", "друг", false),
            ]
        );
    }

    #[test]
    fn romanized_marks_are_trimmed_from_word_readings() {
        let words = chinese_words();
        let annotator = AlignmentAnnotator::new(Language::Arabic, &words, ChineseGrouping::Character);
        let result = ReadingResult::Words(vec!["mrHba,".into(), "`alm?".into()]);

        let spans = annotator.annotate("مرحبا، عالم؟", &result);
        assert_eq!(
            pairs(&spans),
            [
                ("مرحبا،", "mrHba", true),
                (" ", " ", false),
                ("عالم؟", "`alm", true),
            ]
        );
    }

    #[test]
    fn word_classes_reach_every_span_of_the_word() {
        let annotator = AlignmentAnnotator::new(Language::Chinese, &Nouns, ChineseGrouping::Character)
            .with_grammatical_classes(true);
        let spans = annotator.annotate("中文书", &ReadingResult::Phonetic("zhōng wén shū".into()));

        let classes: Vec<(&str, Option<&str>)> = spans
            .iter()
            .map(|s| (s.original.as_str(), s.class.as_deref()))
            .collect();
        assert_eq!(
            classes,
            [("中", Some("noun")), ("文", Some("noun")), ("书", Some("noun"))]
        );
    }

    #[test]
    fn word_classes_are_opt_in() {
        let annotator = AlignmentAnnotator::new(Language::Chinese, &Nouns, ChineseGrouping::Word);
        let spans = annotator.annotate("中文", &ReadingResult::Phonetic("zhōng wén".into()));

        assert_eq!(pairs(&spans), [("中文", "zhōng wén", true)]);
        assert!(spans[0].class.is_none());
    }

    #[test]
    fn splits_on_whitespace_boundaries() {
        assert_eq!(whitespace_pieces(" a  bc "), [" ", "a", "  ", "bc", " "]);
        assert!(whitespace_pieces("").is_empty());
    }
}
