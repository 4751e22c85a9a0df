use std::{fmt, ops::RangeInclusive};

// CJK Unified Ideographs and the extension blocks
const HAN_RANGES: &[RangeInclusive<u32>] = &[
    0x3005..=0x3007,
    0x303b..=0x303b,
    0x3400..=0x4dbf,
    0x4e00..=0x9fff,
    0xf900..=0xfaff,
    0x20000..=0x2a6df,
    0x2a700..=0x2ebef,
    0x30000..=0x3134f,
];
const HIRAGANA_RANGES: &[RangeInclusive<u32>] = &[0x3041..=0x309f];
// Katakana, phonetic extensions and half-width forms, minus the middle dot
// and the prolonged sound marks which are handled separately.
const KATAKANA_RANGES: &[RangeInclusive<u32>] = &[
    0x30a1..=0x30fa,
    0x30fd..=0x30ff,
    0x31f0..=0x31ff,
    0xff66..=0xff6f,
    0xff71..=0xff9f,
];
const HANGUL_RANGES: &[RangeInclusive<u32>] = &[
    0x1100..=0x11ff,
    0x3130..=0x318f,
    0xa960..=0xa97f,
    0xac00..=0xd7af,
    0xd7b0..=0xd7ff,
];
const DEVANAGARI_RANGES: &[RangeInclusive<u32>] =
    &[0x0900..=0x097f, 0x1cd0..=0x1cff, 0xa8e0..=0xa8ff];
const ARABIC_RANGES: &[RangeInclusive<u32>] = &[
    0x0600..=0x06ff,
    0x0750..=0x077f,
    0x08a0..=0x08ff,
    0xfb50..=0xfdff,
    0xfe70..=0xfefe,
];
const CYRILLIC_RANGES: &[RangeInclusive<u32>] = &[
    0x0400..=0x052f,
    0x1c80..=0x1c8f,
    0x2de0..=0x2dff,
    0xa640..=0xa69f,
];
const LATIN_RANGES: &[RangeInclusive<u32>] = &[
    0x0030..=0x0039,
    0x0041..=0x005a,
    0x0061..=0x007a,
    0x00c0..=0x00d6,
    0x00d8..=0x00f6,
    0x00f8..=0x024f,
    // Combining Diacritical Marks
    0x0300..=0x036f,
    0x1e00..=0x1eff,
    0xff10..=0xff19,
    0xff21..=0xff3a,
    0xff41..=0xff5a,
];
const PUNCTUATION_RANGES: &[RangeInclusive<u32>] = &[
    0x00a0..=0x00bf,
    0x00d7..=0x00d7,
    0x00f7..=0x00f7,
    // Devanagari danda and double danda
    0x0964..=0x0965,
    // Arabic comma, semicolon, question mark, percent and full stop
    0x060c..=0x060c,
    0x061b..=0x061b,
    0x061f..=0x061f,
    0x066a..=0x066d,
    0x06d4..=0x06d4,
    0x2000..=0x206f,
    0x2190..=0x2bff,
    0x3000..=0x3004,
    0x3008..=0x303a,
    0x303c..=0x303f,
    0x30a0..=0x30a0,
    0x30fb..=0x30fb,
    0xfe30..=0xfe6f,
    0xff01..=0xff0f,
    0xff1a..=0xff20,
    0xff3b..=0xff40,
    0xff5b..=0xff65,
];
const PRIVATE_USE_RANGES: &[RangeInclusive<u32>] = &[
    0xe000..=0xf8ff,
    0xfdd0..=0xfdef,
    0xf0000..=0xffffd,
    0x100000..=0x10fffd,
];

/// The writing system a single character belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptCategory {
    Han,
    Hiragana,
    Katakana,
    Hangul,
    Devanagari,
    Arabic,
    Cyrillic,
    Latin,
    Punctuation,
    PrivateUse,
    Unknown,
}

impl ScriptCategory {
    /// Categories whose characters never carry a reading of their own.
    pub fn is_pass_through(self) -> bool {
        matches!(
            self,
            ScriptCategory::Punctuation | ScriptCategory::Unknown | ScriptCategory::PrivateUse
        )
    }
}

fn in_ranges(ranges: &[RangeInclusive<u32>], code: u32) -> bool {
    ranges.iter().any(|range| range.contains(&code))
}

/// Prolonged sound marks (`ー`, `ｰ`), which lengthen the preceding kana.
pub fn is_prolonged_sound_mark(ch: char) -> bool {
    matches!(ch, '\u{30fc}' | '\u{ff70}')
}

/// Private-use code points and noncharacters, which the segmenter drops.
pub fn is_private_use(ch: char) -> bool {
    let code = ch as u32;

    in_ranges(PRIVATE_USE_RANGES, code) || code & 0xfffe == 0xfffe
}

pub fn classify(ch: char) -> ScriptCategory {
    let code = ch as u32;

    if is_private_use(ch) {
        ScriptCategory::PrivateUse
    } else if ch.is_whitespace() || ch.is_ascii_punctuation() || in_ranges(PUNCTUATION_RANGES, code)
    {
        ScriptCategory::Punctuation
    } else if in_ranges(HAN_RANGES, code) {
        ScriptCategory::Han
    } else if in_ranges(HIRAGANA_RANGES, code) {
        ScriptCategory::Hiragana
    } else if in_ranges(KATAKANA_RANGES, code) || is_prolonged_sound_mark(ch) {
        ScriptCategory::Katakana
    } else if in_ranges(HANGUL_RANGES, code) {
        ScriptCategory::Hangul
    } else if in_ranges(DEVANAGARI_RANGES, code) {
        ScriptCategory::Devanagari
    } else if in_ranges(ARABIC_RANGES, code) {
        ScriptCategory::Arabic
    } else if in_ranges(CYRILLIC_RANGES, code) {
        ScriptCategory::Cyrillic
    } else if in_ranges(LATIN_RANGES, code) {
        ScriptCategory::Latin
    } else {
        ScriptCategory::Unknown
    }
}

/// A target writing system, as used to isolate a translated line's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Han,
    /// Hiragana, katakana and kanji together.
    Japanese,
    Hangul,
    Devanagari,
    Arabic,
    Cyrillic,
}

impl Script {
    pub fn contains(self, ch: char) -> bool {
        match self {
            Script::Han => classify(ch) == ScriptCategory::Han,
            Script::Japanese => matches!(
                classify(ch),
                ScriptCategory::Han | ScriptCategory::Hiragana | ScriptCategory::Katakana
            ),
            Script::Hangul => classify(ch) == ScriptCategory::Hangul,
            Script::Devanagari => classify(ch) == ScriptCategory::Devanagari,
            Script::Arabic => classify(ch) == ScriptCategory::Arabic,
            Script::Cyrillic => classify(ch) == ScriptCategory::Cyrillic,
        }
    }

    /// Whether words of this script are separated by spaces.
    pub fn is_space_delimited(self) -> bool {
        matches!(self, Script::Devanagari | Script::Arabic | Script::Cyrillic)
    }

    pub fn name(self) -> &'static str {
        match self {
            Script::Han => "Chinese (Han)",
            Script::Japanese => "Japanese",
            Script::Hangul => "Hangul",
            Script::Devanagari => "Devanagari",
            Script::Arabic => "Arabic",
            Script::Cyrillic => "Cyrillic",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keep only the characters of `script`.
///
/// Space-delimited scripts keep one space between surviving words; the CJK
/// scripts are concatenated without separators.
pub fn filter_script_characters(text: &str, script: Script) -> String {
    if script.is_space_delimited() {
        let mut filtered = String::with_capacity(text.len());

        for word in text.split_whitespace() {
            let kept: String = word.chars().filter(|&ch| script.contains(ch)).collect();
            if kept.is_empty() {
                continue;
            }

            if !filtered.is_empty() {
                filtered.push(' ');
            }
            filtered.push_str(&kept);
        }

        filtered
    } else {
        text.chars().filter(|&ch| script.contains(ch)).collect()
    }
}

/// Whether `text` holds at least one character of `script`.
pub fn contains_script(text: &str, script: Script) -> bool {
    text.chars().any(|ch| script.contains(ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_cjk_blocks() {
        assert_eq!(classify('漢'), ScriptCategory::Han);
        assert_eq!(classify('々'), ScriptCategory::Han);
        assert_eq!(classify('\u{20b9f}'), ScriptCategory::Han);
        assert_eq!(classify('ひ'), ScriptCategory::Hiragana);
        assert_eq!(classify('カ'), ScriptCategory::Katakana);
        assert_eq!(classify('ｶ'), ScriptCategory::Katakana);
        assert_eq!(classify('한'), ScriptCategory::Hangul);
    }

    #[test]
    fn classifies_alphabetic_scripts() {
        assert_eq!(classify('न'), ScriptCategory::Devanagari);
        assert_eq!(classify('ب'), ScriptCategory::Arabic);
        assert_eq!(classify('ﻻ'), ScriptCategory::Arabic);
        assert_eq!(classify('ж'), ScriptCategory::Cyrillic);
        assert_eq!(classify('é'), ScriptCategory::Latin);
        assert_eq!(classify('7'), ScriptCategory::Latin);
    }

    #[test]
    fn classifies_punctuation_per_script() {
        for ch in ['。', '、', '「', '！', ' ', '\u{3000}', '।', '،', '؟', '«', '—', '・'] {
            assert_eq!(classify(ch), ScriptCategory::Punctuation, "{ch:?}");
        }
    }

    #[test]
    fn detects_private_use_and_noncharacters() {
        assert_eq!(classify('\u{e000}'), ScriptCategory::PrivateUse);
        assert_eq!(classify('\u{f8ff}'), ScriptCategory::PrivateUse);
        assert_eq!(classify('\u{fdd0}'), ScriptCategory::PrivateUse);
        assert_eq!(classify('\u{1fffe}'), ScriptCategory::PrivateUse);
        assert_eq!(classify('\u{100000}'), ScriptCategory::PrivateUse);
    }

    #[test]
    fn unrecognized_characters_are_unknown() {
        assert_eq!(classify('λ'), ScriptCategory::Unknown);
        assert_eq!(classify('😀'), ScriptCategory::Unknown);
    }

    #[test]
    fn prolonged_sound_mark_is_katakana() {
        assert!(is_prolonged_sound_mark('ー'));
        assert_eq!(classify('ー'), ScriptCategory::Katakana);
    }

    #[test]
    fn filters_cjk_without_separators() {
        let text = "我儿子的中国文学成绩一直很好。1959 年夏 SUMMER 1959";
        assert_eq!(
            filter_script_characters(text, Script::Han),
            "我儿子的中国文学成绩一直很好年夏"
        );
        assert_eq!(filter_script_characters("Hi 안녕, 세상!", Script::Hangul), "안녕세상");
    }

    #[test]
    fn filters_space_delimited_scripts_by_word() {
        assert_eq!(
            filter_script_characters("Hello Привет, мир! 42", Script::Cyrillic),
            "Привет мир"
        );
        assert_eq!(
            filter_script_characters("नमस्ते दोस्त। ok", Script::Devanagari),
            "नमस्ते दोस्त"
        );
    }

    #[test]
    fn detects_script_presence() {
        assert!(contains_script("abc 日本", Script::Japanese));
        assert!(!contains_script("abc", Script::Han));
    }
}
