//! Grammatical classes for Chinese part-of-speech tags.
//!
//! Tags follow the ICTCLAS set that jieba emits (`n`, `vn`, `ude1`, ...).

use std::borrow::Cow;

/// The grammatical class a part-of-speech tag names.
///
/// Matching ignores case. Tags outside the table come back lowercased so
/// callers always have something to show.
pub fn grammatical_class(tag: &str) -> Cow<'static, str> {
    let tag = tag.trim().to_ascii_lowercase();

    let class = match tag.as_str() {
        "n" => "noun",
        "nr" => "proper noun",
        "ns" => "place noun",
        "nt" => "organization noun",
        "nz" => "other proper noun",
        "nl" => "location noun",
        "ng" => "nominal morpheme",

        "v" => "verb",
        "vd" => "adverbial verb",
        "vn" => "nominal verb",
        "vshi" => "是 verb",
        "vyou" => "有 verb",
        "vf" => "direction verb",
        "vx" => "auxiliary verb",
        "vi" => "intransitive verb",
        "vl" => "linking verb",
        "vg" => "verb morpheme",

        "a" => "adjective",
        "ad" => "adverbial adjective",
        "an" => "nominal adjective",
        "ag" => "adjective morpheme",
        "al" => "adjective-like",

        "d" => "adverb",
        "dg" => "adverb morpheme",

        "r" => "pronoun",
        "rr" => "personal pronoun",
        "rz" => "demonstrative pronoun",

        "m" => "numeral",
        "mq" => "quantifier numeral",
        "q" => "quantifier",
        "qv" => "verbal quantifier",
        "qt" => "temporal quantifier",

        "p" => "preposition",
        "pba" => "把 preposition",
        "pbei" => "被 preposition",

        "c" => "conjunction",
        "cc" => "coordinating conjunction",

        "u" => "auxiliary",
        "uzhe" => "着 auxiliary",
        "ule" => "了/喽 auxiliary",
        "uguo" => "过 auxiliary",
        "ude1" => "的/底 auxiliary",
        "ude2" => "地 auxiliary",
        "ude3" => "得 auxiliary",
        "usuo" => "所 auxiliary",
        "udeng" => "等/等等 auxiliary",
        "uyy" => "一样/一般 auxiliary",
        "udh" => "的话 auxiliary",

        "y" => "particle",
        "yg" => "particle morpheme",
        "e" => "interjection",
        "o" => "onomatopoeia",
        "h" => "prefix",
        "k" => "suffix",
        "x" => "non-morpheme",
        "xx" => "unknown",
        "w" => "punctuation",
        _ => return Cow::Owned(tag),
    };

    Cow::Borrowed(class)
}
