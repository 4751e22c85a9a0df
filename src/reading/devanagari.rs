//! ITRANS-style transliteration of Devanagari.
//!
//! Consonants carry an inherent `a` that a following vowel sign replaces and
//! a virama suppresses. No schwa deletion is attempted, so `दोस्त` reads
//! `dosta`.

use crate::{
    reading::translit::TableTransliterator,
    script::{Script, ScriptCategory},
};

const VIRAMA: char = '\u{094d}';
const NUKTA: char = '\u{093c}';

fn consonant(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'क' => "k",
        'ख' => "kh",
        'ग' => "g",
        'घ' => "gh",
        'ङ' => "~N",
        'च' => "ch",
        'छ' => "Ch",
        'ज' => "j",
        'झ' => "jh",
        'ञ' => "~n",
        'ट' => "T",
        'ठ' => "Th",
        'ड' => "D",
        'ढ' => "Dh",
        'ण' => "N",
        'त' => "t",
        'थ' => "th",
        'द' => "d",
        'ध' => "dh",
        'न' => "n",
        'ऩ' => "n",
        'प' => "p",
        'फ' => "ph",
        'ब' => "b",
        'भ' => "bh",
        'म' => "m",
        'य' => "y",
        'र' => "r",
        'ऱ' => "r",
        'ल' => "l",
        'ळ' => "L",
        'ऴ' => "L",
        'व' => "v",
        'श' => "sh",
        'ष' => "Sh",
        'स' => "s",
        'ह' => "h",
        '\u{0958}' => "q",
        '\u{0959}' => "K",
        '\u{095a}' => "G",
        '\u{095b}' => "z",
        '\u{095c}' => ".D",
        '\u{095d}' => ".Dh",
        '\u{095e}' => "f",
        '\u{095f}' => "Y",
        _ => return None,
    };

    Some(latin)
}

/// The consonant written with a nukta below `ch`.
fn with_nukta(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'क' => "q",
        'ख' => "K",
        'ग' => "G",
        'ज' => "z",
        'ड' => ".D",
        'ढ' => ".Dh",
        'फ' => "f",
        'य' => "Y",
        _ => return None,
    };

    Some(latin)
}

fn vowel_sign(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'ा' => "A",
        'ि' => "i",
        'ी' => "I",
        'ु' => "u",
        'ू' => "U",
        'ृ' => "RRi",
        'ॄ' => "RRI",
        'ॅ' => "e",
        'ॆ' => "e",
        'े' => "e",
        'ै' => "ai",
        'ॉ' => "o",
        'ॊ' => "o",
        'ो' => "o",
        'ौ' => "au",
        _ => return None,
    };

    Some(latin)
}

fn other(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'अ' => "a",
        'आ' => "A",
        'इ' => "i",
        'ई' => "I",
        'उ' => "u",
        'ऊ' => "U",
        'ऋ' => "RRi",
        'ॠ' => "RRI",
        'ऌ' => "LLi",
        'ऍ' => "e",
        'ए' => "e",
        'ऐ' => "ai",
        'ऑ' => "o",
        'ओ' => "o",
        'औ' => "au",
        'ं' => "M",
        'ः' => "H",
        'ँ' => ".N",
        'ऽ' => ".a",
        'ॐ' => "OM",
        '।' => ".",
        '॥' => "..",
        '०' => "0",
        '१' => "1",
        '२' => "2",
        '३' => "3",
        '४' => "4",
        '५' => "5",
        '६' => "6",
        '७' => "7",
        '८' => "8",
        '९' => "9",
        _ => return None,
    };

    Some(latin)
}

pub fn romanize(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    // consonant still waiting to learn whether it keeps its inherent vowel
    let mut pending: Option<&'static str> = None;
    let mut pending_char = None;

    let flush = |out: &mut String, pending: &mut Option<&'static str>| {
        if let Some(latin) = pending.take() {
            out.push_str(latin);
            out.push('a');
        }
    };

    for ch in word.chars() {
        if let Some(latin) = consonant(ch) {
            flush(&mut out, &mut pending);
            pending = Some(latin);
            pending_char = Some(ch);
        } else if ch == NUKTA {
            if let Some(latin) = pending_char.and_then(with_nukta) {
                if pending.is_some() {
                    pending = Some(latin);
                }
            }
        } else if ch == VIRAMA {
            if let Some(latin) = pending.take() {
                out.push_str(latin);
            }
        } else if let Some(sign) = vowel_sign(ch) {
            if let Some(latin) = pending.take() {
                out.push_str(latin);
            }
            out.push_str(sign);
        } else {
            flush(&mut out, &mut pending);
            match other(ch) {
                Some(latin) => out.push_str(latin),
                None => out.push(ch),
            }
        }
    }

    flush(&mut out, &mut pending);

    out
}

pub fn provider() -> TableTransliterator {
    TableTransliterator::new(Script::Devanagari, ScriptCategory::Devanagari, romanize)
}
