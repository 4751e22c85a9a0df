use crate::{
    reading::translit::TableTransliterator,
    script::{Script, ScriptCategory},
};

const SHADDA: char = '\u{0651}';

fn letter(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'ء' => "'",
        'آ' => "aa",
        'أ' => "a",
        'ؤ' => "u'",
        'إ' => "i",
        'ئ' => "i'",
        'ا' => "a",
        'ٱ' => "a",
        'ب' => "b",
        'ة' => "h",
        'ت' => "t",
        'ث' => "th",
        'ج' => "j",
        'ح' => "H",
        'خ' => "kh",
        'د' => "d",
        'ذ' => "dh",
        'ر' => "r",
        'ز' => "z",
        'س' => "s",
        'ش' => "sh",
        'ص' => "S",
        'ض' => "D",
        'ط' => "T",
        'ظ' => "Z",
        'ع' => "`",
        'غ' => "gh",
        'ف' => "f",
        'ق' => "q",
        'ك' => "k",
        'ل' => "l",
        'م' => "m",
        'ن' => "n",
        'ه' => "h",
        'و' => "w",
        'ى' => "a",
        'ي' => "y",
        'پ' => "p",
        'چ' => "ch",
        'ژ' => "zh",
        'ک' => "k",
        'گ' => "g",
        'ی' => "y",
        _ => return None,
    };

    Some(latin)
}

/// Short vowels and tanwin, which follow the consonant they vocalise.
fn haraka(ch: char) -> Option<&'static str> {
    let latin = match ch {
        '\u{064b}' => "an",
        '\u{064c}' => "un",
        '\u{064d}' => "in",
        '\u{064e}' => "a",
        '\u{064f}' => "u",
        '\u{0650}' => "i",
        '\u{0652}' => "",
        '\u{0670}' => "a",
        _ => return None,
    };

    Some(latin)
}

fn mark(ch: char) -> Option<&'static str> {
    let latin = match ch {
        // tatweel
        '\u{0640}' => "",
        '،' => ",",
        '؛' => ";",
        '؟' => "?",
        '٪' => "%",
        '۔' => ".",
        _ => return None,
    };

    Some(latin)
}

fn digit(ch: char) -> Option<char> {
    match ch {
        '\u{0660}'..='\u{0669}' => char::from_digit(ch as u32 - 0x0660, 10),
        '\u{06f0}'..='\u{06f9}' => char::from_digit(ch as u32 - 0x06f0, 10),
        _ => None,
    }
}

pub fn romanize(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut last_letter = "";
    // a vowel waits for a shadda that may follow it in canonical order
    let mut vowel: Option<&'static str> = None;

    for ch in word.chars() {
        if ch == SHADDA {
            out.push_str(last_letter);
            continue;
        }

        if let Some(latin) = haraka(ch) {
            out.extend(vowel.replace(latin));
            continue;
        }

        out.extend(vowel.take());
        if let Some(latin) = letter(ch) {
            out.push_str(latin);
            last_letter = latin;
        } else if let Some(latin) = mark(ch) {
            out.push_str(latin);
        } else if let Some(d) = digit(ch) {
            out.push(d);
        } else {
            out.push(ch);
        }
    }

    out.extend(vowel);

    out
}

pub fn provider() -> TableTransliterator {
    TableTransliterator::new(Script::Arabic, ScriptCategory::Arabic, romanize)
}
