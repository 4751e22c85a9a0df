//! Revised Romanization of Korean with syllable-junction rules.
//!
//! Each precomposed syllable is decomposed into initial, vowel and final
//! indices. The consonants meeting at a syllable boundary are resolved
//! together, so every syllable is romanized with its previous and next
//! neighbour in view.

use crate::{
    reading::{ReadingKind, ReadingProvider, ReadingToken},
    script::{Script, ScriptCategory},
    segment::ScriptRun,
};

const SYLLABLE_BASE: u32 = 0xac00;
const SYLLABLE_LAST: u32 = 0xd7a3;
const VOWEL_COUNT: u32 = 21;
const FINAL_COUNT: u32 = 28;

const INITIALS: [&str; 19] = [
    "g", "kk", "n", "d", "tt", "r", "m", "b", "pp", "s", "ss", "", "j", "jj", "ch", "k", "t", "p",
    "h",
];
const VOWELS: [&str; 21] = [
    "a", "ae", "ya", "yae", "eo", "e", "yeo", "ye", "o", "wa", "wae", "oe", "yo", "u", "wo", "we",
    "wi", "yu", "eu", "ui", "i",
];
// Final consonants as pronounced before a pause.
const CODAS: [&str; 28] = [
    "", "k", "k", "k", "n", "n", "n", "t", "l", "k", "m", "l", "l", "l", "p", "l", "m", "p", "p",
    "t", "t", "ng", "t", "t", "k", "t", "p", "t",
];
// A final carried over a silent ㅇ initial: (part kept as coda, part moved).
const LIAISON: [(&str, &str); 28] = [
    ("", ""),
    ("", "g"),
    ("", "kk"),
    ("k", "s"),
    ("", "n"),
    ("n", "j"),
    ("", "n"),
    ("", "d"),
    ("", "r"),
    ("l", "g"),
    ("l", "m"),
    ("l", "b"),
    ("l", "s"),
    ("l", "t"),
    ("l", "p"),
    ("", "r"),
    ("", "m"),
    ("", "b"),
    ("p", "s"),
    ("", "s"),
    ("", "ss"),
    ("ng", ""),
    ("", "j"),
    ("", "ch"),
    ("", "k"),
    ("", "t"),
    ("", "p"),
    ("", ""),
];

const INITIAL_G: usize = 0;
const INITIAL_N: usize = 2;
const INITIAL_D: usize = 3;
const INITIAL_R: usize = 5;
const INITIAL_M: usize = 6;
const INITIAL_SILENT: usize = 11;
const INITIAL_J: usize = 12;

const FINAL_NH: usize = 6;
const FINAL_LH: usize = 15;
const FINAL_H: usize = 27;

/// A precomposed Hangul syllable block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syllable {
    index: u32,
}

impl Syllable {
    pub fn new(ch: char) -> Option<Self> {
        let code = ch as u32;

        (SYLLABLE_BASE..=SYLLABLE_LAST)
            .contains(&code)
            .then(|| Self {
                index: code - SYLLABLE_BASE,
            })
    }

    pub fn initial(self) -> usize {
        (self.index / (VOWEL_COUNT * FINAL_COUNT)) as usize
    }

    pub fn vowel(self) -> usize {
        ((self.index / FINAL_COUNT) % VOWEL_COUNT) as usize
    }

    pub fn final_consonant(self) -> usize {
        (self.index % FINAL_COUNT) as usize
    }
}

/// How a final consonant sounds when a consonant follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coda {
    None,
    K,
    T,
    P,
    N,
    L,
    M,
    Ng,
}

fn coda_class(final_consonant: usize) -> Coda {
    match CODAS[final_consonant] {
        "k" => Coda::K,
        "t" => Coda::T,
        "p" => Coda::P,
        "n" => Coda::N,
        "l" => Coda::L,
        "m" => Coda::M,
        "ng" => Coda::Ng,
        _ => Coda::None,
    }
}

/// Resolve the consonants at a syllable boundary into the romanized coda of
/// the first syllable and the romanized initial of the second.
fn junction(final_consonant: usize, initial: usize) -> (&'static str, &'static str) {
    let coda = coda_class(final_consonant);

    if coda == Coda::None {
        return ("", INITIALS[initial]);
    }

    if initial == INITIAL_SILENT {
        return LIAISON[final_consonant];
    }

    // ㅎ aspirates a following plain stop
    if matches!(final_consonant, FINAL_H | FINAL_NH | FINAL_LH)
        && matches!(initial, INITIAL_G | INITIAL_D | INITIAL_J)
    {
        let kept = match final_consonant {
            FINAL_NH => "n",
            FINAL_LH => "l",
            _ => "",
        };
        let aspirated = match initial {
            INITIAL_G => "k",
            INITIAL_D => "t",
            _ => "ch",
        };

        return (kept, aspirated);
    }

    match (coda, initial) {
        (Coda::K, INITIAL_N | INITIAL_M) => ("ng", INITIALS[initial]),
        (Coda::T, INITIAL_N | INITIAL_M) => ("n", INITIALS[initial]),
        (Coda::P, INITIAL_N | INITIAL_M) => ("m", INITIALS[initial]),
        (Coda::L, INITIAL_N) => ("l", "l"),
        (Coda::N | Coda::L, INITIAL_R) => ("l", "l"),
        (Coda::M | Coda::Ng, INITIAL_R) => (CODAS[final_consonant], "n"),
        (Coda::K, INITIAL_R) => ("ng", "n"),
        (Coda::T, INITIAL_R) => ("n", "n"),
        (Coda::P, INITIAL_R) => ("m", "n"),
        _ => (CODAS[final_consonant], INITIALS[initial]),
    }
}

/// Romanize `current`, taking its neighbours in the same word into account.
pub fn romanize(current: Syllable, previous: Option<Syllable>, next: Option<Syllable>) -> String {
    let initial = match previous {
        Some(previous) => junction(previous.final_consonant(), current.initial()).1,
        None => INITIALS[current.initial()],
    };
    let coda = match next {
        Some(next) => junction(current.final_consonant(), next.initial()).0,
        None => CODAS[current.final_consonant()],
    };

    format!("{initial}{}{coda}", VOWELS[current.vowel()])
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HangulProvider;

impl HangulProvider {
    pub fn new() -> Self {
        Self
    }

    fn read_run(&self, run: &ScriptRun<'_>, out: &mut Vec<ReadingToken>) {
        let chars: Vec<(usize, char, Option<Syllable>)> = run
            .text
            .char_indices()
            .map(|(offset, ch)| (run.start + offset, ch, Syllable::new(ch)))
            .collect();

        for (i, &(start, ch, syllable)) in chars.iter().enumerate() {
            let mut buf = [0; 4];
            let source = ch.encode_utf8(&mut buf);

            let Some(current) = syllable else {
                out.push(ReadingToken::identity(source, start));
                continue;
            };

            let previous = i.checked_sub(1).and_then(|p| chars[p].2);
            let next = chars.get(i + 1).and_then(|n| n.2);

            out.push(ReadingToken::new(
                source,
                start,
                romanize(current, previous, next),
                ReadingKind::Romanized,
            ));
        }
    }
}

impl ReadingProvider for HangulProvider {
    fn read(&self, runs: &[ScriptRun<'_>]) -> Vec<ReadingToken> {
        let mut tokens = Vec::with_capacity(runs.len());

        for run in runs {
            if run.category == ScriptCategory::Hangul {
                self.read_run(run, &mut tokens);
            } else {
                tokens.push(ReadingToken::of_run(run));
            }
        }

        tokens
    }

    fn script(&self) -> Script {
        Script::Hangul
    }
}
