use crate::{
    language::ResultShape,
    reading::{ReadingKind, ReadingToken},
    script::{ScriptCategory, classify},
};

/// The reading of one input, shaped the way its language is consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingResult {
    /// Run- or syllable-aligned tokens (Japanese, Korean).
    Tokens(Vec<ReadingToken>),
    /// Space-separated syllables for the Han characters of the input, with
    /// punctuation and other scripts left out (Chinese).
    Phonetic(String),
    /// One romanized entry per whitespace-separated word (Hindi, Arabic,
    /// Russian).
    Words(Vec<String>),
}

impl ReadingResult {
    pub fn empty(shape: ResultShape) -> Self {
        match shape {
            ResultShape::Tokens => ReadingResult::Tokens(Vec::new()),
            ResultShape::Phonetic => ReadingResult::Phonetic(String::new()),
            ResultShape::Words => ReadingResult::Words(Vec::new()),
        }
    }

    /// Shape provider tokens for a language.
    pub fn from_tokens(shape: ResultShape, tokens: Vec<ReadingToken>) -> Self {
        match shape {
            ResultShape::Tokens => ReadingResult::Tokens(tokens),
            ResultShape::Phonetic => ReadingResult::Phonetic(flatten_han(&tokens)),
            ResultShape::Words => ReadingResult::Words(group_words(&tokens)),
        }
    }

    pub fn shape(&self) -> ResultShape {
        match self {
            ReadingResult::Tokens(_) => ResultShape::Tokens,
            ReadingResult::Phonetic(_) => ResultShape::Phonetic,
            ReadingResult::Words(_) => ResultShape::Words,
        }
    }

    pub fn tokens(&self) -> Option<&[ReadingToken]> {
        match self {
            ReadingResult::Tokens(tokens) => Some(tokens),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ReadingResult::Tokens(tokens) => tokens.is_empty(),
            ReadingResult::Phonetic(flat) => flat.trim().is_empty(),
            ReadingResult::Words(words) => words.iter().all(|word| word.trim().is_empty()),
        }
    }

    /// Whether nothing in the result differs from the text it was read from.
    ///
    /// Flattened shapes only know this when no character was romanized at
    /// all, so they are checked for Latin letters.
    pub fn is_identity(&self) -> bool {
        match self {
            ReadingResult::Tokens(tokens) => tokens.iter().all(ReadingToken::is_identity),
            ReadingResult::Phonetic(flat) => !has_latin(flat),
            ReadingResult::Words(words) => words.iter().all(|word| !has_latin(word)),
        }
    }

    /// The reading as one line of text, to be shown beneath the original.
    pub fn to_line(&self) -> String {
        match self {
            ReadingResult::Tokens(tokens) => join_tokens(tokens),
            ReadingResult::Phonetic(flat) => flat.clone(),
            ReadingResult::Words(words) => words.join(" "),
        }
    }
}

fn has_latin(text: &str) -> bool {
    text.chars().any(|ch| classify(ch) == ScriptCategory::Latin)
}

fn is_han_token(token: &ReadingToken) -> bool {
    token
        .source
        .chars()
        .next()
        .is_some_and(|ch| classify(ch) == ScriptCategory::Han)
}

fn flatten_han(tokens: &[ReadingToken]) -> String {
    let mut flat = String::new();

    let mut push = |syllable: &str| {
        if !flat.is_empty() {
            flat.push(' ');
        }
        flat.push_str(syllable);
    };

    for token in tokens {
        if token.is_identity() {
            // unread Han stands for itself, one syllable per character
            let mut buf = [0; 4];
            for ch in token.source.chars().filter(|&ch| classify(ch) == ScriptCategory::Han) {
                push(ch.encode_utf8(&mut buf));
            }
        } else if is_han_token(token) {
            push(&token.reading);
        }
    }

    flat
}

fn group_words(tokens: &[ReadingToken]) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    for token in tokens {
        if !token.is_identity() {
            current.push_str(&token.reading);
            continue;
        }

        for ch in token.reading.chars() {
            if ch.is_whitespace() {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            } else {
                current.push(ch);
            }
        }
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn join_tokens(tokens: &[ReadingToken]) -> String {
    let mut line = String::new();
    let mut previous: Option<&ReadingToken> = None;

    for token in tokens {
        if token.source.trim().is_empty() {
            if !line.is_empty() && !line.ends_with(' ') {
                line.push(' ');
            }
            previous = Some(token);
            continue;
        }

        // romanized syllables of one word run together; phonetic units and
        // anything after punctuation are spaced
        let separate = previous.is_some_and(|prev| {
            !prev.is_identity()
                && !token.is_identity()
                && !(prev.kind == ReadingKind::Romanized
                    && token.kind == ReadingKind::Romanized
                    && prev.start + prev.source.len() == token.start)
        });

        if separate {
            line.push(' ');
        } else if previous.is_some_and(|prev| prev.is_identity() && !token.is_identity())
            && !line.is_empty()
            && !line.ends_with(' ')
        {
            line.push(' ');
        }

        line.push_str(&token.reading);
        previous = Some(token);
    }

    line.trim_end().to_string()
}
