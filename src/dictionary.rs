//! Reading dictionaries backed by a character trie.
//!
//! Dictionaries are written as TSV, one `surface<TAB>reading` entry per
//! line. A reading may be split into one part per surface character with
//! `|` (`日本語	に|ほん|ご`); otherwise it covers the whole surface.

use anyhow::{Context, anyhow, ensure};
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};

const JAPANESE_TSV: &str = include_str!("../data/ja.tsv");
#[cfg(feature = "pinyin")]
const CHINESE_TSV: &str = include_str!("../data/zh.tsv");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    surface: String,
    parts: Vec<String>,
    char_len: usize,
}

impl Entry {
    pub fn new(surface: impl Into<String>, parts: Vec<String>) -> Self {
        let surface = surface.into();
        let char_len = surface.chars().count();

        Self {
            surface,
            parts,
            char_len,
        }
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Number of characters in the surface form.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Whether the reading carries exactly one part per surface character.
    pub fn is_per_character(&self) -> bool {
        self.parts.len() == self.char_len
    }

    pub fn reading(&self) -> String {
        self.parts.concat()
    }
}

#[derive(Debug, Clone, Default)]
struct Node {
    children: FxHashMap<char, Node>,
    entry: Option<Entry>,
}

impl Node {
    fn collect_entries(self, out: &mut Vec<Entry>) {
        if let Some(entry) = self.entry {
            out.push(entry);
        }

        for (_, child) in self.children {
            child.collect_entries(out);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReadingDictionary {
    root: Node,
    len: usize,
    max_entry_len: usize,
}

impl ReadingDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kanji and compound readings in hiragana, some with trailing
    /// pitch-accent digits.
    pub fn embedded_japanese() -> Self {
        Self::embedded(JAPANESE_TSV)
    }

    /// Tone-marked pinyin for phrases whose per-character reading is wrong
    /// or ambiguous.
    #[cfg(feature = "pinyin")]
    pub fn embedded_chinese() -> Self {
        Self::embedded(CHINESE_TSV)
    }

    fn embedded(source: &str) -> Self {
        match Self::from_tsv(source) {
            Ok(dictionary) => dictionary,
            Err(err) => {
                tracing::error!("embedded dictionary rejected: {err}");
                Self::default()
            }
        }
    }

    pub fn from_tsv(source: &str) -> Result<Self> {
        let mut dictionary = Self::new();

        for (index, line) in source.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let (surface, parts) = parse_line(line).map_err(|err| Error::InvalidDictionary {
                line: index + 1,
                reason: format!("{err:#}"),
            })?;

            dictionary.insert(surface, parts);
        }

        Ok(dictionary)
    }

    /// Insert or replace the reading for `surface`.
    pub fn insert(&mut self, surface: &str, parts: Vec<String>) {
        let entry = Entry::new(surface, parts);
        let char_len = entry.char_len;

        let mut node = &mut self.root;
        for ch in surface.chars() {
            node = node.children.entry(ch).or_default();
        }

        if node.entry.replace(entry).is_none() {
            self.len += 1;
        }
        self.max_entry_len = self.max_entry_len.max(char_len);
    }

    /// Merge `other` into this dictionary; its entries win on conflict.
    pub fn merge(&mut self, other: ReadingDictionary) {
        let mut entries = Vec::with_capacity(other.len);
        other.root.collect_entries(&mut entries);

        for entry in entries {
            let Entry { surface, parts, .. } = entry;
            self.insert(&surface, parts);
        }
    }

    pub fn get(&self, surface: &str) -> Option<&Entry> {
        let mut node = &self.root;
        for ch in surface.chars() {
            node = node.children.get(&ch)?;
        }

        node.entry.as_ref()
    }

    /// Longest entry that is a prefix of `text`, looking at no more than
    /// `max_len` characters.
    pub fn longest_match(&self, text: &str, max_len: usize) -> Option<&Entry> {
        let mut node = &self.root;
        let mut best = None;

        for ch in text.chars().take(max_len) {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => break,
            }

            if let Some(entry) = &node.entry {
                best = Some(entry);
            }
        }

        best
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Character length of the longest surface form.
    pub fn max_entry_len(&self) -> usize {
        self.max_entry_len
    }
}

fn parse_line(line: &str) -> anyhow::Result<(&str, Vec<String>)> {
    let (surface, reading) = line
        .split_once('\t')
        .context("missing tab between surface and reading")?;

    let surface = surface.trim();
    let reading = reading.trim();
    ensure!(!surface.is_empty(), "empty surface form");
    ensure!(!reading.is_empty(), "empty reading for {surface:?}");

    let parts: Vec<String> = reading.split('|').map(|p| p.trim().to_string()).collect();
    if parts.iter().any(String::is_empty) {
        return Err(anyhow!("empty reading part for {surface:?}"));
    }

    let char_len = surface.chars().count();
    ensure!(
        parts.len() == 1 || parts.len() == char_len,
        "{} reading parts for {} characters in {surface:?}",
        parts.len(),
        char_len
    );

    Ok((surface, parts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReadingDictionary {
        ReadingDictionary::from_tsv("日\tにち\n日本\tに|ほん\n日本語\tに|ほん|ご\n今日\tきょう\n").unwrap()
    }

    #[test]
    fn longest_match_prefers_the_longest_entry() {
        let dict = sample();
        let entry = dict.longest_match("日本語です", 4).unwrap();
        assert_eq!(entry.surface(), "日本語");
        assert_eq!(entry.parts(), ["に", "ほん", "ご"]);
        assert!(entry.is_per_character());
    }

    #[test]
    fn longest_match_respects_the_lookahead_bound() {
        let dict = sample();
        assert_eq!(dict.longest_match("日本語", 2).unwrap().surface(), "日本");
        assert_eq!(dict.longest_match("日本語", 1).unwrap().surface(), "日");
        assert!(dict.longest_match("語", 4).is_none());
    }

    #[test]
    fn falls_back_to_shorter_prefix_on_dead_end() {
        let dict = sample();
        assert_eq!(dict.longest_match("日本人", 4).unwrap().surface(), "日本");
    }

    #[test]
    fn whole_word_readings_are_not_per_character() {
        let dict = sample();
        let entry = dict.get("今日").unwrap();
        assert!(!entry.is_per_character());
        assert_eq!(entry.reading(), "きょう");
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let dict = ReadingDictionary::from_tsv("# header\n\n山\tやま\r\n").unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.max_entry_len(), 1);
    }

    #[test]
    fn rejects_malformed_lines() {
        let err = ReadingDictionary::from_tsv("山\tやま\n川かわ\n").unwrap_err();
        assert!(matches!(err, Error::InvalidDictionary { line: 2, .. }));

        let err = ReadingDictionary::from_tsv("日本語\tに|ほん\n").unwrap_err();
        assert!(matches!(err, Error::InvalidDictionary { line: 1, .. }));
    }

    #[test]
    fn merge_overrides_existing_entries() {
        let mut dict = sample();
        let before = dict.len();
        dict.merge(ReadingDictionary::from_tsv("日\tひ\n月\tつき\n").unwrap());

        assert_eq!(dict.len(), before + 1);
        assert_eq!(dict.get("日").unwrap().reading(), "ひ");
        assert_eq!(dict.get("日本").unwrap().reading(), "にほん");
    }

    #[test]
    fn embedded_tables_load() {
        let dict = ReadingDictionary::embedded_japanese();
        assert!(dict.get("日本語").is_some());
        assert!(dict.max_entry_len() >= 3);
    }
}
