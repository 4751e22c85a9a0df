use std::sync::{PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::{language::Language, result::ReadingResult};

/// Memoized readings keyed by text and language.
///
/// Concurrent writers of the same key race benignly: the last write wins.
/// When the cache reaches its capacity it is cleared wholesale.
pub struct ReadingCache {
    entries: RwLock<FxHashMap<Language, FxHashMap<String, ReadingResult>>>,
    capacity: usize,
}

impl ReadingCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(FxHashMap::default()),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, text: &str, language: Language) -> Option<ReadingResult> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let hit = entries.get(&language)?.get(text).cloned();

        if hit.is_some() {
            tracing::debug!(%language, len = text.len(), "reading cache hit");
        }

        hit
    }

    pub fn insert(&self, text: &str, language: Language, result: ReadingResult) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        let len: usize = entries.values().map(FxHashMap::len).sum();
        if len >= self.capacity {
            tracing::debug!(entries = len, "reading cache full, clearing");
            entries.clear();
        }

        entries
            .entry(language)
            .or_default()
            .insert(text.to_string(), result);
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    fn phonetic(text: &str) -> ReadingResult {
        ReadingResult::Phonetic(text.to_string())
    }

    #[test]
    fn keys_include_the_language() {
        let cache = ReadingCache::new(8);
        cache.insert("abc", Language::Russian, phonetic("ru"));
        cache.insert("abc", Language::Hindi, phonetic("hi"));

        assert_eq!(cache.get("abc", Language::Russian), Some(phonetic("ru")));
        assert_eq!(cache.get("abc", Language::Hindi), Some(phonetic("hi")));
        assert_eq!(cache.get("abc", Language::Arabic), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn last_write_wins() {
        let cache = ReadingCache::new(8);
        cache.insert("x", Language::Chinese, phonetic("a"));
        cache.insert("x", Language::Chinese, phonetic("b"));

        assert_eq!(cache.get("x", Language::Chinese), Some(phonetic("b")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clears_when_full() {
        let cache = ReadingCache::new(2);
        cache.insert("a", Language::Chinese, phonetic("a"));
        cache.insert("b", Language::Chinese, phonetic("b"));
        cache.insert("c", Language::Chinese, phonetic("c"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("c", Language::Chinese), Some(phonetic("c")));
    }

    #[test]
    fn survives_concurrent_writers() {
        let cache = Arc::new(ReadingCache::new(1024));

        let handles: Vec<_> = (0..4)
            .map(|n| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..50 {
                        let key = format!("{}", i % 10);
                        cache.insert(&key, Language::Korean, phonetic(&n.to_string()));
                        assert!(cache.get(&key, Language::Korean).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 10);
    }
}
