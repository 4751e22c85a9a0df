use std::sync::Arc;

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::{
    align::{AlignmentAnnotator, AnnotatedSpan},
    cache::ReadingCache,
    config::EngineConfig,
    dictionary::ReadingDictionary,
    error::{Error, Result},
    language::Language,
    reading::{ReadingProvider, ReadingToken, arabic, cyrillic, devanagari, hangul::HangulProvider},
    renderer::{self, GlossRenderer},
    result::ReadingResult,
    script::{self, Script},
    segment::{RunSegmenter, WordSegmenter},
};

/// The segmenter and reading provider registered for one language.
struct Strategy {
    segmenter: RunSegmenter,
    provider: Box<dyn ReadingProvider>,
}

/// Reads text in any registered language and glosses it.
///
/// Segmenters and providers are built once by [`EngineBuilder`]; an engine
/// is shared by reference across threads.
pub struct Engine {
    config: EngineConfig,
    strategies: FxHashMap<Language, Strategy>,
    words: Arc<dyn WordSegmenter>,
    renderer: Box<dyn GlossRenderer>,
    cache: Option<ReadingCache>,
}

impl Engine {
    /// An engine with every compiled-in language and the default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> Option<&ReadingCache> {
        self.cache.as_ref()
    }

    pub fn is_registered(&self, language: Language) -> bool {
        self.strategies.contains_key(&language)
    }

    /// Registered languages, in declaration order.
    pub fn languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|language| self.is_registered(*language))
            .collect()
    }

    /// Read `text` in `language`.
    ///
    /// Fails only when no provider is registered for `language`; any text,
    /// including the empty string, yields a result. Text with nothing but
    /// whitespace reads as empty.
    pub fn transliterate(&self, text: &str, language: Language) -> Result<ReadingResult> {
        let strategy = self
            .strategies
            .get(&language)
            .ok_or_else(|| Error::UnsupportedScript(language.to_string()))?;
        let shape = language.shape();

        if text.trim().is_empty() {
            return Ok(ReadingResult::empty(shape));
        }

        if text.len() > self.config.max_input_len {
            tracing::warn!(
                len = text.len(),
                limit = self.config.max_input_len,
                "input too long, returning it unread"
            );
            return Ok(ReadingResult::from_tokens(
                shape,
                vec![ReadingToken::identity(text, 0)],
            ));
        }

        if let Some(hit) = self.cache.as_ref().and_then(|cache| cache.get(text, language)) {
            return Ok(hit);
        }

        let runs = strategy.segmenter.segment(text);
        let result = ReadingResult::from_tokens(shape, strategy.provider.read(&runs));

        if let Some(cache) = &self.cache {
            cache.insert(text, language, result.clone());
        }

        Ok(result)
    }

    /// [`Engine::transliterate`] with a language tag such as `"ja"` or
    /// `"zh-cn"`.
    pub fn transliterate_tag(&self, text: &str, tag: &str) -> Result<ReadingResult> {
        self.transliterate(text, tag.parse()?)
    }

    /// Read many lines in parallel; results keep the order of `lines`.
    pub fn transliterate_batch(&self, lines: &[&str], language: Language) -> Result<Vec<ReadingResult>> {
        if !self.is_registered(language) {
            return Err(Error::UnsupportedScript(language.to_string()));
        }

        lines
            .par_iter()
            .map(|line| self.transliterate(line, language))
            .collect()
    }

    /// Pair `reading` with the substrings of `original` it belongs to.
    pub fn annotate(&self, original: &str, reading: &ReadingResult, language: Language) -> Vec<AnnotatedSpan> {
        AlignmentAnnotator::new(language, self.words.as_ref(), self.config.chinese_grouping)
            .with_grammatical_classes(self.config.grammatical_classes)
            .annotate(original, reading)
    }

    /// `original` with each glossed unit wrapped by the engine's renderer.
    ///
    /// Returns `original` unchanged when the reading adds nothing to it.
    pub fn add_reading_gloss(&self, original: &str, reading: &ReadingResult, language: Language) -> String {
        if reading.is_empty() || reading.is_identity() {
            return original.to_string();
        }

        let spans = self.annotate(original, reading, language);
        if !spans.iter().any(|span| span.is_annotated) {
            return original.to_string();
        }

        self.renderer.render_all(&spans)
    }

    pub fn filter_script_characters(&self, text: &str, script: Script) -> String {
        script::filter_script_characters(text, script)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Assembles an [`Engine`], replacing any default component.
#[derive(Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    providers: FxHashMap<Language, Box<dyn ReadingProvider>>,
    dictionaries: FxHashMap<Language, ReadingDictionary>,
    skipped: Vec<Language>,
    words: Option<Arc<dyn WordSegmenter>>,
    renderer: Option<Box<dyn GlossRenderer>>,
}

impl EngineBuilder {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `provider` for `language` instead of the built-in one.
    pub fn provider(mut self, language: Language, provider: Box<dyn ReadingProvider>) -> Self {
        self.skipped.retain(|skipped| *skipped != language);
        self.providers.insert(language, provider);
        self
    }

    /// Extra entries merged over the embedded dictionary of `language`.
    pub fn dictionary(mut self, language: Language, dictionary: ReadingDictionary) -> Self {
        match self.dictionaries.get_mut(&language) {
            Some(existing) => existing.merge(dictionary),
            None => {
                self.dictionaries.insert(language, dictionary);
            }
        }
        self
    }

    /// Leave `language` unregistered.
    pub fn without(mut self, language: Language) -> Self {
        self.providers.remove(&language);
        if !self.skipped.contains(&language) {
            self.skipped.push(language);
        }
        self
    }

    pub fn word_segmenter(mut self, words: Box<dyn WordSegmenter>) -> Self {
        self.words = Some(Arc::from(words));
        self
    }

    pub fn renderer(mut self, renderer: Box<dyn GlossRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn build(mut self) -> Engine {
        let max_compound_len = self.config.max_compound_len;

        let phrases = self.merged_dictionary(Language::Chinese, embedded_chinese());
        let words = self
            .words
            .take()
            .unwrap_or_else(|| default_words(&phrases, max_compound_len));

        let mut strategies = FxHashMap::default();
        for language in Language::ALL {
            if self.skipped.contains(&language) {
                continue;
            }

            let provider = match self.providers.remove(&language) {
                Some(provider) => provider,
                None => match default_provider(language, &self.config, &words, &phrases) {
                    Some(provider) => provider,
                    None => {
                        tracing::debug!(%language, "no reading provider compiled in");
                        continue;
                    }
                },
            };

            let segmenter = match language {
                Language::Japanese => RunSegmenter::with_dictionary(
                    self.merged_dictionary(Language::Japanese, ReadingDictionary::embedded_japanese()),
                    max_compound_len,
                ),
                _ => RunSegmenter::new(),
            };

            strategies.insert(language, Strategy { segmenter, provider });
        }

        let cache = (self.config.cache && self.config.cache_capacity > 0)
            .then(|| ReadingCache::new(self.config.cache_capacity));
        let renderer = self
            .renderer
            .take()
            .unwrap_or_else(|| renderer::for_markup(self.config.markup));

        Engine {
            config: self.config,
            strategies,
            words,
            renderer,
            cache,
        }
    }

    fn merged_dictionary(&self, language: Language, mut embedded: ReadingDictionary) -> ReadingDictionary {
        if let Some(extra) = self.dictionaries.get(&language) {
            embedded.merge(extra.clone());
        }

        embedded
    }
}

#[cfg(feature = "pinyin")]
fn embedded_chinese() -> ReadingDictionary {
    ReadingDictionary::embedded_chinese()
}

#[cfg(not(feature = "pinyin"))]
fn embedded_chinese() -> ReadingDictionary {
    ReadingDictionary::new()
}

#[cfg(feature = "jieba")]
fn default_words(_phrases: &ReadingDictionary, _max_len: usize) -> Arc<dyn WordSegmenter> {
    Arc::new(crate::segment::JiebaSegmenter::new())
}

#[cfg(not(feature = "jieba"))]
fn default_words(phrases: &ReadingDictionary, max_len: usize) -> Arc<dyn WordSegmenter> {
    Arc::new(crate::segment::DictionarySegmenter::new(phrases.clone(), max_len))
}

#[allow(unused_variables)]
fn default_provider(
    language: Language,
    config: &EngineConfig,
    words: &Arc<dyn WordSegmenter>,
    phrases: &ReadingDictionary,
) -> Option<Box<dyn ReadingProvider>> {
    match language {
        #[cfg(feature = "romaji")]
        Language::Japanese => Some(Box::new(crate::reading::romaji::RomajiProvider::new(
            config.particle_spacing,
        ))),
        #[cfg(feature = "pinyin")]
        Language::Chinese => Some(Box::new(crate::reading::pinyin::PinyinProvider::new(
            Arc::clone(words),
            phrases.clone(),
        ))),
        Language::Korean => Some(Box::new(HangulProvider::new())),
        Language::Hindi => Some(Box::new(devanagari::provider())),
        Language::Arabic => Some(Box::new(arabic::provider())),
        Language::Russian => Some(Box::new(cyrillic::provider())),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        reading::{ReadingKind, translit::TableTransliterator},
        renderer::InlineGloss,
        script::ScriptCategory,
    };

    #[test]
    fn registers_every_compiled_language() {
        let engine = Engine::new();
        assert!(engine.is_registered(Language::Korean));
        assert!(engine.is_registered(Language::Russian));
        #[cfg(all(feature = "pinyin", feature = "romaji"))]
        assert_eq!(engine.languages(), Language::ALL);
    }

    #[test]
    fn skipped_language_is_unsupported() {
        let engine = Engine::builder().without(Language::Korean).build();

        let err = engine.transliterate("한글", Language::Korean).unwrap_err();
        assert!(matches!(err, Error::UnsupportedScript(ref tag) if tag == "korean"));
        assert!(engine.transliterate_batch(&["한글"], Language::Korean).is_err());
    }

    #[test]
    fn unknown_tags_are_unsupported() {
        let engine = Engine::new();
        assert!(matches!(
            engine.transliterate_tag("text", "klingon"),
            Err(Error::UnsupportedScript(_))
        ));
        assert!(engine.transliterate_tag("мир", "RU").is_ok());
    }

    #[test]
    fn custom_provider_replaces_the_default() {
        fn shout(word: &str) -> String {
            word.to_uppercase()
        }

        let engine = Engine::builder()
            .provider(
                Language::Russian,
                Box::new(TableTransliterator::new(
                    Script::Cyrillic,
                    ScriptCategory::Cyrillic,
                    shout,
                )),
            )
            .build();

        let result = engine.transliterate("мир", Language::Russian).unwrap();
        assert_eq!(result, ReadingResult::Words(vec!["МИР".to_string()]));
    }

    #[test]
    fn results_are_cached() {
        let engine = Engine::new();
        let first = engine.transliterate("привет", Language::Russian).unwrap();

        assert_eq!(engine.cache().map(ReadingCache::len), Some(1));
        assert_eq!(engine.transliterate("привет", Language::Russian).unwrap(), first);
    }

    #[test]
    fn cache_can_be_disabled() {
        let config = EngineConfig {
            cache: false,
            ..EngineConfig::default()
        };
        let engine = Engine::builder().config(config).build();

        engine.transliterate("привет", Language::Russian).unwrap();
        assert!(engine.cache().is_none());
    }

    #[test]
    fn oversized_input_is_returned_unread() {
        let config = EngineConfig {
            max_input_len: 4,
            ..EngineConfig::default()
        };
        let engine = Engine::builder().config(config).build();

        let result = engine.transliterate("한글한글", Language::Korean).unwrap();
        let tokens = result.tokens().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, ReadingKind::Identity);
    }

    #[cfg(feature = "pinyin")]
    #[test]
    fn oversized_chinese_is_left_unglossed() {
        let config = EngineConfig {
            max_input_len: 8,
            ..EngineConfig::default()
        };
        let engine = Engine::builder().config(config).build();

        let text = "我们 like 中文";
        let result = engine.transliterate(text, Language::Chinese).unwrap();
        assert!(result.is_identity());
        assert!(
            engine
                .annotate(text, &result, Language::Chinese)
                .iter()
                .all(|span| !span.is_annotated)
        );
        assert_eq!(engine.add_reading_gloss(text, &result, Language::Chinese), text);
    }

    #[test]
    fn whitespace_only_input_is_empty() {
        let engine = Engine::new();

        for language in engine.languages() {
            let result = engine.transliterate("  \n\t", language).unwrap();
            assert!(result.is_empty(), "{language}");
            assert_eq!(result.shape(), language.shape());
        }
    }

    #[test]
    fn batch_keeps_input_order() {
        let engine = Engine::new();
        let lines = ["мир", "", "привет мир"];

        let results = engine.transliterate_batch(&lines, Language::Russian).unwrap();
        let lines: Vec<String> = results.iter().map(ReadingResult::to_line).collect();
        assert_eq!(lines, ["mir", "", "privet mir"]);
    }

    #[test]
    fn custom_renderer_is_used() {
        let engine = Engine::builder()
            .renderer(Box::new(InlineGloss::default()))
            .build();

        let reading = engine.transliterate("한글", Language::Korean).unwrap();
        assert_eq!(
            engine.add_reading_gloss("한글", &reading, Language::Korean),
            "한(han)글(geul)"
        );
    }

    #[test]
    fn identity_readings_leave_text_unchanged() {
        let engine = Engine::new();
        let reading = engine.transliterate("!?", Language::Korean).unwrap();

        assert_eq!(engine.add_reading_gloss("!?", &reading, Language::Korean), "!?");
        assert_eq!(
            engine.add_reading_gloss("text", &ReadingResult::Words(Vec::new()), Language::Hindi),
            "text"
        );
    }
}
