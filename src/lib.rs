//! Segments mixed-script text into runs of one writing system, reads each
//! run with a per-script provider and aligns the readings back onto the
//! original text so they can be shown as ruby glosses.
//!
//! ```no_run
//! use rubygloss::{Engine, Language};
//!
//! let engine = Engine::new();
//! let reading = engine.transliterate("한글", Language::Korean)?;
//! assert_eq!(reading.to_line(), "hangeul");
//! # Ok::<(), rubygloss::Error>(())
//! ```

pub mod align;
pub mod cache;
pub mod config;
pub mod dictionary;
mod engine;
mod error;
pub mod grammar;
pub mod language;
pub mod reading;
pub mod renderer;
pub mod result;
pub mod script;
pub mod segment;

pub use align::{AlignmentAnnotator, AnnotatedSpan};
pub use config::{ChineseGrouping, EngineConfig, Markup};
pub use dictionary::ReadingDictionary;
pub use engine::{Engine, EngineBuilder};
pub use error::{Error, Result};
pub use grammar::grammatical_class;
pub use language::Language;
pub use reading::{ReadingKind, ReadingProvider, ReadingToken};
pub use renderer::GlossRenderer;
pub use result::ReadingResult;
pub use script::{Script, ScriptCategory, classify, contains_script, filter_script_characters};
pub use segment::{RunSegmenter, ScriptRun, TaggedWord, WordSegmenter};
