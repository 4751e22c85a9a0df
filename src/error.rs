use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The language tag is unknown, or no reading provider is registered for it.
    #[error("Unsupported script or language: {0}")]
    UnsupportedScript(String),

    #[error("Invalid dictionary entry on line {line}: {reason}")]
    InvalidDictionary { line: usize, reason: String },

    #[error("TOML parsing error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
