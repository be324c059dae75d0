use std::ops::Range;

use crossterm::style::Stylize;
use miette::{NamedSource, SourceSpan};

/// Everything that can go wrong between finding and parsing `config.toml`.
///
/// Io failures cover the read itself; [`TomlError`] carries a parse failure
/// together with its source span so miette can point into the file.
///
/// [`ConfigError::AlreadyInitialized`] only happens if
/// [`initialize_config()`][`super::initialize_config()`] runs twice. The
/// binary calls it once at startup, so seeing this error means a bug.
#[derive(Debug, miette::Diagnostic, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    TomlError(#[from] TomlError),
    #[error(
        "The global config was already initialized.\nPlease open an issue at {}", "https://github.com/escline/escline".bold()
    )]
    AlreadyInitialized,
}

/// Carries a [`toml::de::Error`] plus the config source text so the parse
/// failure renders with a span label instead of a bare message.
///
/// toml reports its messages as "label, help" in a single string;
/// `split_once(',')` feeds the two halves to the `#[label]` and
/// `#[diagnostic(help)]` attributes below.
#[derive(thiserror::Error, miette::Diagnostic, Debug)]
#[error("{}", "Error reading config file".red())]
#[diagnostic(
    help("{}", self.msg.split_once(',').unwrap_or(("", self.msg.as_str())).1.trim())
)]
pub struct TomlError {
    #[label("{}", self.msg.split_once(',').unwrap_or((self.msg.as_str(), "")).0.trim())]
    at: SourceSpan,

    #[source_code]
    src: NamedSource<String>,

    msg: String,
}

impl TomlError {
    pub(crate) fn new(span: Range<usize>, source: String, message: String) -> Self {
        let span_len = span.end - span.start;
        let at: SourceSpan = (span.start, span_len).into();
        let src = NamedSource::new("config.toml", source);
        let msg = message;
        Self { at, src, msg }
    }
}
