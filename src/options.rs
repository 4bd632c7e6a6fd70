//! Serialization options.

use crate::key::KeyConverter;
use crate::pretty::IndentConfig;

/// Which sequences are wrapped in a single enclosing tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Unwrap {
    /// Every item gets its own tag.
    #[default]
    None,
    /// All sequences are wrapped.
    All,
    /// Only sequences stored under these keys are wrapped.
    Keys(Vec<String>),
}

impl Unwrap {
    /// Returns true if the sequence under `key` is wrapped.
    pub fn applies_to(&self, key: &str) -> bool {
        match self {
            Unwrap::None => false,
            Unwrap::All => true,
            Unwrap::Keys(keys) => keys.iter().any(|k| k == key),
        }
    }
}

/// Options recognized by [`serialize`](crate::serialize).
///
/// ```rust
/// use ordered_xml::{KeyConverter, Options};
///
/// let options = Options::new()
///     .pretty_print(true)
///     .indent(4)
///     .key_converter(KeyConverter::LowerCamelcase);
/// assert!(options.is_pretty_print());
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    escape: bool,
    pretty_print: bool,
    indent: usize,
    compact: bool,
    key_converter: KeyConverter,
    unwrap: Unwrap,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            escape: true,
            pretty_print: false,
            indent: 2,
            compact: true,
            key_converter: KeyConverter::Literal,
            unwrap: Unwrap::None,
        }
    }
}

impl Options {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Escapes text content unless the key ends with `!`. On by default.
    pub fn escape(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    /// Re-indents the finished document.
    pub fn pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }

    /// Spaces per nesting level when pretty-printing.
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Keeps text-only elements on one line when pretty-printing.
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Sets how keys become element names.
    pub fn key_converter(mut self, key_converter: KeyConverter) -> Self {
        self.key_converter = key_converter;
        self
    }

    /// Sets which sequences are wrapped in one enclosing tag.
    pub fn unwrap(mut self, unwrap: Unwrap) -> Self {
        self.unwrap = unwrap;
        self
    }

    /// Whether text escaping is on.
    #[inline]
    pub fn is_escape(&self) -> bool {
        self.escape
    }

    /// Whether the output is pretty-printed.
    #[inline]
    pub fn is_pretty_print(&self) -> bool {
        self.pretty_print
    }

    /// The key converter.
    #[inline]
    pub fn converter(&self) -> &KeyConverter {
        &self.key_converter
    }

    /// The unwrap setting.
    #[inline]
    pub fn unwrap_setting(&self) -> &Unwrap {
        &self.unwrap
    }

    /// Indentation settings for the pretty-printer.
    pub fn indent_config(&self) -> IndentConfig {
        IndentConfig {
            indent: self.indent,
            compact: self.compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert!(options.is_escape());
        assert!(!options.is_pretty_print());
        assert_eq!(options.indent_config(), IndentConfig::default());
        assert_eq!(options.unwrap_setting(), &Unwrap::None);
    }

    #[test]
    fn test_builder() {
        let options = Options::new().escape(false).indent(4).compact(false);
        assert!(!options.is_escape());
        assert_eq!(options.indent_config(), IndentConfig { indent: 4, compact: false });
    }

    #[test]
    fn test_unwrap_applies_to() {
        assert!(!Unwrap::None.applies_to("a"));
        assert!(Unwrap::All.applies_to("a"));
        let keys = Unwrap::Keys(vec!["items".into()]);
        assert!(keys.applies_to("items"));
        assert!(!keys.applies_to("other"));
    }
}
