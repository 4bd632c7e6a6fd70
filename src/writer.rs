//! Low-level markup emission.
//!
//! The tree translator never writes angle brackets itself. It drives a
//! [`MarkupEmitter`], which knows how to open, close and self-close tags and
//! how to quote attribute values. [`XmlWriter`] is the string-backed
//! implementation used by [`serialize`](crate::serialize).

use crate::escape::escape_to;

/// Receiver of tag events from the tree translator.
///
/// Text passed to [`append`](MarkupEmitter::append) is already escaped (or
/// deliberately raw) and must be written verbatim. Attribute values arrive
/// unescaped; the emitter is responsible for quoting them.
pub trait MarkupEmitter {
    /// Writes an opening tag with the given attributes.
    fn open(&mut self, tag: &str, attributes: &[(String, String)]);

    /// Writes the closing tag for `tag`.
    fn close(&mut self, tag: &str);

    /// Writes an empty element with the given attributes.
    fn self_closing(&mut self, tag: &str, attributes: &[(String, String)]);

    /// Appends text or prebuilt markup.
    fn append(&mut self, text: &str);

    /// Returns the markup produced so far.
    fn finalize(self) -> String
    where
        Self: Sized;
}

/// A string-backed XML writer.
#[derive(Debug, Default)]
pub struct XmlWriter {
    output: String,
    /// Stack of open element names.
    element_stack: Vec<String>,
}

impl XmlWriter {
    /// Creates a new XML writer.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new XML writer with preallocated output.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: String::with_capacity(capacity),
            element_stack: Vec::new(),
        }
    }

    fn write_tag_start(&mut self, tag: &str, attributes: &[(String, String)]) {
        self.output.push('<');
        self.output.push_str(tag);
        for (name, value) in attributes {
            self.output.push(' ');
            self.output.push_str(name);
            self.output.push_str("=\"");
            escape_to(value, &mut self.output);
            self.output.push('"');
        }
    }
}

impl MarkupEmitter for XmlWriter {
    fn open(&mut self, tag: &str, attributes: &[(String, String)]) {
        self.write_tag_start(tag, attributes);
        self.output.push('>');
        self.element_stack.push(tag.to_string());
    }

    fn close(&mut self, tag: &str) {
        let opened = self.element_stack.pop();
        debug_assert_eq!(opened.as_deref(), Some(tag), "unbalanced close");
        self.output.push_str("</");
        self.output.push_str(tag);
        self.output.push('>');
    }

    fn self_closing(&mut self, tag: &str, attributes: &[(String, String)]) {
        self.write_tag_start(tag, attributes);
        self.output.push_str("/>");
    }

    fn append(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn finalize(self) -> String {
        self.output
    }
}
