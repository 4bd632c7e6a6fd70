//! Error types for building and pretty-printing XML.

use std::fmt::{self, Display};
use std::io;

/// Result type alias for ordered_xml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for XML building.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    position: Option<Position>,
}

/// Position information for errors raised while reading markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset from start.
    pub offset: usize,
}

impl Position {
    /// Computes the line and column of a byte offset into `input`.
    pub fn from_offset(input: &str, offset: usize) -> Self {
        let offset = offset.min(input.len());
        let before = &input.as_bytes()[..offset];
        let line = memchr::memchr_iter(b'\n', before).count() + 1;
        let line_start = memchr::memrchr(b'\n', before).map_or(0, |i| i + 1);
        Self {
            line,
            column: offset - line_start + 1,
            offset,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug)]
pub enum ErrorKind {
    /// An I/O error occurred.
    Io(io::Error),
    /// The order directive of a node does not name exactly the node's keys.
    OrderMismatch {
        /// Keys present on the node but absent from the order directive.
        missing: Vec<String>,
        /// Keys named by the order directive but absent from the node.
        spurious: Vec<String>,
    },
    /// The same directive was given twice on one node.
    ConflictingDirective(String),
    /// An attribute was given a value that cannot be an attribute.
    InvalidAttribute(String),
    /// Unexpected end of input.
    UnexpectedEof,
    /// Invalid XML syntax.
    Syntax(String),
    /// Unclosed tag.
    UnclosedTag(String),
    /// Mismatched closing tag.
    MismatchedTag {
        /// The expected tag name.
        expected: String,
        /// The actual tag name found.
        found: String,
    },
    /// Custom error message.
    Custom(String),
    /// Unsupported operation.
    Unsupported(String),
}

impl Error {
    /// Creates a new error with the given kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, position: None }
    }

    /// Creates a new error with position information.
    #[inline]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the position where the error occurred.
    #[inline]
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Creates an order mismatch error.
    #[inline]
    pub fn order_mismatch(missing: Vec<String>, spurious: Vec<String>) -> Self {
        Self::new(ErrorKind::OrderMismatch { missing, spurious })
    }

    /// Creates a conflicting directive error.
    #[inline]
    pub fn conflicting_directive<S: Into<String>>(directive: S) -> Self {
        Self::new(ErrorKind::ConflictingDirective(directive.into()))
    }

    /// Creates an invalid attribute error.
    #[inline]
    pub fn invalid_attribute<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::InvalidAttribute(msg.into()))
    }

    /// Creates an unexpected EOF error.
    #[inline]
    pub fn unexpected_eof() -> Self {
        Self::new(ErrorKind::UnexpectedEof)
    }

    /// Creates a syntax error.
    #[inline]
    pub fn syntax<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::Syntax(msg.into()))
    }

    /// Creates an unclosed tag error.
    #[inline]
    pub fn unclosed_tag<S: Into<String>>(tag: S) -> Self {
        Self::new(ErrorKind::UnclosedTag(tag.into()))
    }

    /// Creates a mismatched tag error.
    #[inline]
    pub fn mismatched_tag<S: Into<String>>(expected: S, found: S) -> Self {
        Self::new(ErrorKind::MismatchedTag {
            expected: expected.into(),
            found: found.into(),
        })
    }

    /// Creates a custom error.
    #[inline]
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::Custom(msg.into()))
    }

    /// Creates an unsupported operation error.
    #[inline]
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::Unsupported(msg.into()))
    }

    /// Returns true if this is an order mismatch.
    #[inline]
    pub fn is_order_mismatch(&self) -> bool {
        matches!(self.kind, ErrorKind::OrderMismatch { .. })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Io(e) => write!(f, "I/O error: {}", e),
            ErrorKind::OrderMismatch { missing, spurious } => {
                write!(f, "order directive does not match node keys")?;
                if !missing.is_empty() {
                    write!(f, "; missing elements {:?}", missing)?;
                }
                if !spurious.is_empty() {
                    write!(f, "; spurious elements {:?}", spurious)?;
                }
                Ok(())
            }
            ErrorKind::ConflictingDirective(name) => {
                write!(f, "directive given twice on one node: {}", name)
            }
            ErrorKind::InvalidAttribute(msg) => write!(f, "invalid attribute: {}", msg),
            ErrorKind::UnexpectedEof => write!(f, "unexpected end of input"),
            ErrorKind::Syntax(msg) => write!(f, "syntax error: {}", msg),
            ErrorKind::UnclosedTag(tag) => write!(f, "unclosed tag: <{}>", tag),
            ErrorKind::MismatchedTag { expected, found } => {
                write!(f, "mismatched closing tag: expected </{}>, found </{}>", expected, found)
            }
            ErrorKind::Custom(msg) => write!(f, "{}", msg),
            ErrorKind::Unsupported(msg) => write!(f, "unsupported: {}", msg),
        }?;

        if let Some(pos) = self.position {
            write!(f, " at line {}, column {} (offset {})", pos.line, pos.column, pos.offset)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::new(ErrorKind::Io(e))
    }
}

impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self::custom(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_mismatch_display() {
        let err = Error::order_mismatch(vec!["b".into()], vec!["c".into()]);
        assert_eq!(
            err.to_string(),
            r#"order directive does not match node keys; missing elements ["b"]; spurious elements ["c"]"#
        );
        assert!(err.is_order_mismatch());
    }

    #[test]
    fn test_order_mismatch_only_missing() {
        let err = Error::order_mismatch(vec!["b".into()], Vec::new());
        assert!(err.to_string().ends_with(r#"missing elements ["b"]"#));
        assert!(!err.to_string().contains("spurious"));
    }

    #[test]
    fn test_error_with_position() {
        let err = Error::syntax("expected '>'")
            .with_position(Position { line: 5, column: 10, offset: 42 });
        assert_eq!(
            err.to_string(),
            "syntax error: expected '>' at line 5, column 10 (offset 42)"
        );
    }

    #[test]
    fn test_position_from_offset() {
        let input = "<a>\n  <b>\n</a>";
        let pos = Position::from_offset(input, 6);
        assert_eq!(pos, Position { line: 2, column: 3, offset: 6 });
        assert_eq!(Position::from_offset(input, 0).line, 1);
    }

    #[test]
    fn test_mismatched_tag_error() {
        let err = Error::mismatched_tag("foo", "bar");
        assert_eq!(
            err.to_string(),
            "mismatched closing tag: expected </foo>, found </bar>"
        );
    }

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = Error::from(io_err);
        assert!(err.to_string().contains("I/O error"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_custom_error() {
        let err = Error::custom("something went wrong");
        assert_eq!(err.to_string(), "something went wrong");
    }
}
