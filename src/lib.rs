//! # ordered_xml
//!
//! Builds XML documents from ordered key-value trees. Aimed at SOAP and
//! XML-RPC message builders that need exact control over element order,
//! attributes, self-closing tags, escaping and date formatting.
//!
//! ## Features
//!
//! - Children emitted in insertion order, or in a validated explicit order
//! - Attributes from a per-node directive or from `@name` keys
//! - `name!` keys for raw content, `name/` keys for empty elements
//! - `xs:date`, `xs:time` and `xs:dateTime` formatting through chrono
//! - Sequences expanded to repeated sibling elements
//! - Optional pretty-printing
//! - Any `Serialize` type as input through serde
//!
//! ## Quick Start
//!
//! ```rust
//! use ordered_xml::{attrs, node, serialize, Options};
//!
//! let envelope = node! {
//!     "soap:Envelope" => node! {
//!         "soap:Body" => node! {
//!             "getUser" => node! { "@xmlns" => "urn:users", "id" => 42 },
//!         },
//!     },
//! }
//! .with_attributes("soap:Envelope", attrs! {
//!     "xmlns:soap" => "http://schemas.xmlsoap.org/soap/envelope/",
//! });
//!
//! let xml = serialize(&envelope, &Options::default()).unwrap();
//! assert_eq!(
//!     xml,
//!     concat!(
//!         r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">"#,
//!         r#"<soap:Body><getUser xmlns="urn:users"><id>42</id></getUser></soap:Body>"#,
//!         "</soap:Envelope>",
//!     )
//! );
//! ```
//!
//! ## Ordering
//!
//! An order directive must name every element key of its node exactly once
//! (attribute keys excluded). Anything else is an error:
//!
//! ```rust
//! use ordered_xml::{node, serialize, Options};
//!
//! let node = node! { "b" => 2, "a" => 1 }.with_order(["a", "b"]);
//! assert_eq!(serialize(&node, &Options::default()).unwrap(), "<a>1</a><b>2</b>");
//!
//! let typo = node! { "b" => 2, "a" => 1 }.with_order(["a", "bb"]);
//! let err = serialize(&typo, &Options::default()).unwrap_err();
//! assert!(err.is_order_mismatch());
//! ```
//!
//! ## Sequences
//!
//! ```rust
//! use ordered_xml::{node, serialize, Options};
//!
//! let node = node! { "item" => vec!["a", "b"] };
//! assert_eq!(
//!     serialize(&node, &Options::default()).unwrap(),
//!     "<item>a</item><item>b</item>"
//! );
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod array;
pub mod attrs;
pub mod error;
pub mod escape;
pub mod format;
pub mod key;
pub mod options;
pub mod order;
pub mod pretty;
pub mod ser;
pub mod translate;
pub mod value;
pub mod writer;

mod tracing_macros;

// Re-export main types and functions
pub use error::{Error, ErrorKind, Position, Result};
pub use escape::escape;
pub use key::KeyConverter;
pub use options::{Options, Unwrap};
pub use pretty::{prettify, IndentConfig};
pub use ser::{to_node, to_string, to_value};
pub use translate::{serialize, serialize_to_writer, translate};
pub use value::{Attributes, Node, Thunk, Value};
pub use writer::{MarkupEmitter, XmlWriter};
