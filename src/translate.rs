//! Tree-to-markup translation.
//!
//! Each node is walked in resolved order. Every child is routed by the kind
//! of its value: content marker, sequence, nested node, self-closing key,
//! nil, then plain scalar.

use crate::array::{self, Expansion};
use crate::attrs::{self, Directive};
use crate::error::Result;
use crate::format::format;
use crate::key::{is_content_marker, is_directive, is_explicit_attribute, Key, CONTENT_KEY};
use crate::options::Options;
use crate::order;
use crate::pretty::prettify;
use crate::tracing_macros::{trace, trace_span};
use crate::value::{Node, Value};
use crate::writer::{MarkupEmitter, XmlWriter};
use std::io::Write;

static EMPTY: Value = Value::Str(String::new());

/// Serializes a node to an XML fragment.
///
/// The output is only produced once the whole tree has been translated: an
/// order mismatch anywhere in the tree fails the call with no output.
///
/// ```rust
/// use ordered_xml::{node, serialize, Options};
///
/// let xml = serialize(&node! { "user" => node! { "name" => "Alice" } }, &Options::default()).unwrap();
/// assert_eq!(xml, "<user><name>Alice</name></user>");
/// ```
pub fn serialize(node: &Node, options: &Options) -> Result<String> {
    trace_span!("serialize", entries = node.len());
    let xml = fragment(node, options)?;
    if options.is_pretty_print() {
        prettify(&xml, &options.indent_config())
    } else {
        Ok(xml)
    }
}

/// Serializes a node to a writer.
pub fn serialize_to_writer<W: Write>(mut writer: W, node: &Node, options: &Options) -> Result<()> {
    let xml = serialize(node, options)?;
    writer.write_all(xml.as_bytes())?;
    Ok(())
}

/// Translates a node without pretty-printing.
pub(crate) fn fragment(node: &Node, options: &Options) -> Result<String> {
    let mut writer = XmlWriter::with_capacity(node.len() * 32);
    translate(node, options, &mut writer)?;
    Ok(writer.finalize())
}

/// Translates the children of `node` into `out`.
///
/// On error, `out` may hold markup for the children translated so far and
/// should be discarded.
pub fn translate<E: MarkupEmitter>(node: &Node, options: &Options, out: &mut E) -> Result<()> {
    let directive = Directive::of(node)?;
    let keys = order::resolve(node)?;
    trace!(?keys, "translating node");

    for raw in keys {
        let Some(value) = node.get(raw) else {
            continue;
        };
        let key = Key::parse(raw);
        let escape = options.is_escape() && key.escape;

        if key.content {
            out.append(&format(value, escape, options)?);
            continue;
        }

        let attributes = attrs::for_child(&directive, raw, value)?;
        let tag = key.tag(options.converter());

        match child_value(value)? {
            Value::Seq(items) => {
                let expansion = Expansion {
                    tag: &tag,
                    escape,
                    self_closing: key.self_closing,
                    unwrap: options.unwrap_setting().applies_to(key.name),
                };
                array::expand(items, expansion, &attributes, options, out)?;
            }
            Value::Node(child) => {
                out.open(&tag, &attrs::render(&attributes, None, options)?);
                translate(child, options, out)?;
                out.close(&tag);
            }
            _ if key.self_closing => {
                out.self_closing(&tag, &attrs::render(&attributes, None, options)?);
            }
            Value::Nil => out.self_closing(&tag, &attrs::nil()),
            scalar => {
                out.open(&tag, &attrs::render(&attributes, None, options)?);
                out.append(&format(scalar, escape, options)?);
                out.close(&tag);
            }
        }
    }

    Ok(())
}

/// The value emitted for a child.
///
/// A node holding a non-nil content marker is replaced by the marker's
/// value. A node left with nothing to emit, or an empty replacement, becomes
/// the empty string. A replaced node is not translated, so its directives
/// are checked here.
fn child_value(value: &Value) -> Result<&Value> {
    let Value::Node(node) = value else {
        return Ok(value);
    };
    let resolved = match node.get(CONTENT_KEY) {
        Some(content) if !content.is_nil() => content,
        _ => value,
    };
    let resolved = if emits_nothing(resolved) {
        &EMPTY
    } else {
        resolved
    };
    if !std::ptr::eq(resolved, value) {
        Directive::of(node)?;
        order::resolve(node)?;
    }
    Ok(resolved)
}

fn emits_nothing(value: &Value) -> bool {
    match value {
        Value::Node(node) => node.iter().all(|(k, v)| {
            is_explicit_attribute(k) || is_directive(k) || (is_content_marker(k) && v.is_nil())
        }),
        other => other.is_empty_container(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::key::KeyConverter;
    use crate::options::Unwrap;
    use crate::{attrs, node};
    use chrono::{NaiveDate, NaiveTime};

    fn xml(node: Node) -> String {
        serialize(&node, &Options::default()).unwrap()
    }

    #[test]
    fn test_scalar_children() {
        assert_eq!(
            xml(node! { "name" => "Alice", "age" => 30, "admin" => false }),
            "<name>Alice</name><age>30</age><admin>false</admin>"
        );
    }

    #[test]
    fn test_nested_nodes() {
        let node = node! { "user" => node! { "address" => node! { "city" => "Oslo" } } };
        assert_eq!(xml(node), "<user><address><city>Oslo</city></address></user>");
    }

    #[test]
    fn test_escaping_and_raw_keys() {
        assert_eq!(xml(node! { "tag" => "<a & b>" }), "<tag>&lt;a &amp; b&gt;</tag>");
        assert_eq!(xml(node! { "tag!" => "<a & b>" }), "<tag><a & b></tag>");
    }

    #[test]
    fn test_escape_option_off() {
        let options = Options::new().escape(false);
        let out = serialize(&node! { "tag" => "<b>" }, &options).unwrap();
        assert_eq!(out, "<tag><b></tag>");
    }

    #[test]
    fn test_self_closing_ignores_value() {
        assert_eq!(xml(node! { "empty/" => "ignored" }), "<empty/>");
        assert_eq!(xml(node! { "empty/" => Value::Nil }), "<empty/>");
        let node = node! { "empty/" => 5 }.with_attributes("empty/", attrs! { "a" => "b" });
        assert_eq!(xml(node), r#"<empty a="b"/>"#);
    }

    #[test]
    fn test_self_closing_with_attribute_only_node() {
        assert_eq!(xml(node! { "img/" => node! { "@src" => "a.png" } }), r#"<img src="a.png"/>"#);
    }

    #[test]
    fn test_nil_value() {
        assert_eq!(xml(node! { "tag" => Value::Nil }), r#"<tag xsi:nil="true"/>"#);
        let node = node! { "tag" => Value::Nil }.with_attributes("tag", attrs! { "id" => 1 });
        assert_eq!(xml(node), r#"<tag xsi:nil="true"/>"#);
    }

    #[test]
    fn test_directive_attributes() {
        let node = node! { "price" => 10 }.with_attributes("price", attrs! { "currency" => "EUR" });
        assert_eq!(xml(node), r#"<price currency="EUR">10</price>"#);
    }

    #[test]
    fn test_explicit_attribute_precedence() {
        let node = node! { "child" => node! { "@id" => 2, "content!" => "x" } }
            .with_attributes("child", attrs! { "id" => 1 });
        assert_eq!(xml(node), r#"<child id="2">x</child>"#);
    }

    #[test]
    fn test_content_replacement_is_escaped_by_parent_key() {
        let node = node! { "note" => node! { "@lang" => "en", "content!" => "a < b" } };
        assert_eq!(xml(node), r#"<note lang="en">a &lt; b</note>"#);
        let node = node! { "note!" => node! { "content!" => "a < b" } };
        assert_eq!(xml(node), "<note>a < b</note>");
    }

    #[test]
    fn test_content_marker_at_node_level_is_raw() {
        let node = node! { "p" => node! { "b" => "bold", "content!" => Value::Nil } };
        assert_eq!(xml(node), "<p><b>bold</b></p>");
        assert_eq!(xml(node! { "content!" => "<x/>" }), "<x/>");
    }

    #[test]
    fn test_attribute_only_node_collapses() {
        let node = node! { "link" => node! { "@href" => "/a" } };
        assert_eq!(xml(node), r#"<link href="/a"></link>"#);
        assert_eq!(xml(node! { "empty" => node! {} }), "<empty></empty>");
        assert_eq!(xml(node! { "empty" => node! { "content!" => "" } }), "<empty></empty>");
    }

    fn spurious(node: Node) -> Vec<String> {
        let err = serialize(&node, &Options::default()).unwrap_err();
        match err.kind() {
            ErrorKind::OrderMismatch { missing, spurious } => {
                assert!(missing.is_empty());
                spurious.clone()
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_collapsed_child_order_is_checked() {
        let attribute_only = node! { "x" => node! { "@id" => 1 }.with_order(["ghost"]) };
        assert_eq!(spurious(attribute_only), ["ghost"]);

        let empty = node! { "x" => Node::new().with_order(["ghost"]) };
        assert_eq!(spurious(empty), ["ghost"]);

        let legacy = node! { "x" => node! { "@id" => 1, "order!" => vec!["ghost"] } };
        assert_eq!(spurious(legacy), ["ghost"]);
    }

    #[test]
    fn test_replaced_child_order_is_checked() {
        let node = node! { "x" => node! { "content!" => "text" }.with_order(["ghost"]) };
        assert_eq!(spurious(node), ["ghost"]);

        let valid = node! {
            "x" => node! { "@id" => 1, "content!" => "t" }.with_order(["content!"]),
        };
        assert_eq!(xml(valid), r#"<x id="1">t</x>"#);

        let empty_order = node! { "x" => node! { "@id" => 1 }.with_order(Vec::<String>::new()) };
        assert_eq!(xml(empty_order), r#"<x id="1"></x>"#);
    }

    #[test]
    fn test_collapsed_child_directive_conflict() {
        let child = node! { "@id" => 1, "attributes!" => node! {} }.with_attributes("y", attrs! {});
        let node = node! { "x" => child };
        let err = serialize(&node, &Options::default()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ConflictingDirective(_)));
    }

    #[test]
    fn test_content_holding_a_node() {
        let node = node! { "wrap" => node! { "@id" => 1, "content!" => node! { "inner" => "x" } } };
        assert_eq!(xml(node), r#"<wrap id="1"><inner>x</inner></wrap>"#);
    }

    #[test]
    fn test_content_holding_a_sequence() {
        let node = node! { "n" => node! { "@k" => "v", "content!" => vec![1, 2] } };
        assert_eq!(xml(node), r#"<n k="v">1</n><n k="v">2</n>"#);
    }

    #[test]
    fn test_sequence_with_order() {
        let node = node! { "items" => vec![1, 2, 3] }.with_order(["items"]);
        assert_eq!(xml(node), "<items>1</items><items>2</items><items>3</items>");
    }

    #[test]
    fn test_order_directive_applies() {
        let node = node! { "b" => 2, "a" => 1, "@id" => 9 }.with_order(["a", "b"]);
        assert_eq!(xml(node), "<a>1</a><b>2</b>");
    }

    #[test]
    fn test_nested_order_mismatch_aborts() {
        let node = node! {
            "ok" => 1,
            "inner" => node! { "a" => 1, "b" => 2 }.with_order(["a"]),
        };
        let err = serialize(&node, &Options::default()).unwrap_err();
        match err.kind() {
            ErrorKind::OrderMismatch { missing, spurious } => {
                assert_eq!(missing, &["b".to_string()]);
                assert!(spurious.is_empty());
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_dates_and_times() {
        let node = node! {
            "day" => NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            "at" => NaiveTime::from_hms_opt(13, 5, 9).unwrap(),
        };
        assert_eq!(xml(node), "<day>2024-01-05</day><at>13:05:09</at>");
    }

    #[test]
    fn test_lazy_value() {
        let node = node! { "now" => Value::lazy(|| Value::from("later")) };
        assert_eq!(xml(node), "<now>later</now>");
    }

    #[test]
    fn test_key_converter() {
        let options = Options::new().key_converter(KeyConverter::LowerCamelcase);
        let node = node! { "user_name" => "a", "home_page!" => "<b/>", "line_break/" => "" };
        let out = serialize(&node, &options).unwrap();
        assert_eq!(out, "<userName>a</userName><homePage><b/></homePage><lineBreak/>");
    }

    #[test]
    fn test_unwrap_option() {
        let node = node! { "users" => vec![node! { "id" => 1 }, node! { "id" => 2 }] };
        let options = Options::new().unwrap(Unwrap::Keys(vec!["users".into()]));
        let out = serialize(&node, &options).unwrap();
        assert_eq!(out, "<users><id>1</id><id>2</id></users>");
    }

    #[test]
    fn test_pretty_print() {
        let node = node! { "user" => node! { "name" => "Alice", "tags" => vec!["a", "b"] } };
        let out = serialize(&node, &Options::new().pretty_print(true)).unwrap();
        assert_eq!(
            out,
            "<user>\n  <name>Alice</name>\n  <tags>a</tags>\n  <tags>b</tags>\n</user>"
        );
    }

    #[test]
    fn test_to_writer() {
        let mut buffer = Vec::new();
        serialize_to_writer(&mut buffer, &node! { "a" => 1 }, &Options::default()).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "<a>1</a>");
    }

    #[test]
    fn test_custom_emitter() {
        #[derive(Default)]
        struct Events(Vec<String>);

        impl MarkupEmitter for Events {
            fn open(&mut self, tag: &str, _: &[(String, String)]) {
                self.0.push(format!("open {}", tag));
            }
            fn close(&mut self, tag: &str) {
                self.0.push(format!("close {}", tag));
            }
            fn self_closing(&mut self, tag: &str, _: &[(String, String)]) {
                self.0.push(format!("empty {}", tag));
            }
            fn append(&mut self, text: &str) {
                self.0.push(format!("text {}", text));
            }
            fn finalize(self) -> String {
                self.0.join("|")
            }
        }

        let mut events = Events::default();
        translate(&node! { "a" => node! { "b/" => 1 }, "c" => "x" }, &Options::default(), &mut events)
            .unwrap();
        assert_eq!(events.finalize(), "open a|empty b|close a|open c|text x|close c");
    }
}
