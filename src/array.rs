//! Sequence expansion.
//!
//! A sequence stored under a key becomes one sibling element per item, all
//! sharing the key's tag.

use crate::attrs;
use crate::error::Result;
use crate::format::format;
use crate::key::NESTED_ELEMENT_NAME;
use crate::options::Options;
use crate::tracing_macros::trace;
use crate::translate::translate;
use crate::value::{Attributes, Value};
use crate::writer::MarkupEmitter;

/// How one sequence is expanded.
#[derive(Debug, Clone, Copy)]
pub struct Expansion<'a> {
    /// Tag of every emitted sibling.
    pub tag: &'a str,
    /// Whether scalar items are escaped. Items of nested sequences follow
    /// the global escape option instead.
    pub escape: bool,
    /// Whether every sibling is emitted as an empty element.
    pub self_closing: bool,
    /// Whether the siblings are wrapped in one enclosing tag.
    ///
    /// The wrapper carries every attribute, sequence values joined by spaces.
    pub unwrap: bool,
}

/// Emits `items` as sibling elements.
///
/// An empty sequence emits nothing, except that a self-closing key with
/// attributes still yields one empty element carrying them. Sequence-valued
/// attributes are distributed by index; a node item's own `@` keys override
/// them for that item.
pub fn expand<E: MarkupEmitter>(
    items: &[Value],
    expansion: Expansion<'_>,
    attributes: &Attributes,
    options: &Options,
    out: &mut E,
) -> Result<()> {
    let Expansion {
        tag,
        escape,
        self_closing,
        unwrap,
    } = expansion;
    trace!(tag, items = items.len(), self_closing, unwrap, "expanding sequence");

    if items.is_empty() {
        if self_closing && !attributes.is_empty() {
            out.self_closing(tag, &attrs::render(attributes, None, options)?);
        }
        return Ok(());
    }

    if unwrap {
        out.open(tag, &attrs::render(attributes, None, options)?);
    }

    for (index, item) in items.iter().enumerate() {
        let mut item_attributes = attributes.clone();
        if let Value::Node(node) = item {
            attrs::merge(&mut item_attributes, attrs::explicit(node)?);
        }
        let rendered = attrs::render(&item_attributes, Some(index), options)?;

        if self_closing {
            out.self_closing(tag, &rendered);
            continue;
        }

        match item {
            Value::Node(node) if unwrap => translate(node, options, out)?,
            Value::Node(node) => {
                out.open(tag, &rendered);
                translate(node, options, out)?;
                out.close(tag);
            }
            Value::Seq(inner) => {
                let nested = Expansion {
                    tag: NESTED_ELEMENT_NAME,
                    escape: options.is_escape(),
                    self_closing: false,
                    unwrap: false,
                };
                out.open(tag, &rendered);
                expand(inner, nested, &Attributes::new(), options, out)?;
                out.close(tag);
            }
            Value::Nil => out.self_closing(tag, &attrs::nil()),
            scalar => {
                out.open(tag, &rendered);
                out.append(&format(scalar, escape, options)?);
                out.close(tag);
            }
        }
    }

    if unwrap {
        out.close(tag);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::writer::XmlWriter;
    use crate::{attrs, node};

    fn plain(tag: &str) -> Expansion<'_> {
        Expansion {
            tag,
            escape: true,
            self_closing: false,
            unwrap: false,
        }
    }

    fn run(items: Vec<Value>, expansion: Expansion<'_>, attributes: Attributes) -> String {
        let mut out = XmlWriter::new();
        expand(&items, expansion, &attributes, &Options::default(), &mut out).unwrap();
        out.finalize()
    }

    #[test]
    fn test_scalars_become_siblings() {
        let xml = run(vec![1.into(), 2.into(), 3.into()], plain("items"), attrs! {});
        assert_eq!(xml, "<items>1</items><items>2</items><items>3</items>");
    }

    #[test]
    fn test_scalar_escaping_follows_flag() {
        let raw = Expansion { escape: false, ..plain("t") };
        assert_eq!(run(vec!["<b>".into()], raw, attrs! {}), "<t><b></t>");
        assert_eq!(run(vec!["<b>".into()], plain("t"), attrs! {}), "<t>&lt;b&gt;</t>");
    }

    #[test]
    fn test_shared_attributes_repeat() {
        let xml = run(vec!["a".into(), "b".into()], plain("t"), attrs! { "lang" => "en" });
        assert_eq!(xml, r#"<t lang="en">a</t><t lang="en">b</t>"#);
    }

    #[test]
    fn test_sequence_attributes_distribute_by_index() {
        let xml = run(
            vec!["a".into(), "b".into(), "c".into()],
            plain("t"),
            attrs! { "id" => vec![1, 2] },
        );
        assert_eq!(xml, r#"<t id="1">a</t><t id="2">b</t><t>c</t>"#);
    }

    #[test]
    fn test_node_items() {
        let items = vec![
            node! { "@id" => 1, "name" => "x" }.into(),
            node! { "name" => "y" }.into(),
        ];
        let xml = run(items, plain("user"), attrs! { "id" => 0, "kind" => "k" });
        assert_eq!(
            xml,
            r#"<user id="1" kind="k"><name>x</name></user><user id="0" kind="k"><name>y</name></user>"#
        );
    }

    #[test]
    fn test_nil_item() {
        let xml = run(vec!["a".into(), Value::Nil], plain("t"), attrs! { "x" => 1 });
        assert_eq!(xml, r#"<t x="1">a</t><t xsi:nil="true"/>"#);
    }

    #[test]
    fn test_nested_sequence() {
        let xml = run(vec![vec!["a", "b"].into()], plain("row"), attrs! {});
        assert_eq!(xml, "<row><element>a</element><element>b</element></row>");
    }

    #[test]
    fn test_self_closing_items() {
        let expansion = Expansion { self_closing: true, ..plain("hr") };
        let xml = run(vec!["ignored".into(), 2.into()], expansion, attrs! { "n" => vec![1, 2] });
        assert_eq!(xml, r#"<hr n="1"/><hr n="2"/>"#);
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(run(Vec::new(), plain("t"), attrs! { "a" => 1 }), "");
        let expansion = Expansion { self_closing: true, ..plain("t") };
        assert_eq!(run(Vec::new(), expansion, attrs! {}), "");
        assert_eq!(run(Vec::new(), expansion, attrs! { "a" => 1 }), r#"<t a="1"/>"#);
    }

    #[test]
    fn test_unwrap() {
        let expansion = Expansion { unwrap: true, ..plain("items") };
        let items = vec![node! { "id" => 1 }.into(), node! { "id" => 2 }.into()];
        let xml = run(items, expansion, attrs! { "type" => "list" });
        assert_eq!(xml, r#"<items type="list"><id>1</id><id>2</id></items>"#);
    }

    #[test]
    fn test_unwrap_scalars_keep_item_tags() {
        let expansion = Expansion { unwrap: true, ..plain("n") };
        assert_eq!(run(vec![1.into(), 2.into()], expansion, attrs! {}), "<n><n>1</n><n>2</n></n>");
    }

    #[test]
    fn test_unwrap_wrapper_keeps_sequence_attributes() {
        let expansion = Expansion { unwrap: true, ..plain("n") };
        let attributes = attrs! { "id" => vec![7, 8], "k" => "v" };
        let xml = run(vec![1.into(), 2.into()], expansion, attributes);
        assert_eq!(xml, r#"<n id="7 8" k="v"><n id="7" k="v">1</n><n id="8" k="v">2</n></n>"#);
    }

    #[test]
    fn test_nested_sequence_is_escaped_under_raw_key() {
        let raw = Expansion { escape: false, ..plain("row") };
        let xml = run(vec![vec!["<b>"].into(), "<i>".into()], raw, attrs! {});
        assert_eq!(xml, "<row><element>&lt;b&gt;</element></row><row><i></row>");
    }

    #[test]
    fn test_invalid_item_attribute() {
        let items = vec![node! { "@id" => node! {} }.into()];
        let mut out = XmlWriter::new();
        let err = expand(&items, plain("t"), &attrs! {}, &Options::default(), &mut out).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidAttribute(_)));
    }
}
