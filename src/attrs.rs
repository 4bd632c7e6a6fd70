//! Attribute extraction.
//!
//! An element gets attributes from two places: the attributes directive of
//! its parent node, keyed by the child's key, and `@name` keys inside the
//! child's own node value. Both are merged and the `@` keys win.

use crate::error::{Error, Result};
use crate::format::format;
use crate::key::{is_explicit_attribute, ATTRIBUTES_KEY};
use crate::options::Options;
use crate::tracing_macros::trace;
use crate::value::{Attributes, Node, Value};
use indexmap::IndexMap;

/// The attributes directive of one node.
#[derive(Debug, Clone, Copy)]
pub enum Directive<'a> {
    /// No directive.
    Empty,
    /// Set through [`Node::with_attributes`].
    Canonical(&'a IndexMap<String, Attributes>),
    /// Stored under the `attributes!` key.
    Entry(&'a Node),
}

impl<'a> Directive<'a> {
    /// Reads the attributes directive of `node`.
    pub fn of(node: &'a Node) -> Result<Self> {
        match (node.attributes(), node.get(ATTRIBUTES_KEY)) {
            (Some(_), Some(_)) => Err(Error::conflicting_directive(ATTRIBUTES_KEY)),
            (Some(map), None) => Ok(Directive::Canonical(map)),
            (None, Some(Value::Node(entry))) => Ok(Directive::Entry(entry)),
            (None, Some(Value::Nil)) | (None, None) => Ok(Directive::Empty),
            (None, Some(other)) => Err(Error::invalid_attribute(format!(
                "`{}` must map keys to attribute maps, got {}",
                ATTRIBUTES_KEY,
                other.kind_name()
            ))),
        }
    }

    /// Attributes declared for the child under `key`.
    pub fn get(&self, key: &str) -> Result<Attributes> {
        let attributes = match self {
            Directive::Empty => Attributes::new(),
            Directive::Canonical(map) => map.get(key).cloned().unwrap_or_default(),
            Directive::Entry(entry) => match entry.get(key) {
                None | Some(Value::Nil) => Attributes::new(),
                Some(Value::Node(attrs)) => attrs
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.clone()))
                    .collect(),
                Some(other) => {
                    return Err(Error::invalid_attribute(format!(
                        "attributes for `{}` must be a map, got {}",
                        key,
                        other.kind_name()
                    )))
                }
            },
        };
        for (name, value) in &attributes {
            check_value(name, value)?;
        }
        Ok(attributes)
    }
}

/// Collects the `@name` keys of a node, prefix stripped.
pub fn explicit(node: &Node) -> Result<Attributes> {
    let mut attributes = Attributes::new();
    for (key, value) in node.iter().filter(|(k, _)| is_explicit_attribute(k)) {
        let name = &key[1..];
        check_value(name, value)?;
        attributes.insert(name.to_string(), value.clone());
    }
    Ok(attributes)
}

/// Final attributes for the child `key` holding `value`.
pub fn for_child(directive: &Directive<'_>, key: &str, value: &Value) -> Result<Attributes> {
    let mut attributes = directive.get(key)?;
    if let Value::Node(node) = value {
        let explicit = explicit(node)?;
        if !explicit.is_empty() {
            trace!(key, count = explicit.len(), "merging explicit attributes");
        }
        merge(&mut attributes, explicit);
    }
    Ok(attributes)
}

/// Merges `over` into `base`; entries of `over` win.
pub fn merge(base: &mut Attributes, over: Attributes) {
    for (name, value) in over {
        base.insert(name, value);
    }
}

fn check_value(name: &str, value: &Value) -> Result<()> {
    match value {
        Value::Node(_) => Err(Error::invalid_attribute(format!(
            "value of `{}` is a node; attribute values must be scalars",
            name
        ))),
        Value::Seq(items) => items.iter().try_for_each(|item| match item {
            Value::Node(_) | Value::Seq(_) => Err(Error::invalid_attribute(format!(
                "value of `{}` contains a {}; attribute values must be scalars",
                name,
                item.kind_name()
            ))),
            _ => Ok(()),
        }),
        _ => Ok(()),
    }
}

/// Renders attributes to name/value text pairs.
///
/// With an `index`, a sequence value contributes its item at that index, or
/// nothing past its end. Without one, sequence items are joined by spaces.
/// Nil values are left out.
pub fn render(
    attributes: &Attributes,
    index: Option<usize>,
    options: &Options,
) -> Result<Vec<(String, String)>> {
    let mut rendered = Vec::with_capacity(attributes.len());
    for (name, value) in attributes {
        let text = match (value, index) {
            (Value::Seq(items), Some(i)) => match items.get(i) {
                Some(item) => scalar_text(item, options)?,
                None => None,
            },
            (Value::Seq(items), None) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    parts.extend(scalar_text(item, options)?);
                }
                Some(parts.join(" "))
            }
            (value, _) => scalar_text(value, options)?,
        };
        if let Some(text) = text {
            rendered.push((name.clone(), text));
        }
    }
    Ok(rendered)
}

fn scalar_text(value: &Value, options: &Options) -> Result<Option<String>> {
    match value {
        Value::Nil => Ok(None),
        Value::Lazy(thunk) => scalar_text(&thunk.eval(), options),
        Value::Node(_) | Value::Seq(_) => Err(Error::invalid_attribute(format!(
            "a {} cannot be an attribute value",
            value.kind_name()
        ))),
        other => format(other, false, options).map(Some),
    }
}

/// The attribute list of a nil element.
pub fn nil() -> Vec<(String, String)> {
    vec![("xsi:nil".to_string(), "true".to_string())]
}
