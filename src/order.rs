//! Emission order of a node's children.
//!
//! Without an order directive, children come out in insertion order. With
//! one, the directive must name exactly the node's element keys: a key left
//! out or a name that matches nothing fails the whole serialization instead
//! of silently dropping or appending children. Attribute keys (`@name`) are
//! not elements and take no part in the comparison.

use crate::error::{Error, Result};
use crate::format::format;
use crate::key::{is_directive, is_explicit_attribute, ORDER_KEY};
use crate::options::Options;
use crate::tracing_macros::debug;
use crate::value::{Node, Value};
use indexmap::IndexSet;

/// Returns the keys of `node` in emission order.
///
/// The canonical directive ([`Node::with_order`]) and the legacy `order!`
/// entry are mutually exclusive. A legacy entry that is not a sequence is
/// ignored.
pub fn resolve(node: &Node) -> Result<Vec<&str>> {
    let requested = match (node.order(), node.get(ORDER_KEY)) {
        (Some(_), Some(_)) => return Err(Error::conflicting_directive(ORDER_KEY)),
        (Some(order), None) => Some(order.to_vec()),
        (None, Some(Value::Seq(items))) => Some(
            items
                .iter()
                .map(order_name)
                .collect::<Result<Vec<_>>>()?,
        ),
        (None, _) => None,
    };

    let orderable: IndexSet<&str> = node
        .keys()
        .filter(|k| !is_directive(k) && !is_explicit_attribute(k))
        .collect();

    let Some(requested) = requested else {
        return Ok(orderable.into_iter().collect());
    };

    let requested: Vec<String> = requested
        .into_iter()
        .filter(|k| !is_explicit_attribute(k))
        .collect();
    let named: IndexSet<&str> = requested.iter().map(String::as_str).collect();

    let missing: Vec<String> = orderable
        .iter()
        .filter(|k| !named.contains(*k))
        .map(|k| k.to_string())
        .collect();
    let spurious: Vec<String> = named
        .iter()
        .filter(|k| !orderable.contains(*k))
        .map(|k| k.to_string())
        .collect();

    if !missing.is_empty() || !spurious.is_empty() {
        debug!(?missing, ?spurious, "order directive rejected");
        return Err(Error::order_mismatch(missing, spurious));
    }

    Ok(requested
        .iter()
        .filter_map(|k| node.stored_key(k))
        .collect())
}

fn order_name(item: &Value) -> Result<String> {
    match item {
        Value::Str(s) => Ok(s.clone()),
        other => format(other, false, &Options::default()),
    }
}
