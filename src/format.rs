//! Scalar-to-text conversion.

use crate::error::Result;
use crate::escape::escape_if;
use crate::options::Options;
use crate::translate;
use crate::value::Value;

/// `xs:date` format.
pub const XS_DATE_FORMAT: &str = "%Y-%m-%d";

/// `xs:time` format.
pub const XS_TIME_FORMAT: &str = "%H:%M:%S";

/// `xs:dateTime` format.
pub const XS_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Converts a value to its XML text.
///
/// Strings are escaped when `escape` is set. A nested node becomes the
/// markup of its children, a sequence the concatenated text of its items.
/// Only nested nodes can fail, with the errors of [`serialize`](crate::serialize).
pub fn format(value: &Value, escape: bool, options: &Options) -> Result<String> {
    let mut out = String::new();
    format_to(value, escape, options, &mut out)?;
    Ok(out)
}

/// Like [`format`], appending to `out`.
pub fn format_to(value: &Value, escape: bool, options: &Options, out: &mut String) -> Result<()> {
    match value {
        Value::Nil => {}
        Value::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
        Value::Int(v) => out.push_str(itoa::Buffer::new().format(*v)),
        Value::UInt(v) => out.push_str(itoa::Buffer::new().format(*v)),
        Value::Float(v) => format_float(*v, out),
        Value::Str(s) => out.push_str(&escape_if(s, escape)),
        Value::Date(d) => out.push_str(&d.format(XS_DATE_FORMAT).to_string()),
        Value::Time(t) => out.push_str(&t.format(XS_TIME_FORMAT).to_string()),
        Value::DateTime(dt) => out.push_str(&dt.format(XS_DATETIME_FORMAT).to_string()),
        Value::Lazy(thunk) => format_to(&thunk.eval(), escape, options, out)?,
        Value::Node(node) => out.push_str(&translate::fragment(node, options)?),
        Value::Seq(items) => {
            for item in items {
                format_to(item, escape, options, out)?;
            }
        }
    }
    Ok(())
}

fn format_float(v: f64, out: &mut String) {
    if v.is_finite() {
        out.push_str(ryu::Buffer::new().format_finite(v));
    } else if v.is_nan() {
        out.push_str("NaN");
    } else if v.is_sign_positive() {
        out.push_str("INF");
    } else {
        out.push_str("-INF");
    }
}
