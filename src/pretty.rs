//! Re-indentation of finished markup.
//!
//! The builder emits markup without whitespace. [`prettify`] puts every
//! element on its own line and indents children. Running it on its own
//! output changes nothing.

use crate::error::{Error, Position, Result};
use crate::tracing_macros::trace;
use memchr::{memchr, memchr2, memmem};

/// Indentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentConfig {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Keep elements whose only child is text on one line.
    pub compact: bool,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            compact: true,
        }
    }
}

#[derive(Debug)]
enum Item<'a> {
    Element {
        start: &'a str,
        name: &'a str,
        children: Vec<Item<'a>>,
    },
    /// Empty element, comment, processing instruction or CDATA section.
    Verbatim(&'a str),
    Text(&'a str),
}

struct Open<'a> {
    start: &'a str,
    name: &'a str,
    offset: usize,
    children: Vec<Item<'a>>,
}

/// Re-indents an XML fragment.
///
/// ```rust
/// use ordered_xml::{prettify, IndentConfig};
///
/// let xml = prettify("<a><b>1</b></a>", &IndentConfig::default()).unwrap();
/// assert_eq!(xml, "<a>\n  <b>1</b>\n</a>");
/// ```
pub fn prettify(xml: &str, config: &IndentConfig) -> Result<String> {
    trace!(len = xml.len(), indent = config.indent, compact = config.compact, "prettify");
    let items = parse(xml)?;
    let mut out = String::with_capacity(xml.len() + xml.len() / 2);
    render(&items, 0, config, &mut out);
    Ok(out)
}

fn parse(xml: &str) -> Result<Vec<Item<'_>>> {
    let bytes = xml.as_bytes();
    let err_at = |err: Error, offset: usize| err.with_position(Position::from_offset(xml, offset));

    let mut root: Vec<Item<'_>> = Vec::new();
    let mut stack: Vec<Open<'_>> = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let lt = match memchr(b'<', &bytes[pos..]) {
            Some(i) => pos + i,
            None => bytes.len(),
        };
        if lt > pos {
            push(&mut stack, &mut root, Item::Text(&xml[pos..lt]));
        }
        if lt == bytes.len() {
            break;
        }

        let rest = &bytes[lt..];
        let end = if rest.starts_with(b"<!--") {
            find(rest, b"-->").map(|i| lt + i + 3)
        } else if rest.starts_with(b"<![CDATA[") {
            find(rest, b"]]>").map(|i| lt + i + 3)
        } else if rest.starts_with(b"<?") {
            find(rest, b"?>").map(|i| lt + i + 2)
        } else {
            tag_end(rest).map(|i| lt + i + 1)
        };
        let end = end.ok_or_else(|| err_at(Error::unexpected_eof(), lt))?;
        let raw = &xml[lt..end];

        if raw.starts_with("<!") || raw.starts_with("<?") {
            push(&mut stack, &mut root, Item::Verbatim(raw));
        } else if let Some(closing) = raw.strip_prefix("</") {
            let name = closing.trim_end_matches('>').trim();
            let open = stack
                .pop()
                .ok_or_else(|| err_at(Error::syntax(format!("unexpected </{}>", name)), lt))?;
            if open.name != name {
                return Err(err_at(Error::mismatched_tag(open.name, name), lt));
            }
            let element = Item::Element {
                start: open.start,
                name: open.name,
                children: open.children,
            };
            push(&mut stack, &mut root, element);
        } else if raw.ends_with("/>") {
            push(&mut stack, &mut root, Item::Verbatim(raw));
        } else {
            let name = element_name(raw);
            if name.is_empty() {
                return Err(err_at(Error::syntax("missing element name"), lt));
            }
            stack.push(Open {
                start: raw,
                name,
                offset: lt,
                children: Vec::new(),
            });
        }
        pos = end;
    }

    if let Some(open) = stack.pop() {
        return Err(err_at(Error::unclosed_tag(open.name), open.offset));
    }
    Ok(root)
}

fn push<'a>(stack: &mut [Open<'a>], root: &mut Vec<Item<'a>>, item: Item<'a>) {
    match stack.last_mut() {
        Some(open) => open.children.push(item),
        None => root.push(item),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    memmem::find(haystack, needle)
}

/// Index of the `>` closing a tag, skipping quoted attribute values.
fn tag_end(tag: &[u8]) -> Option<usize> {
    let mut pos = 0;
    loop {
        let i = pos + memchr::memchr3(b'>', b'"', b'\'', &tag[pos..])?;
        match tag[i] {
            b'>' => return Some(i),
            quote => {
                let close = memchr(quote, &tag[i + 1..])?;
                pos = i + 1 + close + 1;
            }
        }
    }
}

fn element_name(start: &str) -> &str {
    let body = &start[1..];
    let end = memchr2(b'>', b'/', body.as_bytes()).unwrap_or(body.len());
    let name = &body[..end];
    name.split_ascii_whitespace().next().unwrap_or("")
}

fn is_blank(item: &Item<'_>) -> bool {
    matches!(item, Item::Text(text) if text.trim().is_empty())
}

fn line(out: &mut String, depth: usize, config: &IndentConfig, content: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    for _ in 0..depth * config.indent {
        out.push(' ');
    }
    out.push_str(content);
}

fn render(items: &[Item<'_>], depth: usize, config: &IndentConfig, out: &mut String) {
    for item in items.iter().filter(|item| !is_blank(item)) {
        match item {
            Item::Verbatim(raw) => line(out, depth, config, raw),
            Item::Text(text) => line(out, depth, config, text.trim()),
            Item::Element {
                start,
                name,
                children,
            } => {
                let visible: Vec<&Item<'_>> = children.iter().filter(|c| !is_blank(c)).collect();
                match visible.as_slice() {
                    [] => {
                        line(out, depth, config, start);
                        push_close(out, name);
                    }
                    [Item::Text(text)] if config.compact => {
                        line(out, depth, config, start);
                        out.push_str(text);
                        push_close(out, name);
                    }
                    _ => {
                        line(out, depth, config, start);
                        render(children, depth + 1, config, out);
                        line(out, depth, config, "");
                        push_close(out, name);
                    }
                }
            }
        }
    }
}

fn push_close(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
