//! Key classification.
//!
//! Keys carry meaning in their first or last character:
//!
//! | key         | meaning                                          |
//! |-------------|--------------------------------------------------|
//! | `@name`     | attribute of the enclosing element               |
//! | `name!`     | element content is not escaped                   |
//! | `name/`     | element is self-closing, its value is ignored    |
//! | `content!`  | text content of the enclosing element            |
//! | `order!`    | order directive (legacy spelling)                |
//! | `attributes!` | attributes directive                           |

/// Reserved key supplying the enclosing element's content.
pub const CONTENT_KEY: &str = "content!";

/// Reserved key holding an order directive.
pub const ORDER_KEY: &str = "order!";

/// Reserved key holding an attributes directive.
pub const ATTRIBUTES_KEY: &str = "attributes!";

/// Tag used for the items of a sequence nested inside a sequence.
pub const NESTED_ELEMENT_NAME: &str = "element";

/// Returns true if the key ends with `/`.
#[inline]
pub fn is_self_closing(key: &str) -> bool {
    key.ends_with('/')
}

/// Returns true if the key ends with `!`.
#[inline]
pub fn is_raw(key: &str) -> bool {
    key.ends_with('!')
}

/// Returns true if the key starts with `@`.
#[inline]
pub fn is_explicit_attribute(key: &str) -> bool {
    key.starts_with('@')
}

/// Returns true if the key is the content marker.
#[inline]
pub fn is_content_marker(key: &str) -> bool {
    key == CONTENT_KEY
}

/// Returns true for keys that configure a node rather than name a child.
#[inline]
pub fn is_directive(key: &str) -> bool {
    key == ORDER_KEY || key == ATTRIBUTES_KEY
}

/// How element names are derived from keys.
#[derive(Clone, Copy, Default)]
pub enum KeyConverter {
    /// Use the key as written.
    #[default]
    Literal,
    /// `user_name` becomes `userName`.
    LowerCamelcase,
    /// `user_name` becomes `UserName`.
    Camelcase,
    /// `user_name` becomes `USER_NAME`.
    Upcase,
    /// Apply a custom function.
    Custom(fn(&str) -> String),
}

impl std::fmt::Debug for KeyConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyConverter::Literal => f.write_str("Literal"),
            KeyConverter::LowerCamelcase => f.write_str("LowerCamelcase"),
            KeyConverter::Camelcase => f.write_str("Camelcase"),
            KeyConverter::Upcase => f.write_str("Upcase"),
            KeyConverter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl KeyConverter {
    /// Converts a bare element name.
    pub fn convert(&self, name: &str) -> String {
        match self {
            KeyConverter::Literal => name.to_string(),
            KeyConverter::LowerCamelcase => camelize(name, false),
            KeyConverter::Camelcase => camelize(name, true),
            KeyConverter::Upcase => name.to_uppercase(),
            KeyConverter::Custom(f) => f(name),
        }
    }
}

fn camelize(name: &str, upper_first: bool) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = upper_first;
    for (i, c) in name.chars().enumerate() {
        if c == '_' && i > 0 {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else if i == 0 && !upper_first {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// A key with its markers decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key<'a> {
    /// The key as stored in the node.
    pub raw: &'a str,
    /// The element name before conversion, without a trailing `!` or `/`.
    pub name: &'a str,
    /// Whether the element content is escaped.
    pub escape: bool,
    /// Whether the element is emitted self-closing.
    pub self_closing: bool,
    /// Whether the key is the content marker.
    pub content: bool,
}

impl<'a> Key<'a> {
    /// Decodes a raw key.
    pub fn parse(raw: &'a str) -> Self {
        let self_closing = is_self_closing(raw);
        let escape = !is_raw(raw);
        let name = if self_closing || !escape {
            &raw[..raw.len() - 1]
        } else {
            raw
        };
        Self {
            raw,
            name,
            escape,
            self_closing,
            content: is_content_marker(raw),
        }
    }

    /// The element tag for this key.
    pub fn tag(&self, converter: &KeyConverter) -> String {
        converter.convert(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(is_self_closing("empty/"));
        assert!(!is_self_closing("empty"));
        assert!(is_raw("html!"));
        assert!(is_explicit_attribute("@id"));
        assert!(!is_explicit_attribute("id@"));
        assert!(is_content_marker("content!"));
        assert!(!is_content_marker("content"));
        assert!(is_directive("order!"));
        assert!(is_directive("attributes!"));
    }

    #[test]
    fn test_parse_plain_key() {
        let key = Key::parse("name");
        assert_eq!(key.name, "name");
        assert!(key.escape);
        assert!(!key.self_closing);
        assert!(!key.content);
    }

    #[test]
    fn test_parse_strips_one_marker() {
        let raw = Key::parse("html!");
        assert_eq!(raw.name, "html");
        assert!(!raw.escape);

        let empty = Key::parse("br/");
        assert_eq!(empty.name, "br");
        assert!(empty.self_closing);
        assert!(empty.escape);
    }

    #[test]
    fn test_parse_content_marker() {
        let key = Key::parse(CONTENT_KEY);
        assert!(key.content);
        assert!(!key.escape);
    }

    #[test]
    fn test_converters() {
        assert_eq!(KeyConverter::Literal.convert("user_name"), "user_name");
        assert_eq!(KeyConverter::LowerCamelcase.convert("user_name"), "userName");
        assert_eq!(KeyConverter::LowerCamelcase.convert("User_id"), "userId");
        assert_eq!(KeyConverter::Camelcase.convert("user_name"), "UserName");
        assert_eq!(KeyConverter::Upcase.convert("user_name"), "USER_NAME");
        assert_eq!(KeyConverter::Camelcase.convert("soap:Envelope"), "Soap:Envelope");
        assert_eq!(KeyConverter::Custom(|k| format!("ns:{}", k)).convert("a"), "ns:a");
    }

    #[test]
    fn test_tag_applies_converter_to_stripped_name() {
        let key = Key::parse("first_name!");
        assert_eq!(key.tag(&KeyConverter::LowerCamelcase), "firstName");
    }
}
