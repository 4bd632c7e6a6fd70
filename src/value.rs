//! The input tree: nodes, values and attribute maps.
//!
//! A [`Node`] is an ordered map from key to [`Value`] that describes the
//! children of one XML element. Two directives can ride along with a node:
//! an explicit emission order and a per-child attribute map.
//!
//! ```rust
//! use ordered_xml::{node, Node, Value};
//!
//! let user = node! {
//!     "name" => "Alice",
//!     "age" => 30,
//! }
//! .with_order(["age", "name"]);
//!
//! assert_eq!(user.len(), 2);
//! assert_eq!(user.get("name"), Some(&Value::from("Alice")));
//! ```

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Attributes for one element: attribute name to value.
///
/// Values should be scalars. A [`Value::Seq`] is allowed when the element is
/// expanded from a sequence; each sibling then takes the item at its index.
pub type Attributes = IndexMap<String, Value>;

/// A lazily computed value, evaluated when it is formatted.
#[derive(Clone)]
pub struct Thunk(Arc<dyn Fn() -> Value + Send + Sync>);

impl Thunk {
    /// Wraps a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Runs the closure.
    #[inline]
    pub fn eval(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Thunk(..)")
    }
}

impl PartialEq for Thunk {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A value stored under a key of a [`Node`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value, rendered as `xsi:nil="true"`.
    Nil,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Str(String),
    /// Calendar date (`xs:date`).
    Date(NaiveDate),
    /// Time of day (`xs:time`).
    Time(NaiveTime),
    /// Date and time with offset (`xs:dateTime`).
    DateTime(DateTime<FixedOffset>),
    /// Value computed on demand.
    Lazy(Thunk),
    /// Nested element body.
    Node(Node),
    /// Repeated sibling elements.
    Seq(Vec<Value>),
}

impl Value {
    /// Returns true for [`Value::Nil`].
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Returns the nested node, if any.
    #[inline]
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the string slice, if this is text.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true for empty text, nodes and sequences.
    pub fn is_empty_container(&self) -> bool {
        match self {
            Value::Str(s) => s.is_empty(),
            Value::Node(node) => node.is_empty(),
            Value::Seq(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Short name of the variant, for messages.
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::DateTime(_) => "datetime",
            Value::Lazy(_) => "lazy value",
            Value::Node(_) => "node",
            Value::Seq(_) => "sequence",
        }
    }

    /// Creates a lazily computed value.
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Value::Lazy(Thunk::new(f))
    }
}

/// One element's worth of children, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    entries: IndexMap<String, Value>,
    order: Option<Vec<String>>,
    attributes: Option<IndexMap<String, Attributes>>,
}

impl Node {
    /// Creates an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a child, returning the previous value under that key.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.entries.insert(key.into(), value.into())
    }

    /// Inserts a child and returns the node, for chaining.
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.insert(key, value);
        self
    }

    /// Sets the order directive: the exact sequence in which children are emitted.
    pub fn with_order<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Adds attributes for the child stored under `key`.
    pub fn with_attributes<K>(mut self, key: K, attributes: Attributes) -> Self
    where
        K: Into<String>,
    {
        self.attributes
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), attributes);
        self
    }

    /// Returns the value stored under `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns the stored key equal to `key`, borrowed from the node.
    #[inline]
    pub(crate) fn stored_key(&self, key: &str) -> Option<&str> {
        self.entries.get_key_value(key).map(|(k, _)| k.as_str())
    }

    /// Returns true if `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries, directives excluded.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the node has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The canonical order directive, if set.
    #[inline]
    pub fn order(&self) -> Option<&[String]> {
        self.order.as_deref()
    }

    /// The canonical attributes directive, if set.
    #[inline]
    pub fn attributes(&self) -> Option<&IndexMap<String, Attributes>> {
        self.attributes.as_ref()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut node = Node::new();
        for (k, v) in iter {
            node.insert(k, v);
        }
        node
    }
}

/// Builds a [`Node`] from `key => value` pairs, keeping their order.
///
/// ```rust
/// use ordered_xml::node;
///
/// let envelope = node! {
///     "header" => node! { "token" => "abc" },
///     "body" => "payload",
/// };
/// assert_eq!(envelope.keys().collect::<Vec<_>>(), ["header", "body"]);
/// ```
#[macro_export]
macro_rules! node {
    () => {
        $crate::Node::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut node = $crate::Node::new();
        $( node.insert($key, $value); )+
        node
    }};
}

/// Builds an [`Attributes`] map from `name => value` pairs.
#[macro_export]
macro_rules! attrs {
    ($($name:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut attributes = $crate::Attributes::new();
        $( attributes.insert(::std::string::String::from($name), $crate::Value::from($value)); )*
        attributes
    }};
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(v as i64)
            }
        })*
    };
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::UInt(v as u64)
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::Time(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::DateTime(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v.fixed_offset())
    }
}

impl From<DateTime<Local>> for Value {
    fn from(v: DateTime<Local>) -> Self {
        Value::DateTime(v.fixed_offset())
    }
}

/// Naive datetimes are taken to be in the local zone.
impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        let local = Local
            .from_local_datetime(&v)
            .earliest()
            .map(|dt| dt.fixed_offset())
            .unwrap_or_else(|| v.and_utc().fixed_offset());
        Value::DateTime(local)
    }
}

impl From<Thunk> for Value {
    fn from(v: Thunk) -> Self {
        Value::Lazy(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(v: &[T]) -> Self {
        Value::Seq(v.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}
