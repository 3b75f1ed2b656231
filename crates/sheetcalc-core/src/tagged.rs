//! Tagged results handed to callers of the formula entry point

use std::fmt;

use crate::value::{ErrorKind, SharedString, Value};

/// Result type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Tag {
    Number,
    String,
    Boolean,
    Error,
    List,
}

impl Tag {
    /// Get the constant name of this tag (`NUMBER`, `STRING`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Number => "NUMBER",
            Tag::String => "STRING",
            Tag::Boolean => "BOOLEAN",
            Tag::Error => "ERROR",
            Tag::List => "LIST",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload of a [`TaggedValue`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum TaggedPayload {
    Number(f64),
    String(SharedString),
    Boolean(bool),
    Error(ErrorKind),
    List(Vec<TaggedValue>),
}

/// A `{type, value}` pair
///
/// For lists, the payload holds the tagged elements in order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TaggedValue {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub tag: Tag,
    pub value: TaggedPayload,
}

impl TaggedValue {
    /// Convert back into an untagged value
    pub fn to_value(&self) -> Value {
        match &self.value {
            TaggedPayload::Number(n) => Value::Number(*n),
            TaggedPayload::String(s) => Value::String(s.clone()),
            TaggedPayload::Boolean(b) => Value::Boolean(*b),
            TaggedPayload::Error(e) => Value::Error(*e),
            TaggedPayload::List(items) => Value::List(items.iter().map(Self::to_value).collect()),
        }
    }
}

impl From<&Value> for TaggedValue {
    fn from(value: &Value) -> Self {
        let payload = match value {
            Value::Number(n) => TaggedPayload::Number(*n),
            Value::String(s) => TaggedPayload::String(s.clone()),
            Value::Boolean(b) => TaggedPayload::Boolean(*b),
            Value::Error(e) => TaggedPayload::Error(*e),
            Value::List(items) => TaggedPayload::List(items.iter().map(TaggedValue::from).collect()),
        };
        TaggedValue {
            tag: value.tag(),
            value: payload,
        }
    }
}

impl From<Value> for TaggedValue {
    fn from(value: Value) -> Self {
        TaggedValue::from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tag_scalar() {
        let tagged = TaggedValue::from(Value::Error(ErrorKind::Div0));
        assert_eq!(tagged.tag, Tag::Error);
        assert_eq!(tagged.value, TaggedPayload::Error(ErrorKind::Div0));
    }

    #[test]
    fn test_tag_list_recursively() {
        let value = Value::list([
            Value::Number(1.0),
            Value::list([Value::string("x")]),
        ]);
        let tagged = TaggedValue::from(&value);
        assert_eq!(tagged.tag, Tag::List);

        let TaggedPayload::List(items) = &tagged.value else {
            panic!("Expected list payload");
        };
        assert_eq!(items[0].tag, Tag::Number);
        assert_eq!(items[1].tag, Tag::List);
        assert_eq!(tagged.to_value(), value);
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(Tag::Number.to_string(), "NUMBER");
        assert_eq!(Tag::List.as_str(), "LIST");
    }
}
