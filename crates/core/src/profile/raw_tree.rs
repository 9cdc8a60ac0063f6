//! Generic XML tree decoding.
//!
//! Profile markup is first decoded into a loosely typed tree, the same shape a
//! JSON-style XML converter produces:
//! - an element with neither attributes nor child elements becomes a text leaf;
//! - anything else becomes a record; attributes live under `@`-prefixed keys and
//!   mixed text under `#text`;
//! - repeated sibling elements collapse into a [`RawValue::List`], a lone one stays bare.
//!
//! Consumers must not assume either shape for repeated elements; go through [`as_list`].

use indexmap::{IndexMap, map::Entry};
use roxmltree::{Document, Node};

pub const ATTRIBUTE_PREFIX: char = '@';
pub const TEXT_KEY: &str = "#text";

#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Record(RawRecord),
    List(Vec<RawValue>),
}

/// Named fields of one decoded element, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    fields: IndexMap<String, RawValue>,
}

/// Canonicalize the bare-record-or-list ambiguity: a list yields its items, anything
/// else yields a one-element slice holding the value itself.
#[inline]
pub fn as_list(value: &RawValue) -> &[RawValue] {
    match value {
        RawValue::List(items) => items,
        other => std::slice::from_ref(other),
    }
}

/// Parse an integer written in decimal or as `0x`-prefixed hexadecimal.
pub(crate) fn parse_number(text: &str) -> Option<u32> {
    let t = text.trim();
    match t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => t.parse::<u32>().ok(),
    }
}

impl RawValue {
    #[inline]
    pub fn as_record(&self) -> Option<&RawRecord> {
        match self {
            RawValue::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Text of a leaf, or the `#text` of a record carrying attributes.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            RawValue::Record(r) => r.text(),
            RawValue::List(_) => None,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<u32> {
        self.as_text().and_then(parse_number)
    }
}

impl RawRecord {
    #[inline]
    pub fn field(&self, name: &str) -> Option<&RawValue> {
        self.fields.get(name)
    }

    /// Repeated child elements as a list; empty when the field is missing.
    pub fn list(&self, name: &str) -> &[RawValue] {
        self.field(name).map(as_list).unwrap_or(&[])
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self.fields.get(&format!("{ATTRIBUTE_PREFIX}{name}")) {
            Some(RawValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn numeric_attribute(&self, name: &str) -> Option<u32> {
        self.attribute(name).and_then(parse_number)
    }

    pub fn text(&self) -> Option<&str> {
        match self.fields.get(TEXT_KEY) {
            Some(RawValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Insert a field; a second sibling with the same name turns the entry into a list.
    fn insert(&mut self, key: String, value: RawValue) {
        match self.fields.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if let RawValue::List(items) = existing {
                    items.push(value);
                } else {
                    let first = std::mem::replace(existing, RawValue::List(Vec::new()));
                    *existing = RawValue::List(vec![first, value]);
                }
            }
        }
    }
}

/// Decode markup into a record holding the document's root element under its tag name.
pub fn decode(text: &str) -> Result<RawRecord, roxmltree::Error> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();

    let mut out = RawRecord::default();
    out.insert(root.tag_name().name().to_string(), decode_element(root));
    Ok(out)
}

fn decode_element(node: Node) -> RawValue {
    let text = collect_text(node);
    let has_attributes = node.attributes().next().is_some();
    let has_children = node.children().any(|n| n.is_element());

    if !has_attributes && !has_children {
        return RawValue::Text(text);
    }

    let mut record = RawRecord::default();
    for attr in node.attributes() {
        record.insert(
            format!("{ATTRIBUTE_PREFIX}{}", attr.name()),
            RawValue::Text(attr.value().to_string()),
        );
    }
    for child in node.children().filter(|n| n.is_element()) {
        record.insert(child.tag_name().name().to_string(), decode_element(child));
    }
    if !text.is_empty() {
        record.insert(TEXT_KEY.to_string(), RawValue::Text(text));
    }

    RawValue::Record(record)
}

/// Direct text children, trimmed; indentation between elements is dropped.
fn collect_text(node: Node) -> String {
    node.children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
