//! Typed recording documents.
//!
//! A recording document is markup whose leaf elements carry a datatype
//! attribute (`dt:dt="r8"` with `xmlns:dt="urn:schemas-microsoft-com:datatypes"`).
//! Decoding happens in two steps:
//!
//! 1. [`parse_document`] reads the markup into an owned [`Element`] tree.
//! 2. [`decode_element`] turns that tree into a [`MetadataNode`]: typed
//!    children become leaves, untyped children become nested groups, and
//!    the element's own attributes are merged in last, replacing any child
//!    of the same name.

use embla_model::{MetadataGroup, MetadataNode, TypedValue};
use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::codec::decode_value;
use crate::condition::{Condition, ConditionSink};
use crate::error::{IngestError, Result, ValueError};

/// Key of the datatype attribute after namespace resolution.
pub const DATATYPE_ATTRIBUTE: &str = "{urn:schemas-microsoft-com:datatypes}dt";

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// An element of a parsed document.
///
/// Attribute keys in a namespace are written `{uri}local`; namespace
/// declarations are not kept as attributes. `text` is the character data
/// before the first child element, `None` when there is none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// The datatype tag, present only on typed leaves.
    pub fn datatype(&self) -> Option<&str> {
        self.attribute(DATATYPE_ATTRIBUTE)
    }
}

/// Decodes a recording document into its metadata tree.
///
/// # Errors
///
/// Returns [`IngestError::Xml`] when the markup is malformed. Leaf decoding
/// problems never fail; they are reported to `sink`.
pub fn decode_document(xml: &str, sink: &mut dyn ConditionSink) -> Result<MetadataNode> {
    let root = parse_document(xml)?;
    let node = decode_element(&root, sink);
    debug!(nodes = node.node_count(), "decoded recording document");
    Ok(node)
}

/// Decodes the children and attributes of `element` into a group node.
///
/// A typed child keeps only its decoded value; its datatype marker and any
/// other attributes it carries are dropped.
pub fn decode_element(element: &Element, sink: &mut dyn ConditionSink) -> MetadataNode {
    let mut group = MetadataGroup::new();
    for child in &element.children {
        let node = match child.datatype() {
            Some(tag) => MetadataNode::Leaf(decode_leaf(child, tag, sink)),
            None => decode_element(child, sink),
        };
        group.insert(child.name.clone(), node);
    }
    for (key, value) in &element.attributes {
        group.insert(key.clone(), MetadataNode::text(value.as_str()));
    }
    MetadataNode::Group(group)
}

fn decode_leaf(element: &Element, tag: &str, sink: &mut dyn ConditionSink) -> TypedValue {
    let raw = element.text.as_deref();
    match decode_value(tag, raw) {
        Ok(value) => value,
        Err(err) => {
            debug!(element = %element.name, error = %err, "keeping raw leaf text");
            let condition = match err {
                ValueError::UnknownType { tag } => Condition::UnknownType {
                    element: element.name.clone(),
                    tag,
                },
                ValueError::Malformed { tag, reason, .. } => Condition::DecodeFailure {
                    element: element.name.clone(),
                    tag,
                    reason,
                },
            };
            sink.report(condition);
            TypedValue::text(raw.unwrap_or_default())
        }
    }
}

/// Parses markup into an element tree.
///
/// # Errors
///
/// Returns [`IngestError::Xml`] for malformed markup, unbalanced tags,
/// undeclared namespace prefixes or a document without a root element.
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    let mut builder = TreeBuilder::default();
    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let element = builder.open(&start)?;
                builder.stack.push(element);
            }
            Event::Empty(start) => {
                let element = builder.open(&start)?;
                builder.scopes.pop();
                builder.attach(element)?;
            }
            Event::End(_) => {
                let element = builder
                    .stack
                    .pop()
                    .ok_or_else(|| xml_error("unexpected end tag"))?;
                builder.scopes.pop();
                builder.attach(element)?;
            }
            Event::Text(text) => {
                let decoded = text.decode().map_err(|e| xml_error(e.to_string()))?;
                let unescaped = unescape(&decoded).map_err(|e| xml_error(e.to_string()))?;
                builder.push_text(&unescaped);
            }
            Event::CData(data) => {
                let decoded = data.decode().map_err(|e| xml_error(e.to_string()))?;
                builder.push_text(&decoded);
            }
            Event::GeneralRef(reference) => {
                let text = resolve_reference(&reference)?;
                builder.push_text(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if !builder.stack.is_empty() {
        return Err(xml_error("unclosed element at end of document"));
    }
    builder.root.ok_or_else(|| xml_error("document has no root element"))
}

fn resolve_reference(reference: &quick_xml::events::BytesRef<'_>) -> Result<String> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|e| xml_error(e.to_string()))?
    {
        return Ok(ch.to_string());
    }
    let name = reference.decode().map_err(|e| xml_error(e.to_string()))?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| xml_error(format!("unknown entity '&{name};'")))
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Element>,
    scopes: Vec<Vec<(String, String)>>,
    root: Option<Element>,
}

impl TreeBuilder {
    /// Reads an opening tag and pushes its namespace scope.
    fn open(&mut self, start: &BytesStart<'_>) -> Result<Element> {
        let name = utf8(start.name().as_ref())?.to_string();
        let mut declarations = Vec::new();
        let mut raw_attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| xml_error(e.to_string()))?;
            let key = utf8(attr.key.as_ref())?.to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| xml_error(e.to_string()))?
                .into_owned();
            if key == "xmlns" {
                declarations.push((String::new(), value));
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                declarations.push((prefix.to_string(), value));
            } else {
                raw_attributes.push((key, value));
            }
        }
        self.scopes.push(declarations);

        let mut attributes = Vec::with_capacity(raw_attributes.len());
        for (key, value) in raw_attributes {
            attributes.push((self.qualify(&key)?, value));
        }
        Ok(Element {
            name,
            attributes,
            text: None,
            children: Vec::new(),
        })
    }

    /// Resolves a prefixed attribute name to `{uri}local`.
    fn qualify(&self, key: &str) -> Result<String> {
        let Some((prefix, local)) = key.split_once(':') else {
            return Ok(key.to_string());
        };
        let uri = if prefix == "xml" {
            Some(XML_NAMESPACE)
        } else {
            self.scopes
                .iter()
                .rev()
                .flat_map(|scope| scope.iter())
                .find(|(declared, _)| declared == prefix)
                .map(|(_, uri)| uri.as_str())
        };
        uri.map(|uri| format!("{{{uri}}}{local}"))
            .ok_or_else(|| xml_error(format!("undeclared namespace prefix '{prefix}'")))
    }

    fn attach(&mut self, element: Element) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => {
                parent.children.push(element);
                Ok(())
            }
            None if self.root.is_none() => {
                self.root = Some(element);
                Ok(())
            }
            None => Err(xml_error("multiple root elements")),
        }
    }

    fn push_text(&mut self, text: &str) {
        let Some(current) = self.stack.last_mut() else {
            return;
        };
        if !current.children.is_empty() || text.is_empty() {
            return;
        }
        current.text.get_or_insert_with(String::new).push_str(text);
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| xml_error(e.to_string()))
}

fn xml_error(message: impl Into<String>) -> IngestError {
    IngestError::Xml {
        message: message.into(),
    }
}

/// Decodes the raw bytes of a recording document stream into text.
///
/// A byte order mark selects the encoding. Without one, the layout of zero
/// bytes decides between UTF-16LE, UTF-16BE and UTF-8. Anything before the
/// first `<` and trailing NULs are dropped.
pub fn decode_recording_text(bytes: &[u8]) -> String {
    let (encoding, bom_len) =
        Encoding::for_bom(bytes).unwrap_or_else(|| (sniff_encoding(bytes), 0));
    let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
    let text: &str = &decoded;
    let start = text.find('<').unwrap_or(text.len());
    text[start..]
        .trim_end_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}

fn sniff_encoding(bytes: &[u8]) -> &'static Encoding {
    let head = &bytes[..bytes.len().min(64)];
    let zeros_at = |parity: usize| {
        head.iter()
            .enumerate()
            .filter(|(index, byte)| index % 2 == parity && **byte == 0)
            .count()
    };
    let (even, odd) = (zeros_at(0), zeros_at(1));
    if odd > head.len() / 4 && odd > even {
        UTF_16LE
    } else if even > head.len() / 4 && even > odd {
        UTF_16BE
    } else {
        UTF_8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::CollectingSink;

    const NS: &str = r#"xmlns:dt="urn:schemas-microsoft-com:datatypes""#;

    #[test]
    fn parse_resolves_datatype_attribute() {
        let xml = format!(r#"<Root {NS}><Weight dt:dt="r8">80.5</Weight></Root>"#);
        let root = parse_document(&xml).unwrap();
        assert_eq!(root.name, "Root");
        assert!(root.attributes.is_empty());
        assert_eq!(root.children[0].datatype(), Some("r8"));
        assert_eq!(root.children[0].text.as_deref(), Some("80.5"));
    }

    #[test]
    fn parse_keeps_text_before_first_child_only() {
        let root = parse_document("<a>head<b/>tail</a>").unwrap();
        assert_eq!(root.text.as_deref(), Some("head"));
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn parse_resolves_entities() {
        let root = parse_document("<a>Smith &amp; Sons &#x41;</a>").unwrap();
        assert_eq!(root.text.as_deref(), Some("Smith & Sons A"));
    }

    #[test]
    fn parse_rejects_undeclared_prefix() {
        assert!(matches!(
            parse_document(r#"<a><b dt:dt="string">x</b></a>"#),
            Err(IngestError::Xml { .. })
        ));
    }

    #[test]
    fn parse_rejects_unbalanced_markup() {
        assert!(parse_document("<a><b></a>").is_err());
        assert!(parse_document("").is_err());
    }

    #[test]
    fn empty_leaf_is_absent() {
        let xml = format!(r#"<Root {NS}><Notes dt:dt="string"/></Root>"#);
        let mut sink = CollectingSink::new();
        let node = decode_document(&xml, &mut sink).unwrap();
        assert_eq!(node.get("Notes"), Some(&MetadataNode::Leaf(TypedValue::Absent)));
        assert!(sink.is_empty());
    }

    #[test]
    fn later_sibling_with_same_tag_wins() {
        let xml = format!(
            r#"<Root {NS}><Id dt:dt="i4">1</Id><Id dt:dt="i4">2</Id></Root>"#
        );
        let node = decode_document(&xml, &mut CollectingSink::new()).unwrap();
        assert_eq!(node.get("Id"), Some(&MetadataNode::Leaf(TypedValue::Integer(2))));
    }

    #[test]
    fn decode_recording_text_handles_utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<Root/>\0".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_recording_text(&bytes), "<Root/>");
    }

    #[test]
    fn decode_recording_text_skips_leading_junk() {
        let mut bytes = Vec::new();
        for unit in "\u{1}\u{2}<Root><A/></Root>\0".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_recording_text(&bytes), "<Root><A/></Root>");
    }

    #[test]
    fn decode_recording_text_reads_plain_utf8() {
        assert_eq!(decode_recording_text(b"  <Root/>\n"), "<Root/>");
    }
}
