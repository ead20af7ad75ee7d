//! YAML parser that builds tagged node trees.

use crate::node::{
    BOOL_TAG, FLOAT_TAG, INT_TAG, MAP_TAG, NULL_TAG, Node, NodeKind, SEQ_TAG, STR_TAG,
};
use crate::{Error, Result};
use std::path::Path;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Prefix the parser substitutes for the `!!` tag handle.
const CORE_SCHEMA_PREFIX: &str = "tag:yaml.org,2002:";

/// Parse every document of a YAML stream.
///
/// Each element of the result is a [`NodeKind::Document`] node holding the
/// document's root as its only child.
///
/// # Example
///
/// ```rust
/// use ylt_yaml::{parse_documents, NodeKind};
///
/// let documents = parse_documents("--- a\n--- b\n").unwrap();
/// assert_eq!(documents.len(), 2);
/// assert_eq!(documents[0].kind, NodeKind::Document);
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is invalid.
pub fn parse_documents(content: &str) -> Result<Vec<Node>> {
    parse_impl(content, None)
}

/// Parse every document of a YAML stream, naming `filename` in errors.
pub fn parse_documents_file(content: &str, filename: &str) -> Result<Vec<Node>> {
    parse_impl(content, Some(filename))
}

/// Read and parse every document of a YAML file.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<Node>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|err| Error::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    parse_impl(&content, Some(&path.display().to_string()))
}

/// Parse the first document of a YAML stream and return its root node.
///
/// # Example
///
/// ```rust
/// use ylt_yaml::{parse, NodeKind};
///
/// let root = parse("title: My Document").unwrap();
/// assert_eq!(root.kind, NodeKind::Mapping);
/// ```
pub fn parse(content: &str) -> Result<Node> {
    parse_impl(content, None)?
        .into_iter()
        .next()
        .and_then(|mut document| document.content.pop())
        .ok_or(Error::NoDocument)
}

fn parse_impl(content: &str, filename: Option<&str>) -> Result<Vec<Node>> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = DocumentBuilder::default();

    parser
        .load(&mut builder, true)
        .map_err(|err| Error::from_scan(&err, filename))?;

    Ok(builder.documents)
}

/// Builder that implements MarkedEventReceiver to construct node trees.
#[derive(Default)]
struct DocumentBuilder {
    /// Open documents and collections, innermost last
    stack: Vec<Node>,

    /// Completed documents
    documents: Vec<Node>,
}

impl DocumentBuilder {
    fn push_complete(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.content.push(node);
        }
    }

    fn open(&mut self, kind: NodeKind, tag: String, anchor_id: usize, marker: &Marker) {
        let mut node = Node::new(kind, tag).at(marker.line(), marker.col() + 1);
        node.anchor = anchor(anchor_id);
        self.stack.push(node);
    }

    fn close(&mut self) {
        if let Some(node) = self.stack.pop() {
            self.push_complete(node);
        }
    }
}

impl MarkedEventReceiver for DocumentBuilder {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Nothing | Event::StreamStart | Event::StreamEnd => {}

            Event::DocumentStart => {
                self.open(NodeKind::Document, String::new(), 0, &marker);
            }

            Event::DocumentEnd => {
                if let Some(document) = self.stack.pop() {
                    self.documents.push(document);
                }
            }

            Event::Scalar(value, style, anchor_id, tag) => {
                let tag = match tag {
                    Some(tag) => resolve_tag(&tag),
                    None if style == TScalarStyle::Plain => resolve_plain_scalar(&value).into(),
                    None => STR_TAG.into(),
                };
                let mut node =
                    Node::tagged_scalar(tag, value).at(marker.line(), marker.col() + 1);
                node.anchor = anchor(anchor_id);
                self.push_complete(node);
            }

            Event::SequenceStart(anchor_id, tag) => {
                let tag = tag.map_or_else(|| SEQ_TAG.into(), |tag| resolve_tag(&tag));
                self.open(NodeKind::Sequence, tag, anchor_id, &marker);
            }

            Event::MappingStart(anchor_id, tag) => {
                let tag = tag.map_or_else(|| MAP_TAG.into(), |tag| resolve_tag(&tag));
                self.open(NodeKind::Mapping, tag, anchor_id, &marker);
            }

            Event::SequenceEnd | Event::MappingEnd => self.close(),

            Event::Alias(anchor_id) => {
                let node = Node::alias(anchor_id).at(marker.line(), marker.col() + 1);
                self.push_complete(node);
            }
        }
    }
}

/// The parser reports "no anchor" as id 0.
fn anchor(anchor_id: usize) -> Option<usize> {
    (anchor_id != 0).then_some(anchor_id)
}

/// Render a parsed tag in its short form, e.g. `!!str` or `!void`.
fn resolve_tag(tag: &Tag) -> String {
    match tag.handle.as_str() {
        CORE_SCHEMA_PREFIX | "!!" => format!("!!{}", tag.suffix),
        handle => format!("{}{}", handle, tag.suffix),
    }
}

/// Resolve the tag of an untagged plain scalar using the YAML 1.2 core schema.
pub(crate) fn resolve_plain_scalar(value: &str) -> &'static str {
    match value {
        "" | "~" | "null" | "Null" | "NULL" => return NULL_TAG,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => return BOOL_TAG,
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" | "-.inf" | "-.Inf" | "-.INF"
        | ".nan" | ".NaN" | ".NAN" => return FLOAT_TAG,
        _ => {}
    }

    if parse_int(value).is_some() {
        return INT_TAG;
    }

    let numeric = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if numeric && value.chars().any(|c| c.is_ascii_digit()) && value.parse::<f64>().is_ok() {
        return FLOAT_TAG;
    }

    STR_TAG
}

/// Parse a core schema integer: decimal, `0x` hexadecimal or `0o` octal.
pub(crate) fn parse_int(value: &str) -> Option<i64> {
    if let Some(hex) = value.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16).ok();
    }
    if let Some(octal) = value.strip_prefix("0o") {
        return i64::from_str_radix(octal, 8).ok();
    }
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    value.parse::<i64>().ok()
}
