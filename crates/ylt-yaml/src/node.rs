//! Tagged YAML nodes with source positions.

use std::fmt;

/// Tag given to plain string scalars.
pub const STR_TAG: &str = "!!str";
/// Tag given to untagged sequences.
pub const SEQ_TAG: &str = "!!seq";
/// Tag given to untagged mappings.
pub const MAP_TAG: &str = "!!map";
pub const INT_TAG: &str = "!!int";
pub const FLOAT_TAG: &str = "!!float";
pub const BOOL_TAG: &str = "!!bool";
pub const NULL_TAG: &str = "!!null";

/// Structural kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Sequence,
    Mapping,
    Scalar,
    Alias,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Document => "DocumentNode",
            NodeKind::Sequence => "SequenceNode",
            NodeKind::Mapping => "MappingNode",
            NodeKind::Scalar => "ScalarNode",
            NodeKind::Alias => "AliasNode",
        };
        f.write_str(name)
    }
}

/// Processing marker carried next to the structural kind.
///
/// A node is either unmarked, marked for deletion by its parent, or marked
/// to have its content spliced into its parent. The structural kind is kept
/// unchanged, so an unwrapped node still reports whether it was a sequence
/// or a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Marker {
    #[default]
    None,
    Void,
    Unwrap,
}

/// A node of a YAML document tree.
///
/// Mapping nodes keep their entries as a flat `content` list alternating
/// key and value, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub marker: Marker,

    /// Resolved tag, e.g. `!!str`, `!!map` or a local tag such as `!void`.
    pub tag: String,

    /// Scalar text. Empty for collections, documents and aliases.
    pub value: String,

    /// Anchor id defined on this node, if any.
    pub anchor: Option<usize>,

    /// Anchor id referenced by an alias node.
    pub alias: Option<usize>,

    pub content: Vec<Node>,

    /// 1-based source line.
    pub line: usize,

    /// 1-based source column.
    pub column: usize,
}

impl Node {
    /// Create an empty, unpositioned node.
    pub fn new(kind: NodeKind, tag: impl Into<String>) -> Self {
        Self {
            kind,
            marker: Marker::None,
            tag: tag.into(),
            value: String::new(),
            anchor: None,
            alias: None,
            content: Vec::new(),
            line: 0,
            column: 0,
        }
    }

    /// Create a document wrapping a single child, positioned at the child.
    pub fn document(child: Node) -> Self {
        let mut node = Self::new(NodeKind::Document, "");
        node.line = child.line;
        node.column = child.column;
        node.content.push(child);
        node
    }

    /// Create a plain `!!str` scalar.
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::tagged_scalar(STR_TAG, value)
    }

    pub fn tagged_scalar(tag: impl Into<String>, value: impl Into<String>) -> Self {
        let mut node = Self::new(NodeKind::Scalar, tag);
        node.value = value.into();
        node
    }

    pub fn sequence(content: Vec<Node>) -> Self {
        let mut node = Self::new(NodeKind::Sequence, SEQ_TAG);
        node.content = content;
        node
    }

    /// Create a mapping from a flat, alternating key/value list.
    pub fn mapping(content: Vec<Node>) -> Self {
        let mut node = Self::new(NodeKind::Mapping, MAP_TAG);
        node.content = content;
        node
    }

    /// Create a single-entry `!!map` positioned at its key.
    pub fn pair(key: Node, value: Node) -> Self {
        let (line, column) = (key.line, key.column);
        Self::mapping(vec![key, value]).at(line, column)
    }

    pub fn alias(anchor: usize) -> Self {
        let mut node = Self::new(NodeKind::Alias, "");
        node.alias = Some(anchor);
        node
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_anchor(mut self, anchor: usize) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn is_void(&self) -> bool {
        self.marker == Marker::Void
    }

    pub fn is_unwrap(&self) -> bool {
        self.marker == Marker::Unwrap
    }

    pub fn mark_void(&mut self) {
        self.marker = Marker::Void;
    }

    pub fn mark_unwrap(&mut self) {
        self.marker = Marker::Unwrap;
    }

    /// True for unmarked `!!str` scalars, the only keys rendered verbatim
    /// in diagnostic paths.
    pub fn is_plain_string(&self) -> bool {
        self.kind == NodeKind::Scalar && self.tag == STR_TAG && self.marker == Marker::None
    }

    /// Kind name including the marker, e.g. `UnwrapScalarNode`.
    pub fn kind_name(&self) -> String {
        match self.marker {
            Marker::None => self.kind.to_string(),
            Marker::Void => format!("Void{}", self.kind),
            Marker::Unwrap => format!("Unwrap{}", self.kind),
        }
    }

    /// Iterate over the key/value pairs of a mapping's content.
    ///
    /// A trailing unpaired node is not yielded.
    pub fn pairs(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.content.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Consume a flat key/value content list as owned pairs.
    pub fn into_pairs(content: Vec<Node>) -> Pairs {
        Pairs {
            inner: content.into_iter(),
        }
    }
}

/// Owned key/value pairs drained from mapping content.
pub struct Pairs {
    inner: std::vec::IntoIter<Node>,
}

impl Iterator for Pairs {
    type Item = (Node, Node);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.inner.next()?;
        let value = self.inner.next()?;
        Some((key, value))
    }
}
