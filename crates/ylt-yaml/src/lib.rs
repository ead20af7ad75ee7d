//! # ylt-yaml
//!
//! Tagged YAML node trees with source positions.
//!
//! This crate decodes YAML streams into [`Node`] trees that keep what the
//! macro engine needs and `yaml_rust2::Yaml` drops: the resolved tag of every
//! node, its 1-based line and column, anchors and aliases, and mapping
//! entries in source order. Processed trees convert back to `Yaml` and YAML
//! text through [`to_yaml`] and [`emit_documents`].
//!
//! ## Example
//!
//! ```rust
//! use ylt_yaml::{parse_documents, NodeKind};
//!
//! let documents = parse_documents("title: !custom My Document").unwrap();
//! let root = &documents[0].content[0];
//! assert_eq!(root.kind, NodeKind::Mapping);
//!
//! let (key, value) = root.pairs().next().unwrap();
//! assert_eq!(key.value, "title");
//! assert_eq!(value.tag, "!custom");
//! ```

mod compare;
mod emitter;
mod error;
mod node;
mod parser;

pub use compare::{Mismatch, compare_node_lists, compare_nodes};
pub use emitter::{emit_documents, to_yaml};
pub use error::{Error, Result};
pub use node::{
    BOOL_TAG, FLOAT_TAG, INT_TAG, MAP_TAG, Marker, NULL_TAG, Node, NodeKind, Pairs, SEQ_TAG,
    STR_TAG,
};
pub use parser::{parse, parse_documents, parse_documents_file, read_file};
