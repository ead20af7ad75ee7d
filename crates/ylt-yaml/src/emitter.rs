//! Conversion of node trees back into `yaml-rust2` values and YAML text.

use crate::Result;
use crate::node::{BOOL_TAG, FLOAT_TAG, INT_TAG, NULL_TAG, Node, NodeKind};
use crate::parser::parse_int;
use std::collections::HashMap;
use yaml_rust2::{Yaml, YamlEmitter};

/// Convert a node tree into a plain `Yaml` value.
///
/// Scalars are typed by their resolved tag; unknown tags produce strings.
/// Aliases resolve against anchors defined earlier in the same tree and
/// become `Yaml::BadValue` when their anchor is missing. A document
/// converts to its root.
///
/// `Yaml` has no place for tags, so custom tags such as `!custom` are
/// dropped. Converting a tree that still carries them is lossy.
pub fn to_yaml(node: &Node) -> Yaml {
    let mut anchors = HashMap::new();
    convert(node, &mut anchors)
}

/// Emit each document as its own `---` unit.
///
/// Goes through [`to_yaml`], so custom tags, anchors and alias references are
/// not written out. Aliases appear as copies of their anchored value.
///
/// # Errors
///
/// Returns an error if the emitter rejects a value.
pub fn emit_documents(documents: &[Node]) -> Result<String> {
    let mut out = String::new();
    for document in documents {
        let yaml = to_yaml(document);
        let mut emitter = YamlEmitter::new(&mut out);
        emitter.dump(&yaml)?;
        out.push('\n');
    }
    Ok(out)
}

fn convert(node: &Node, anchors: &mut HashMap<usize, Yaml>) -> Yaml {
    let yaml = match node.kind {
        NodeKind::Document => node
            .content
            .first()
            .map_or(Yaml::Null, |child| convert(child, anchors)),
        NodeKind::Sequence => Yaml::Array(
            node.content
                .iter()
                .map(|child| convert(child, anchors))
                .collect(),
        ),
        NodeKind::Mapping => {
            let mut pairs = Vec::with_capacity(node.content.len() / 2);
            for (key, value) in node.pairs() {
                let key = convert(key, anchors);
                let value = convert(value, anchors);
                pairs.push((key, value));
            }
            Yaml::Hash(pairs.into_iter().collect())
        }
        NodeKind::Scalar => convert_scalar(node),
        NodeKind::Alias => node
            .alias
            .and_then(|id| anchors.get(&id).cloned())
            .unwrap_or(Yaml::BadValue),
    };

    if let Some(id) = node.anchor {
        anchors.insert(id, yaml.clone());
    }
    yaml
}

fn convert_scalar(node: &Node) -> Yaml {
    let value = node.value.as_str();
    match node.tag.as_str() {
        NULL_TAG => Yaml::Null,
        BOOL_TAG => match value {
            "true" | "True" | "TRUE" => Yaml::Boolean(true),
            "false" | "False" | "FALSE" => Yaml::Boolean(false),
            _ => Yaml::String(value.to_string()),
        },
        INT_TAG => parse_int(value).map_or_else(|| Yaml::String(value.to_string()), Yaml::Integer),
        FLOAT_TAG => Yaml::Real(value.to_string()),
        _ => Yaml::String(value.to_string()),
    }
}
