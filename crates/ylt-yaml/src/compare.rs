//! Structural comparison of node trees.
//!
//! Positions are ignored; everything else that the macro engine can change
//! (kind, marker, tag, value, anchors, children) is compared. Mismatches
//! report the chain of child indices leading to the first difference.

use crate::node::Node;
use std::fmt;

/// The first difference found between two node trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Child indices from the compared roots down to the differing node.
    pub path: Vec<usize>,
    pub message: String,
}

impl Mismatch {
    fn new(message: String) -> Self {
        Self {
            path: Vec::new(),
            message,
        }
    }

    fn within(mut self, index: usize) -> Self {
        self.path.insert(0, index);
        self
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in &self.path {
            write!(f, "{}: ", index)?;
        }
        f.write_str(&self.message)
    }
}

impl std::error::Error for Mismatch {}

/// Compare two nodes and their descendants.
pub fn compare_nodes(actual: &Node, expected: &Node) -> Result<(), Mismatch> {
    if actual.kind != expected.kind || actual.marker != expected.marker {
        return Err(Mismatch::new(format!(
            "expected kind {}, got {}",
            expected.kind_name(),
            actual.kind_name()
        )));
    }

    if actual.tag != expected.tag {
        return Err(Mismatch::new(format!(
            "expected tag {}, got {}",
            expected.tag, actual.tag
        )));
    }

    if actual.value != expected.value {
        return Err(Mismatch::new(format!(
            "expected value '{}', got '{}'",
            expected.value, actual.value
        )));
    }

    if actual.anchor != expected.anchor || actual.alias != expected.alias {
        return Err(Mismatch::new(format!(
            "expected anchor {:?} alias {:?}, got anchor {:?} alias {:?}",
            expected.anchor, expected.alias, actual.anchor, actual.alias
        )));
    }

    compare_node_lists(&actual.content, &expected.content).map_err(|mismatch| {
        if mismatch.path.is_empty() {
            Mismatch::new(format!(
                "expected {} children, got {}",
                expected.content.len(),
                actual.content.len()
            ))
        } else {
            mismatch
        }
    })
}

/// Compare two node lists element by element.
pub fn compare_node_lists(actual: &[Node], expected: &[Node]) -> Result<(), Mismatch> {
    if actual.len() != expected.len() {
        return Err(Mismatch::new(format!(
            "expected {} nodes, got {}",
            expected.len(),
            actual.len()
        )));
    }

    for (i, (actual, expected)) in actual.iter().zip(expected).enumerate() {
        compare_nodes(actual, expected).map_err(|mismatch| mismatch.within(i))?;
    }

    Ok(())
}
