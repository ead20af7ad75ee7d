//! Recursive node processing.

use crate::context::Context;
use crate::error::{ErrorKind, Result};
use ylt_yaml::{Marker, Node, NodeKind};

/// Process `node` and its descendants in place.
///
/// Children are processed first, in source order. Void children are dropped,
/// unwrapped sequence elements are spliced into their parent sequence, and
/// then the macro registered for the node's tag (if any) runs on the node
/// with its final content. Alias nodes are never followed.
///
/// # Errors
///
/// Returns the first error encountered; the node's content is unspecified
/// afterwards.
pub fn process_node(context: &Context<'_>, node: &mut Node) -> Result<()> {
    let max_depth = context.options().max_depth;
    if context.depth() > max_depth {
        return Err(context.error(node, ErrorKind::NestingTooDeep(max_depth)));
    }

    match node.kind {
        NodeKind::Sequence => process_sequence_node(context, node)?,
        NodeKind::Mapping => process_mapping_node(context, node)?,
        NodeKind::Scalar | NodeKind::Alias => {}
        NodeKind::Document => {
            return Err(context.error(node, ErrorKind::UnexpectedKind(node.kind_name())));
        }
    }

    expand_macro(context, node)
}

fn process_sequence_node(context: &Context<'_>, node: &mut Node) -> Result<()> {
    let children = std::mem::take(&mut node.content);
    let mut content = Vec::with_capacity(children.len());

    for (i, mut child) in children.into_iter().enumerate() {
        let child_context = context.child(format!("[{}]", i));
        process_node(&child_context, &mut child)?;

        match child.marker {
            Marker::None => content.push(child),
            Marker::Void => {}
            Marker::Unwrap => content.extend(unwrap_content(&child_context, child)?),
        }
    }

    node.content = content;
    Ok(())
}

fn process_mapping_node(context: &Context<'_>, node: &mut Node) -> Result<()> {
    if node.content.len() % 2 != 0 {
        return Err(context.error(node, ErrorKind::OddMappingContent(node.content.len())));
    }

    let children = std::mem::take(&mut node.content);
    let mut content = Vec::with_capacity(children.len());

    for (i, (mut key, mut value)) in Node::into_pairs(children).enumerate() {
        let key_context = context.child(key_label(i, &key));
        process_node(&key_context, &mut key)?;

        match key.marker {
            Marker::None => {}
            // The value of a voided key is never processed.
            Marker::Void => continue,
            Marker::Unwrap => return Err(key_context.error(&key, ErrorKind::UnwrapMappingKey)),
        }

        let value_context = context.child(value_label(i, &key));
        process_node(&value_context, &mut value)?;

        match value.marker {
            Marker::None => {
                content.push(key);
                content.push(value);
            }
            Marker::Void => {}
            Marker::Unwrap => {
                return Err(value_context.error(&value, ErrorKind::UnwrapMappingValue));
            }
        }
    }

    node.content = content;
    Ok(())
}

fn expand_macro(context: &Context<'_>, node: &mut Node) -> Result<()> {
    if let Some(expand) = context.registry().get(&node.tag) {
        tracing::trace!(tag = %node.tag, path = %context.format_path(), "expanding macro");
        expand(context, node)?;
    }
    Ok(())
}

/// Split an unwrapped node into the nodes that replace it.
///
/// A sequence yields its elements. A mapping yields one single-pair `!!map`
/// per entry, positioned at the entry's key.
pub(crate) fn unwrap_content(context: &Context<'_>, node: Node) -> Result<Vec<Node>> {
    match node.kind {
        NodeKind::Sequence => Ok(node.content),
        NodeKind::Mapping if node.content.len() % 2 != 0 => Err(context.error(
            &node,
            ErrorKind::OddMappingContent(node.content.len()),
        )),
        NodeKind::Mapping => Ok(Node::into_pairs(node.content)
            .map(|(key, value)| Node::pair(key, value))
            .collect()),
        _ => Err(context.error(&node, ErrorKind::CannotUnwrap(node.kind_name()))),
    }
}

fn key_label(index: usize, key: &Node) -> String {
    if key.is_plain_string() {
        key.value.clone()
    } else {
        format!("[{}](key)", index)
    }
}

fn value_label(index: usize, key: &Node) -> String {
    if key.is_plain_string() {
        key.value.clone()
    } else {
        format!("[{}](value)", index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ProcessOptions;
    use crate::registry::{MacroRegistry, UNWRAP_TAG, VOID_TAG};
    use crate::Error;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use ylt_yaml::{INT_TAG, compare_nodes};

    fn scalar(value: &str) -> Node {
        Node::scalar(value)
    }

    fn process(registry: &MacroRegistry, node: &mut Node) -> Result<()> {
        let root = Context::root(registry);
        process_node(&root, node)
    }

    #[test]
    fn test_void_removes_one_element() {
        let registry = MacroRegistry::with_defaults();
        let mut node = Node::sequence(vec![
            scalar("a"),
            scalar("b").with_tag(VOID_TAG),
            scalar("c"),
        ]);

        process(&registry, &mut node).unwrap();

        let expected = Node::sequence(vec![scalar("a"), scalar("c")]);
        assert_eq!(compare_nodes(&node, &expected), Ok(()));
    }

    #[test]
    fn test_unwrap_sequence_flattens_one_level() {
        let registry = MacroRegistry::with_defaults();
        let mut node = Node::sequence(vec![
            scalar("A"),
            Node::sequence(vec![scalar("B"), Node::sequence(vec![scalar("C")])])
                .with_tag(UNWRAP_TAG),
            scalar("D"),
        ]);

        process(&registry, &mut node).unwrap();

        let expected = Node::sequence(vec![
            scalar("A"),
            scalar("B"),
            Node::sequence(vec![scalar("C")]),
            scalar("D"),
        ]);
        assert_eq!(compare_nodes(&node, &expected), Ok(()));
    }

    #[test]
    fn test_unwrap_mapping_in_sequence_yields_pairs() {
        let registry = MacroRegistry::with_defaults();
        let mut node = Node::sequence(vec![
            Node::mapping(vec![
                scalar("k1").at(2, 3),
                scalar("v1"),
                scalar("k2").at(3, 3),
                scalar("v2"),
            ])
            .with_tag(UNWRAP_TAG),
        ]);

        process(&registry, &mut node).unwrap();

        assert_eq!(node.content.len(), 2);
        let first = &node.content[0];
        assert_eq!(first.kind, NodeKind::Mapping);
        assert_eq!(first.tag, ylt_yaml::MAP_TAG);
        assert_eq!((first.line, first.column), (2, 3));
        assert_eq!((node.content[1].line, node.content[1].column), (3, 3));
        assert_eq!(
            compare_nodes(&node.content[1], &Node::mapping(vec![scalar("k2"), scalar("v2")])),
            Ok(())
        );
    }

    #[test]
    fn test_unwrap_scalar_in_sequence_fails() {
        let registry = MacroRegistry::with_defaults();
        let mut node = Node::sequence(vec![scalar("a"), scalar("b").with_tag(UNWRAP_TAG).at(3, 7)]);

        let err = process(&registry, &mut node).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"[1]:3:7: cannot unwrap UnwrapScalarNode");
    }

    #[test]
    fn test_unwrap_key_fails_regardless_of_value() {
        let registry = MacroRegistry::with_defaults();
        for value in [scalar("v"), Node::sequence(vec![]), scalar("v").with_tag(VOID_TAG)] {
            let mut node = Node::mapping(vec![scalar("x").with_tag(UNWRAP_TAG).at(1, 1), value]);
            let err = process(&registry, &mut node).unwrap_err();
            assert_eq!(err.kind(), Some(&ErrorKind::UnwrapMappingKey));
            assert_eq!(err.to_string(), "[0](key):1:1: cannot unwrap a mapping key");
        }
    }

    #[test]
    fn test_unwrap_value_fails() {
        let registry = MacroRegistry::with_defaults();
        let mut node = Node::mapping(vec![
            scalar("k"),
            Node::sequence(vec![scalar("x")]).with_tag(UNWRAP_TAG).at(1, 4),
        ]);

        let err = process(&registry, &mut node).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"k:1:4: cannot unwrap a mapping value");
    }

    #[test]
    fn test_void_key_skips_value_macros() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = MacroRegistry::with_defaults();
        let counter = Arc::clone(&calls);
        registry.register("!crash", move |context: &Context<'_>, node: &mut Node| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(context.error(node, "crash"))
        });

        let mut node = Node::mapping(vec![
            scalar("k").with_tag(VOID_TAG),
            scalar("v").with_tag("!crash"),
            scalar("kept"),
            scalar("1"),
        ]);
        process(&registry, &mut node).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            compare_nodes(&node, &Node::mapping(vec![scalar("kept"), scalar("1")])),
            Ok(())
        );
    }

    #[test]
    fn test_void_value_drops_pair() {
        let registry = MacroRegistry::with_defaults();
        let mut node = Node::mapping(vec![
            scalar("a"),
            scalar("1").with_tag(VOID_TAG),
            scalar("b"),
            scalar("2"),
        ]);

        process(&registry, &mut node).unwrap();
        assert_eq!(node.content.len(), 2);
        assert_eq!(node.content[0].value, "b");
    }

    #[test]
    fn test_non_string_keys_use_index_labels() {
        let registry = MacroRegistry::with_defaults();
        let mut node = Node::mapping(vec![
            scalar("first"),
            scalar("ok"),
            Node::tagged_scalar(INT_TAG, "7"),
            Node::sequence(vec![scalar("x").with_tag(UNWRAP_TAG).at(5, 9)]),
        ]);

        let err = process(&registry, &mut node).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"[1](value).[0]:5:9: cannot unwrap UnwrapScalarNode");
    }

    #[test]
    fn test_error_inside_key_uses_key_label() {
        let registry = MacroRegistry::with_defaults();
        let key = Node::sequence(vec![scalar("x").with_tag(UNWRAP_TAG).at(1, 4)]);
        let mut node = Node::mapping(vec![key, scalar("v")]);

        let err = process(&registry, &mut node).unwrap_err();
        assert_eq!(err.to_string(), "[0](key).[0]:1:4: cannot unwrap UnwrapScalarNode");
    }

    #[test]
    fn test_nested_document_is_unexpected() {
        let registry = MacroRegistry::with_defaults();
        let mut node = Node::sequence(vec![Node::document(scalar("x")).at(2, 1)]);

        let err = process(&registry, &mut node).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"[0]:2:1: unexpected node kind, DocumentNode");
    }

    #[test]
    fn test_odd_mapping_content_is_rejected() {
        let registry = MacroRegistry::with_defaults();
        let mut node = Node::mapping(vec![scalar("a"), scalar("1"), scalar("b")]).at(1, 1);

        let err = process(&registry, &mut node).unwrap_err();
        assert_eq!(err.kind(), Some(&ErrorKind::OddMappingContent(3)));
    }

    #[test]
    fn test_alias_is_not_processed() {
        let registry = MacroRegistry::with_defaults();
        let mut alias = Node::alias(1);
        alias.content.push(scalar("never").with_tag(UNWRAP_TAG));
        let mut node = Node::sequence(vec![alias]);

        process(&registry, &mut node).unwrap();
        assert_eq!(node.content[0].content[0].marker, Marker::None);
    }

    #[test]
    fn test_macros_run_post_order() {
        let mut registry = MacroRegistry::with_defaults();
        registry.register("!count", |_: &Context<'_>, node: &mut Node| {
            let count = node.content.len();
            *node = Node::tagged_scalar(INT_TAG, count.to_string()).at(node.line, node.column);
            Ok(())
        });

        let mut node = Node::sequence(vec![
            scalar("a"),
            scalar("b").with_tag(VOID_TAG),
            Node::sequence(vec![scalar("c"), scalar("d")]).with_tag(UNWRAP_TAG),
        ])
        .with_tag("!count");

        process(&registry, &mut node).unwrap();
        assert_eq!(node.kind, NodeKind::Scalar);
        assert_eq!(node.value, "3");
    }

    #[test]
    fn test_macro_error_propagates_with_path() {
        let mut registry = MacroRegistry::with_defaults();
        registry.register("!deny", |context: &Context<'_>, node: &mut Node| {
            let message = format!("{} is not allowed", node.value);
            Err(context.error(node, message))
        });

        let mut node = Node::mapping(vec![
            scalar("settings"),
            Node::sequence(vec![scalar("ok"), scalar("secret").with_tag("!deny").at(4, 7)]),
        ]);

        let err = process(&registry, &mut node).unwrap_err();
        assert_eq!(err.to_string(), "settings.[1]:4:7: secret is not allowed");
    }

    #[test]
    fn test_nesting_limit() {
        let registry = MacroRegistry::with_defaults();
        let options = ProcessOptions {
            max_depth: 2,
            ..Default::default()
        };
        let root = Context::root(&registry).with_options(options);

        let mut shallow = Node::sequence(vec![Node::sequence(vec![scalar("x")])]);
        assert_eq!(process_node(&root, &mut shallow), Ok(()));

        let mut deep = Node::sequence(vec![Node::sequence(vec![Node::sequence(vec![scalar(
            "x",
        )])])]);
        let err = process_node(&root, &mut deep).unwrap_err();
        assert!(matches!(
            err,
            Error::Node {
                kind: ErrorKind::NestingTooDeep(2),
                ..
            }
        ));
        assert_eq!(err.to_string(), "[0].[0].[0]:0:0: maximum nesting depth of 2 exceeded");
    }

    #[test]
    fn test_untagged_tree_is_unchanged() {
        let registry = MacroRegistry::with_defaults();
        let original = Node::mapping(vec![
            scalar("list"),
            Node::sequence(vec![scalar("a"), Node::alias(1), scalar("c")]),
            scalar("nested"),
            Node::mapping(vec![scalar("k"), scalar("v").with_tag("!unregistered")]),
        ]);
        let mut node = original.clone();

        process(&registry, &mut node).unwrap();
        assert_eq!(node, original);
    }
}
