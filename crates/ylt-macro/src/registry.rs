//! Tag-triggered macros and their registry.

use crate::context::Context;
use crate::error::Result;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use ylt_yaml::Node;

/// Tag that deletes a node from its parent.
pub const VOID_TAG: &str = "!void";

/// Tag that splices a node's content into its parent.
pub const UNWRAP_TAG: &str = "!unwrap";

/// A macro: invoked on a node whose tag matches, after its children have
/// been processed.
pub type Macro = dyn Fn(&Context<'_>, &mut Node) -> Result<()> + Send + Sync;

/// Mapping from tag to macro.
///
/// The registry is built once by the caller, then shared by reference
/// through every context of a pass.
///
/// # Example
///
/// ```rust
/// use ylt_macro::{Context, MacroRegistry};
/// use ylt_yaml::Node;
///
/// let mut registry = MacroRegistry::with_defaults();
/// registry.register("!upper", |_: &Context<'_>, node: &mut Node| {
///     node.value = node.value.to_uppercase();
///     Ok(())
/// });
/// assert!(registry.contains("!upper"));
/// assert!(registry.contains("!void"));
/// ```
#[derive(Clone)]
pub struct MacroRegistry {
    macros: HashMap<String, Arc<Macro>>,
}

impl MacroRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            macros: HashMap::new(),
        }
    }

    /// Create a registry holding the `!void` and `!unwrap` macros.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(VOID_TAG, void_macro);
        registry.register(UNWRAP_TAG, unwrap_macro);
        registry
    }

    /// Register a macro for `tag`, replacing any previous one.
    pub fn register<F>(&mut self, tag: impl Into<String>, expand: F)
    where
        F: Fn(&Context<'_>, &mut Node) -> Result<()> + Send + Sync + 'static,
    {
        let expand: Arc<Macro> = Arc::new(expand);
        self.macros.insert(tag.into(), expand);
    }

    /// Remove the macro for `tag`. Returns whether one was registered.
    pub fn unregister(&mut self, tag: &str) -> bool {
        self.macros.remove(tag).is_some()
    }

    pub fn get(&self, tag: &str) -> Option<&Macro> {
        self.macros.get(tag).map(|expand| expand.as_ref())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.macros.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// Registered tags in sorted order.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.macros.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

/// The default registry holds the `!void` and `!unwrap` macros.
impl Default for MacroRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for MacroRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacroRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

/// Mark a node to be dropped by its parent.
pub fn void_macro(_context: &Context<'_>, node: &mut Node) -> Result<()> {
    node.mark_void();
    Ok(())
}

/// Mark a node to have its content spliced into its parent.
pub fn unwrap_macro(_context: &Context<'_>, node: &mut Node) -> Result<()> {
    node.mark_unwrap();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ylt_yaml::{Marker, NodeKind};

    #[test]
    fn test_defaults_register_exactly_two_tags() {
        let registry = MacroRegistry::default();
        assert_eq!(registry.tags(), vec![UNWRAP_TAG, VOID_TAG]);
        assert_eq!(registry.len(), 2);
        assert!(MacroRegistry::new().is_empty());
    }

    #[test]
    fn test_default_macros_only_set_markers() {
        let registry = MacroRegistry::with_defaults();
        let context = Context::root(&registry);

        let original = Node::sequence(vec![Node::scalar("a")]).with_tag(UNWRAP_TAG).at(2, 3);
        let mut node = original.clone();
        registry.get(UNWRAP_TAG).unwrap()(&context, &mut node).unwrap();

        assert_eq!(node.marker, Marker::Unwrap);
        assert_eq!(node.kind, NodeKind::Sequence);
        assert_eq!(node.content, original.content);
        assert_eq!(node.tag, original.tag);
        assert_eq!((node.line, node.column), (2, 3));

        registry.get(VOID_TAG).unwrap()(&context, &mut node).unwrap();
        assert_eq!(node.marker, Marker::Void);
        assert_eq!(node.kind, NodeKind::Sequence);
    }

    #[test]
    fn test_register_replaces_and_unregister_removes() {
        let mut registry = MacroRegistry::with_defaults();
        registry.register(VOID_TAG, |context: &Context<'_>, node: &mut Node| {
            Err(context.error(node, "void is disabled"))
        });
        assert_eq!(registry.len(), 2);

        let context = Context::root(&registry);
        let mut node = Node::scalar("x").at(1, 1);
        let err = registry.get(VOID_TAG).unwrap()(&context, &mut node).unwrap_err();
        assert_eq!(err.to_string(), ":1:1: void is disabled");

        assert!(registry.unregister(VOID_TAG));
        assert!(!registry.unregister(VOID_TAG));
        assert!(registry.get(VOID_TAG).is_none());
    }
}
