//! Diagnostic scope chain threaded through a processing pass.

use crate::error::{Error, ErrorKind};
use crate::options::ProcessOptions;
use crate::registry::MacroRegistry;
use ylt_yaml::Node;

/// An immutable, parent-linked scope.
///
/// Every recursion step creates a child labeled with a sequence index
/// (`[i]`), a mapping key, or a `[i](key)` / `[i](value)` marker. The chain
/// renders the dotted path used in error messages and carries the macro
/// registry and options down to every node.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    parent: Option<&'a Context<'a>>,
    label: String,
    registry: &'a MacroRegistry,
    options: ProcessOptions,
    depth: usize,
}

impl<'a> Context<'a> {
    /// Create a root context with an empty label and default options.
    pub fn root(registry: &'a MacroRegistry) -> Self {
        Self {
            parent: None,
            label: String::new(),
            registry,
            options: ProcessOptions::default(),
            depth: 0,
        }
    }

    pub fn with_options(mut self, options: ProcessOptions) -> Self {
        self.options = options;
        self
    }

    /// Create a child scope one level deeper.
    pub fn child(&self, label: impl Into<String>) -> Context<'_> {
        Context {
            parent: Some(self),
            label: label.into(),
            registry: self.registry,
            options: self.options,
            depth: self.depth + 1,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Option<&'a Context<'a>> {
        self.parent
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn registry(&self) -> &'a MacroRegistry {
        self.registry
    }

    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Labels from the root down to this context, skipping empty ones.
    pub fn path(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        let mut current = Some(self);
        while let Some(context) = current {
            if !context.label.is_empty() {
                labels.push(context.label.as_str());
            }
            current = context.parent;
        }
        labels.reverse();
        labels
    }

    pub fn format_path(&self) -> String {
        self.path().join(".")
    }

    /// Build an error attributed to `node` at this context's path.
    pub fn error(&self, node: &Node, kind: impl Into<ErrorKind>) -> Error {
        Error::Node {
            path: self.format_path(),
            line: node.line,
            column: node.column,
            kind: kind.into(),
        }
    }
}
