//! Owner of a registry and options for whole-stream expansion.

use crate::context::Context;
use crate::error::Result;
use crate::options::ProcessOptions;
use crate::process_documents::process_documents;
use crate::registry::MacroRegistry;
use std::path::Path;
use ylt_yaml::Node;

/// Expands YAML streams with a fixed registry and options.
///
/// # Example
///
/// ```rust
/// use ylt_macro::Expander;
///
/// let expander = Expander::new();
/// let documents = expander
///     .expand_str("--- !void draft\n--- !unwrap [a, b]\n")
///     .unwrap();
/// assert_eq!(documents.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Expander {
    registry: MacroRegistry,
    options: ProcessOptions,
}

impl Expander {
    /// Create an expander with the default registry and options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: MacroRegistry) -> Self {
        Self {
            registry,
            options: ProcessOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ProcessOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &MacroRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut MacroRegistry {
        &mut self.registry
    }

    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Process already decoded documents in place.
    pub fn process(&self, documents: &mut Vec<Node>) -> Result<()> {
        let root = Context::root(&self.registry).with_options(self.options);
        process_documents(&root, documents)
    }

    /// Decode a YAML stream and expand it.
    pub fn expand_str(&self, source: &str) -> Result<Vec<Node>> {
        let mut documents = ylt_yaml::parse_documents(source)?;
        self.process(&mut documents)?;
        Ok(documents)
    }

    /// Read a YAML file and expand it.
    pub fn expand_file(&self, path: impl AsRef<Path>) -> Result<Vec<Node>> {
        let mut documents = ylt_yaml::read_file(path)?;
        self.process(&mut documents)?;
        Ok(documents)
    }
}
