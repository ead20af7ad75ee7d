//! # ylt-macro
//!
//! Tag-driven macro expansion over YAML document trees.
//!
//! The engine walks decoded [`ylt_yaml::Node`] trees and rewrites them in
//! place. Two built-in macros restructure documents:
//!
//! - `!void` deletes a node (and its whole subtree) from its parent.
//! - `!unwrap` splices a node's content into its parent. Inside a sequence an
//!   unwrapped sequence is flattened one level and an unwrapped mapping
//!   becomes one single-pair mapping per entry. At the top level an unwrapped
//!   root becomes several documents. Mapping keys and values can never be
//!   unwrapped.
//!
//! Any other tag can be bound to a macro in a [`MacroRegistry`]. Macros run
//! post-order, after the node's children have been processed.
//!
//! Every failure is reported as `path:line:column: message`, where the path
//! is built from the [`Context`] chain: `[i]` for sequence items, the key text
//! for plain string keys, and `[i](key)` / `[i](value)` otherwise.
//!
//! ## Example
//!
//! ```rust
//! use ylt_macro::{Context, MacroRegistry, process_documents};
//!
//! let mut documents = ylt_yaml::parse_documents(
//!     "steps:\n  - setup\n  - !void debug\n  - !unwrap [build, test]\n",
//! )
//! .unwrap();
//!
//! let registry = MacroRegistry::with_defaults();
//! process_documents(&Context::root(&registry), &mut documents).unwrap();
//!
//! let (_, steps) = documents[0].content[0].pairs().next().unwrap();
//! let names: Vec<_> = steps.content.iter().map(|n| n.value.as_str()).collect();
//! assert_eq!(names, ["setup", "build", "test"]);
//! ```

mod context;
mod error;
mod expander;
mod options;
mod process_documents;
mod process_node;
mod registry;

pub use context::Context;
pub use error::{Error, ErrorKind, Result};
pub use expander::Expander;
pub use options::{DEFAULT_MAX_DEPTH, ProcessOptions};
pub use process_documents::process_documents;
pub use process_node::process_node;
pub use registry::{Macro, MacroRegistry, UNWRAP_TAG, VOID_TAG, unwrap_macro, void_macro};
