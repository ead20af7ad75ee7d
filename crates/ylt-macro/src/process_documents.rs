//! Top-level processing of a document stream.

use crate::context::Context;
use crate::error::{Error, ErrorKind, Result};
use crate::process_node::{process_node, unwrap_content};
use ylt_yaml::{Marker, Node, NodeKind};

/// Process every document of a stream and replace `documents` with the result.
///
/// Each input document contributes zero (void), one (unchanged), or many
/// (unwrapped) documents to the output, in input order. An unwrapped
/// sequence becomes one document per element; an unwrapped mapping becomes
/// one document per entry, each holding a single-pair mapping.
///
/// # Errors
///
/// By default the first failing document aborts the pass, leaving
/// `documents` with the output produced so far. With
/// [`ProcessOptions::collect_errors`](crate::ProcessOptions::collect_errors)
/// failing documents are dropped and their errors returned together.
pub fn process_documents(context: &Context<'_>, documents: &mut Vec<Node>) -> Result<()> {
    let originals = std::mem::take(documents);
    let input = originals.len();
    let mut errors = Vec::new();

    for (i, document) in originals.into_iter().enumerate() {
        let document_context = context.child(format!("[{}]", i));
        match process_document(&document_context, document) {
            Ok(output) => documents.extend(output),
            Err(err) if context.options().collect_errors => {
                tracing::warn!(error = %err, "dropping document that failed to process");
                errors.push(err);
            }
            Err(err) => return Err(err),
        }
    }

    tracing::debug!(input, output = documents.len(), "processed documents");

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(Error::Multiple(errors)),
    }
}

fn process_document(context: &Context<'_>, mut document: Node) -> Result<Vec<Node>> {
    if document.kind != NodeKind::Document {
        return Err(context.error(&document, ErrorKind::ExpectedDocument(document.kind_name())));
    }
    let [child] = document.content.as_mut_slice() else {
        let found = document.content.len();
        return Err(context.error(&document, ErrorKind::DocumentChildCount { found }));
    };

    process_node(context, child)?;
    let marker = child.marker;

    match marker {
        Marker::None => Ok(vec![document]),
        Marker::Void => Ok(Vec::new()),
        Marker::Unwrap => {
            let child = document.content.swap_remove(0);
            let elements = unwrap_content(context, child)?;
            tracing::debug!(
                path = %context.format_path(),
                documents = elements.len(),
                "splicing document"
            );
            Ok(elements.into_iter().map(Node::document).collect())
        }
    }
}
