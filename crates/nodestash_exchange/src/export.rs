// SPDX-License-Identifier: MIT OR Apache-2.0
//! Capture of a node selection into a named document block.

use crate::codec;
use crate::document::{Block, Document, DocumentError, LinkRecord, NodeRecord};
use crate::host::{HostNode, TreeExport};
use crate::prefs::TreeKind;
use crate::report::{ExchangeWarning, ExportReport};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::Path;

/// Error aborting an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The document could not be written
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The tree is not of the requested kind; nothing was written
    #[error("expected a {requested} node tree, found {found}")]
    KindMismatch {
        /// Kind the caller asked to export
        requested: TreeKind,
        /// Kind of the tree that was supplied
        found: TreeKind,
    },
}

/// Export the selected nodes of `tree` into `document[block_name]` at `path`.
///
/// The rest of the document is preserved: blocks under other names are
/// rewritten unchanged, and a corrupt or missing file starts empty. The
/// named block is overwritten wholesale, so exporting the same name twice
/// does not grow the file.
pub fn export_nodes<T: TreeExport>(
    tree: &T,
    path: &Path,
    block_name: &str,
) -> Result<ExportReport, ExportError> {
    let mut document = Document::load_or_default(path);
    let selected = tree.selected_nodes();
    let mut warnings = Vec::new();

    let mut nodes = Vec::with_capacity(selected.len());
    let mut selected_names = HashSet::new();
    for node in &selected {
        nodes.push(capture_node(*node, &mut warnings));
        selected_names.insert(node.name().to_string());
    }

    // Links crossing the selection boundary are dropped.
    let links: Vec<LinkRecord> = tree
        .links()
        .into_iter()
        .filter(|link| {
            selected_names.contains(&link.from_node) && selected_names.contains(&link.to_node)
        })
        .map(|link| LinkRecord {
            from_node: link.from_node,
            from_socket: link.from_socket,
            to_node: link.to_node,
            to_socket: link.to_socket,
        })
        .collect();

    let report = ExportReport {
        node_count: nodes.len(),
        link_count: links.len(),
        warnings,
    };

    document
        .blocks
        .insert(block_name.to_string(), Block { nodes, links });
    document.save(path)?;

    tracing::info!(
        "exported block `{block_name}`: {} nodes, {} links",
        report.node_count,
        report.link_count
    );
    Ok(report)
}

/// Capture one node's mutable properties and unlinked input defaults.
fn capture_node<N: HostNode>(node: &N, warnings: &mut Vec<ExchangeWarning>) -> NodeRecord {
    let mut properties = IndexMap::new();

    for identifier in node.mutable_properties() {
        match node.property(&identifier) {
            Some(value) => match codec::serialize(&value) {
                Some(value) => {
                    properties.insert(identifier, value);
                }
                None => warnings.push(ExchangeWarning::UnsupportedProperty {
                    node: node.name().to_string(),
                    property: identifier,
                }),
            },
            None => warnings.push(ExchangeWarning::UnreadableProperty {
                node: node.name().to_string(),
                property: identifier,
            }),
        }
    }

    // Unlinked input defaults ride along under the socket identifier; a
    // linked socket takes its value from the link instead.
    for socket in node.input_sockets() {
        if socket.is_linked {
            continue;
        }
        let Some(default) = socket.default_value else {
            continue;
        };
        match codec::serialize(&default) {
            Some(value) => {
                properties.insert(socket.identifier, value);
            }
            None => warnings.push(ExchangeWarning::UnsupportedProperty {
                node: node.name().to_string(),
                property: socket.identifier,
            }),
        }
    }

    NodeRecord {
        name: node.name().to_string(),
        node_type: node.type_id().to_string(),
        location: node.location(),
        properties,
    }
}
