// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reconstruction of nodes and links from a named document block.

use crate::codec;
use crate::document::{Document, DocumentError, LinkRecord, NodeRecord};
use crate::host::{HostNode, TreeImport};
use crate::report::{ExchangeWarning, ImportReport};
use indexmap::IndexMap;
use std::path::Path;

/// Error aborting an import.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The document could not be read or parsed
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// A record named a node type the host cannot instantiate.
    ///
    /// The import stops at the offending record. `created` lists the nodes
    /// already added to the tree, so a caller wanting all-or-nothing
    /// behavior can remove them; the tree itself is not rolled back.
    #[error("unknown node type `{}` ({} nodes already created)", .node_type, .created.len())]
    UnknownNodeType {
        /// The unresolvable type identifier
        node_type: String,
        /// Actual names of nodes created before the failure
        created: Vec<String>,
    },
}

/// Outcome of an import that did not error.
#[derive(Debug, Clone)]
pub enum ImportOutcome {
    /// The block was found and reconstructed (possibly with warnings)
    Imported(ImportReport),
    /// The file or the block does not exist; nothing was created
    NotFound,
}

/// Import `document[block_name]` from `path` into `tree`.
///
/// Nodes are instantiated by type identifier, then properties and socket
/// defaults are restored; links are recreated by socket-name lookup. The
/// block being found counts as success regardless of how many individual
/// records survived; everything skipped is recorded in the report warnings.
pub fn import_nodes<T: TreeImport>(
    tree: &mut T,
    path: &Path,
    block_name: &str,
) -> Result<ImportOutcome, ImportError> {
    if !path.exists() {
        return Ok(ImportOutcome::NotFound);
    }
    let document = Document::load(path)?;
    let Some(block) = document.blocks.get(block_name) else {
        return Ok(ImportOutcome::NotFound);
    };

    let mut warnings = Vec::new();

    // Recorded name -> actual name; the host may suffix duplicates.
    let mut name_map: IndexMap<String, String> = IndexMap::new();
    for record in &block.nodes {
        let actual = match tree.create_node(&record.node_type, &record.name) {
            Ok(actual) => actual,
            Err(err) => {
                return Err(ImportError::UnknownNodeType {
                    node_type: err.0,
                    created: name_map.values().cloned().collect(),
                });
            }
        };
        restore_node(tree, &actual, record, &mut warnings);
        name_map.insert(record.name.clone(), actual);
    }

    let mut link_count = 0;
    for record in &block.links {
        if recreate_link(tree, &name_map, record, &mut warnings) {
            link_count += 1;
        }
    }

    let report = ImportReport {
        created: name_map.values().cloned().collect(),
        link_count,
        warnings,
    };
    tracing::info!(
        "imported block `{block_name}`: {} nodes, {} links",
        report.created.len(),
        report.link_count
    );
    Ok(ImportOutcome::Imported(report))
}

/// Restore location, properties and socket defaults onto a created node.
fn restore_node<T: TreeImport>(
    tree: &mut T,
    name: &str,
    record: &NodeRecord,
    warnings: &mut Vec<ExchangeWarning>,
) {
    // `name` came out of create_node a moment ago; the host contract
    // guarantees it resolves.
    let Some(node) = tree.node_mut(name) else {
        return;
    };

    node.set_location(record.location);
    for (identifier, value) in &record.properties {
        let outcome = if node.property(identifier).is_some() {
            codec::restore(node, identifier, value)
        } else {
            // Not a property; maybe an input socket identifier.
            node.set_input_default(identifier, value)
        };
        if let Err(err) = outcome {
            warnings.push(ExchangeWarning::PropertyNotRestored {
                node: name.to_string(),
                property: identifier.clone(),
                reason: err.to_string(),
            });
        }
    }
}

/// Recreate one recorded link. Returns whether a link was created.
fn recreate_link<T: TreeImport>(
    tree: &mut T,
    name_map: &IndexMap<String, String>,
    record: &LinkRecord,
    warnings: &mut Vec<ExchangeWarning>,
) -> bool {
    let mut skip = |reason: &str| {
        warnings.push(ExchangeWarning::LinkSkipped {
            from_node: record.from_node.clone(),
            from_socket: record.from_socket.clone(),
            to_node: record.to_node.clone(),
            to_socket: record.to_socket.clone(),
            reason: reason.to_string(),
        });
        false
    };

    let (Some(from), Some(to)) = (
        name_map.get(&record.from_node),
        name_map.get(&record.to_node),
    ) else {
        return skip("endpoint node not in block");
    };

    // First matching socket name wins, mirroring editor lookup rules.
    let Some(from_index) = tree
        .node(from)
        .and_then(|n| n.output_sockets().iter().position(|s| s == &record.from_socket))
    else {
        return skip("output socket not found");
    };
    let Some(to_index) = tree.node(to).and_then(|n| {
        n.input_sockets()
            .iter()
            .position(|s| s.identifier == record.to_socket)
    }) else {
        return skip("input socket not found");
    };

    if tree.connect(from, from_index, to, to_index) {
        true
    } else {
        skip("host rejected the link")
    }
}
