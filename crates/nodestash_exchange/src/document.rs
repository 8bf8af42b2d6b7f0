// SPDX-License-Identifier: MIT OR Apache-2.0
//! The shared JSON document and its named blocks.

use crate::codec::PropValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A whole export file: block name to block, in insertion order.
///
/// The map is flattened on serialization, so the file's top level is a plain
/// JSON object keyed by block name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Named blocks
    #[serde(flatten)]
    pub blocks: IndexMap<String, Block>,
}

/// One export unit: the nodes and links of a single selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Captured nodes
    pub nodes: Vec<NodeRecord>,
    /// Captured links between those nodes
    pub links: Vec<LinkRecord>,
}

/// Captured state of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node name, unique within the block
    pub name: String,
    /// Type identifier used to re-instantiate the node
    #[serde(rename = "type")]
    pub node_type: String,
    /// Editor canvas position
    pub location: [f32; 2],
    /// Property and unlinked-socket-default values, keyed by identifier
    pub properties: IndexMap<String, PropValue>,
}

/// Captured link, endpoints by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Source node name
    pub from_node: String,
    /// Source output socket name
    pub from_socket: String,
    /// Target node name
    pub to_node: String,
    /// Target input socket name
    pub to_socket: String,
}

/// Error reading or writing a document file.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// File could not be read or written
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// File contents are not a valid document
    #[error("invalid document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Document {
    /// Read a document from `path`.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Read a document, treating a missing or unreadable file as empty.
    ///
    /// Export uses this so a corrupt file is overwritten rather than fatal.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!("discarding unreadable document {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Write the whole document to `path`, pretty-printed.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Block names present in the document at `path`, in file order.
///
/// Read and parse failures yield an empty list; this feeds pickers where
/// "no file yet" and "no blocks yet" look the same.
pub fn list_blocks(path: &Path) -> Vec<String> {
    Document::load(path)
        .map(|document| document.blocks.keys().cloned().collect())
        .unwrap_or_default()
}
