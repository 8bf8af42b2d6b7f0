// SPDX-License-Identifier: MIT OR Apache-2.0
//! Outcome reports for export and import runs.
//!
//! The exchange favors partial success over aborting; everything it skips
//! along the way is recorded as a warning instead of being silently dropped.

/// A non-fatal condition encountered while exporting or importing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeWarning {
    /// A property value had no JSON representation and was omitted
    #[error("node `{node}`: property `{property}` has no JSON representation, omitted")]
    UnsupportedProperty {
        /// Node name
        node: String,
        /// Property or socket identifier
        property: String,
    },

    /// Reflection listed a property that could not be read
    #[error("node `{node}`: property `{property}` could not be read")]
    UnreadableProperty {
        /// Node name
        node: String,
        /// Property identifier
        property: String,
    },

    /// A recorded property could not be written back
    #[error("node `{node}`: property `{property}` not restored: {reason}")]
    PropertyNotRestored {
        /// Node name
        node: String,
        /// Property or socket identifier
        property: String,
        /// What went wrong
        reason: String,
    },

    /// A recorded link could not be recreated
    #[error("link {from_node}.{from_socket} -> {to_node}.{to_socket} skipped: {reason}")]
    LinkSkipped {
        /// Recorded source node name
        from_node: String,
        /// Recorded source socket name
        from_socket: String,
        /// Recorded target node name
        to_node: String,
        /// Recorded target socket name
        to_socket: String,
        /// What went wrong
        reason: String,
    },
}

/// Summary of one export run.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Number of node records written
    pub node_count: usize,
    /// Number of link records written
    pub link_count: usize,
    /// Per-item conditions that were skipped over
    pub warnings: Vec<ExchangeWarning>,
}

/// Summary of one import run.
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// Actual names of the nodes created, in record order
    pub created: Vec<String>,
    /// Number of links recreated
    pub link_count: usize,
    /// Per-item conditions that were skipped over
    pub warnings: Vec<ExchangeWarning>,
}
