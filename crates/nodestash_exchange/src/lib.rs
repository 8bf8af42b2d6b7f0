// SPDX-License-Identifier: MIT OR Apache-2.0
//! Selection exchange for node graph editors.
//!
//! Exports the selected nodes of a node tree into a named block of a shared
//! JSON document and imports such blocks back, reconstructing nodes, their
//! properties, unlinked input-socket defaults and the links between them.
//!
//! ## Architecture
//!
//! The crate is host-agnostic: everything it needs from the hosting editor
//! comes through the traits in [`host`]. A host integration implements
//! those once, next to its own tree model, and gets
//! [`export::export_nodes`] and [`import::import_nodes`] for free.
//!
//! - [`codec`] converts host values to and from their JSON form
//! - [`document`] models the shared file: named blocks of node/link records
//! - [`report`] surfaces everything the best-effort passes skipped
//! - [`prefs`] holds the export directory setting and per-kind file layout

pub mod codec;
pub mod document;
pub mod export;
pub mod host;
pub mod import;
pub mod prefs;
pub mod report;

pub use codec::{CodecError, HostValue, PropValue};
pub use document::{list_blocks, Block, Document, DocumentError, LinkRecord, NodeRecord};
pub use export::{export_nodes, ExportError};
pub use host::{
    HostNode, InputSocket, LinkEndpoints, PropertyReflect, TreeExport, TreeImport,
    UnknownTypeError,
};
pub use import::{import_nodes, ImportError, ImportOutcome};
pub use prefs::{Prefs, TreeKind};
pub use report::{ExchangeWarning, ExportReport, ImportReport};
