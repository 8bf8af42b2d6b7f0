// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reference node tree model for the selection exchange.
//!
//! This crate provides the in-memory tree the exchange operates on:
//! - Typed input/output sockets with defaults and link state
//! - Name-unique nodes created from a node-type registry
//! - Validated links between sockets
//! - Built-in geometry and shader node sets
//! - Adapters implementing the `nodestash_exchange` host traits
//!
//! ## Architecture
//!
//! The model carries identity through `uuid`-based IDs. Names, not IDs, are
//! what crosses the serialization boundary: [`transfer`] resolves between
//! the two on the way in and out.

pub mod graphs;
pub mod link;
pub mod node;
pub mod socket;
pub mod transfer;
pub mod tree;

pub use link::{Link, LinkId};
pub use node::{Node, NodeCategory, NodeId, NodeRegistry, NodeType, PropertySpec};
pub use socket::{Socket, SocketDirection, SocketId, SocketType, SocketValue};
pub use transfer::{export_selection, import_block, GraphHost};
pub use tree::{LinkError, NodeTree};
