// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host collaborator contract.
//!
//! The exporter and importer never touch a concrete editor; everything they
//! need from the hosting application comes through these traits. A host
//! integration implements them once, next to its own tree model, and gets
//! export and import for free.

use crate::codec::{CodecError, HostValue, PropValue};

/// Runtime reflection over a node's mutable property state.
///
/// `mutable_properties` must already exclude read-only and internal
/// bookkeeping identifiers; everything it lists is captured on export and
/// written back on import.
pub trait PropertyReflect {
    /// Identifiers of capturable properties, in declaration order.
    fn mutable_properties(&self) -> Vec<String>;

    /// Read one property. `None` when the identifier is unknown.
    fn property(&self, name: &str) -> Option<HostValue>;

    /// Write one property, re-wrapping into the native type as needed.
    fn set_property(&mut self, name: &str, value: &PropValue) -> Result<(), CodecError>;
}

/// One input socket as the exporter sees it.
#[derive(Debug, Clone)]
pub struct InputSocket {
    /// Socket identifier, unique among the node's inputs
    pub identifier: String,
    /// Default value carried by the socket, if it has one
    pub default_value: Option<HostValue>,
    /// Whether a link currently feeds this socket
    pub is_linked: bool,
}

/// A node as seen through the host contract.
pub trait HostNode: PropertyReflect {
    /// Node name, unique within its tree.
    fn name(&self) -> &str;

    /// Type identifier the node was instantiated from.
    fn type_id(&self) -> &str;

    /// Position in the editor canvas.
    fn location(&self) -> [f32; 2];

    /// Move the node.
    fn set_location(&mut self, location: [f32; 2]);

    /// Input sockets, in socket order.
    fn input_sockets(&self) -> Vec<InputSocket>;

    /// Output socket names, in socket order.
    fn output_sockets(&self) -> Vec<String>;

    /// Assign a recorded value directly to an input socket's default,
    /// bypassing property reflection.
    fn set_input_default(&mut self, identifier: &str, value: &PropValue)
        -> Result<(), CodecError>;
}

/// A link with both endpoints resolved to names.
///
/// Names, not host identities, are what survives serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEndpoints {
    /// Source node name
    pub from_node: String,
    /// Source output socket name
    pub from_socket: String,
    /// Target node name
    pub to_node: String,
    /// Target input socket name
    pub to_socket: String,
}

/// Read access the exporter needs from a host tree.
pub trait TreeExport {
    /// Concrete node type.
    type Node: HostNode;

    /// Currently selected nodes, in tree order.
    fn selected_nodes(&self) -> Vec<&Self::Node>;

    /// Every link in the tree, endpoints by name.
    fn links(&self) -> Vec<LinkEndpoints>;
}

/// The requested node type identifier is not known to the host.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown node type `{0}`")]
pub struct UnknownTypeError(pub String);

/// Construction access the importer needs from a host tree.
pub trait TreeImport {
    /// Concrete node type.
    type Node: HostNode;

    /// Instantiate a node of `type_id` under `name`. The host may rename to
    /// keep names unique; the actual name is returned.
    fn create_node(&mut self, type_id: &str, name: &str) -> Result<String, UnknownTypeError>;

    /// Look up a node by name.
    fn node(&self, name: &str) -> Option<&Self::Node>;

    /// Look up a node by name, mutably.
    fn node_mut(&mut self, name: &str) -> Option<&mut Self::Node>;

    /// Link the `from_output`-th output of `from_node` to the `to_input`-th
    /// input of `to_node`. Returns `false` when the host rejects the link.
    fn connect(
        &mut self,
        from_node: &str,
        from_output: usize,
        to_node: &str,
        to_input: usize,
    ) -> bool;
}
