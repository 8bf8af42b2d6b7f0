// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the tree model.

use crate::socket::{Socket, SocketId, SocketValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Node type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Input nodes (constants, parameters)
    Input,
    /// Output nodes (tree results)
    Output,
    /// Math operations
    Math,
    /// Texture operations
    Texture,
    /// Geometry operations
    Geometry,
    /// Shading operations
    Shading,
    /// Utility nodes
    Utility,
}

/// A mutable property declared by a node type.
///
/// Properties hold per-node state that is not socket data, such as the
/// operation selector of a math node. Everything declared here is captured
/// on export and restored on import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySpec {
    /// Property identifier, unique among the type's properties
    pub identifier: String,
    /// Initial value; also fixes the property's type
    pub default: SocketValue,
}

impl PropertySpec {
    /// Create a new property spec
    pub fn new(identifier: impl Into<String>, default: SocketValue) -> Self {
        Self {
            identifier: identifier.into(),
            default,
        }
    }
}

/// Node type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeType {
    /// Unique type identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Category
    pub category: NodeCategory,
    /// Description
    pub description: String,
    /// Declared mutable properties
    pub properties: Vec<PropertySpec>,
    /// Default input sockets
    pub inputs: Vec<Socket>,
    /// Default output sockets
    pub outputs: Vec<Socket>,
}

/// A node instance in the tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Node type ID
    pub node_type: String,
    /// Instance name, unique within its tree
    pub name: String,
    /// Position in the editor canvas
    pub location: [f32; 2],
    /// Whether the node is part of the current selection
    pub selected: bool,
    /// Current property values, keyed by identifier
    pub properties: IndexMap<String, SocketValue>,
    /// Input sockets
    pub inputs: Vec<Socket>,
    /// Output sockets
    pub outputs: Vec<Socket>,
}

impl Node {
    /// Create a new node from a type definition
    pub fn new(node_type: &NodeType) -> Self {
        let properties = node_type
            .properties
            .iter()
            .map(|spec| (spec.identifier.clone(), spec.default.clone()))
            .collect();
        Self {
            id: NodeId::new(),
            node_type: node_type.id.clone(),
            name: node_type.name.clone(),
            location: [0.0, 0.0],
            selected: false,
            properties,
            inputs: node_type.inputs.iter().map(instantiate_socket).collect(),
            outputs: node_type.outputs.iter().map(instantiate_socket).collect(),
        }
    }

    /// Set the location
    pub fn with_location(mut self, x: f32, y: f32) -> Self {
        self.location = [x, y];
        self
    }

    /// Get an input socket by name (first match)
    pub fn input_by_name(&self, name: &str) -> Option<&Socket> {
        self.inputs.iter().find(|s| s.name == name)
    }

    /// Get an output socket by name (first match)
    pub fn output_by_name(&self, name: &str) -> Option<&Socket> {
        self.outputs.iter().find(|s| s.name == name)
    }

    /// Get a socket by ID
    pub fn socket(&self, socket_id: SocketId) -> Option<&Socket> {
        self.inputs
            .iter()
            .find(|s| s.id == socket_id)
            .or_else(|| self.outputs.iter().find(|s| s.id == socket_id))
    }
}

/// Clone a type's socket template with a fresh identity.
fn instantiate_socket(template: &Socket) -> Socket {
    let mut socket = template.clone();
    socket.id = SocketId::new();
    socket.linked = false;
    socket
}

/// Registry of available node types
pub struct NodeRegistry {
    /// Registered node types by ID
    types: IndexMap<String, NodeType>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
        }
    }

    /// Register a node type
    pub fn register(&mut self, node_type: NodeType) {
        self.types.insert(node_type.id.clone(), node_type);
    }

    /// Get a node type by ID
    pub fn get(&self, id: &str) -> Option<&NodeType> {
        self.types.get(id)
    }

    /// Get all registered types
    pub fn types(&self) -> impl Iterator<Item = &NodeType> {
        self.types.values()
    }

    /// Create a node from a type ID
    pub fn create_node(&self, type_id: &str) -> Option<Node> {
        self.get(type_id).map(Node::new)
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::socket::SocketType;

    fn math_type() -> NodeType {
        NodeType {
            id: "math".to_string(),
            name: "Math".to_string(),
            category: NodeCategory::Math,
            description: "Scalar math".to_string(),
            properties: vec![PropertySpec::new(
                "operation",
                SocketValue::String("add".to_string()),
            )],
            inputs: vec![
                Socket::input("A", SocketType::Float).with_default(SocketValue::Float(0.0)),
                Socket::input("B", SocketType::Float).with_default(SocketValue::Float(0.0)),
            ],
            outputs: vec![Socket::output("Result", SocketType::Float)],
        }
    }

    #[test]
    fn test_instances_get_fresh_sockets() {
        let node_type = math_type();
        let first = Node::new(&node_type);
        let second = Node::new(&node_type);

        assert_ne!(first.id, second.id);
        assert_ne!(first.inputs[0].id, second.inputs[0].id);
        assert_ne!(first.outputs[0].id, second.outputs[0].id);
        assert_eq!(
            first.properties.get("operation"),
            Some(&SocketValue::String("add".to_string()))
        );
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = NodeRegistry::new();
        registry.register(math_type());

        assert_eq!(registry.types().count(), 1);
        assert!(registry.get("math").is_some());
        assert!(registry.create_node("unknown").is_none());

        let node = registry.create_node("math").unwrap();
        assert_eq!(node.node_type, "math");
        assert!(node.input_by_name("A").is_some());
        assert!(node.output_by_name("Result").is_some());
    }
}
