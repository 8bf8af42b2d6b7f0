// SPDX-License-Identifier: MIT OR Apache-2.0
//! Geometry tree node set.

use crate::node::{NodeCategory, NodeRegistry, NodeType, PropertySpec};
use crate::socket::{Socket, SocketType, SocketValue};

/// Create the geometry node registry with all available node types
pub fn create_geometry_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    // ========================================================================
    // Output Nodes
    // ========================================================================

    registry.register(NodeType {
        id: "group_output".to_string(),
        name: "Group Output".to_string(),
        category: NodeCategory::Output,
        description: "Final geometry of the tree".to_string(),
        properties: vec![],
        inputs: vec![Socket::input("Geometry", SocketType::Geometry)],
        outputs: vec![],
    });

    // ========================================================================
    // Input Nodes - Constants
    // ========================================================================

    registry.register(NodeType {
        id: "value".to_string(),
        name: "Value".to_string(),
        category: NodeCategory::Input,
        description: "Constant float value".to_string(),
        properties: vec![PropertySpec::new("value", SocketValue::Float(0.0))],
        inputs: vec![],
        outputs: vec![Socket::output("Value", SocketType::Float)],
    });

    registry.register(NodeType {
        id: "vector".to_string(),
        name: "Vector".to_string(),
        category: NodeCategory::Input,
        description: "Constant 3D vector".to_string(),
        properties: vec![PropertySpec::new(
            "vector",
            SocketValue::Vector([0.0, 0.0, 0.0]),
        )],
        inputs: vec![],
        outputs: vec![Socket::output("Vector", SocketType::Vector)],
    });

    // ========================================================================
    // Math
    // ========================================================================

    registry.register(NodeType {
        id: "math".to_string(),
        name: "Math".to_string(),
        category: NodeCategory::Math,
        description: "Scalar math on two values".to_string(),
        properties: vec![PropertySpec::new(
            "operation",
            SocketValue::String("add".to_string()),
        )],
        inputs: vec![
            Socket::input("A", SocketType::Float).with_default(SocketValue::Float(0.0)),
            Socket::input("B", SocketType::Float).with_default(SocketValue::Float(0.0)),
        ],
        outputs: vec![Socket::output("Result", SocketType::Float)],
    });

    // ========================================================================
    // Mesh Primitives
    // ========================================================================

    registry.register(NodeType {
        id: "grid".to_string(),
        name: "Grid".to_string(),
        category: NodeCategory::Geometry,
        description: "Plane mesh subdivided along X and Y".to_string(),
        properties: vec![],
        inputs: vec![
            Socket::input("Size X", SocketType::Float).with_default(SocketValue::Float(1.0)),
            Socket::input("Size Y", SocketType::Float).with_default(SocketValue::Float(1.0)),
            Socket::input("Vertices X", SocketType::Int).with_default(SocketValue::Int(3)),
            Socket::input("Vertices Y", SocketType::Int).with_default(SocketValue::Int(3)),
        ],
        outputs: vec![Socket::output("Mesh", SocketType::Geometry)],
    });

    registry.register(NodeType {
        id: "cube".to_string(),
        name: "Cube".to_string(),
        category: NodeCategory::Geometry,
        description: "Box mesh".to_string(),
        properties: vec![],
        inputs: vec![
            Socket::input("Size", SocketType::Vector)
                .with_default(SocketValue::Vector([1.0, 1.0, 1.0])),
        ],
        outputs: vec![Socket::output("Mesh", SocketType::Geometry)],
    });

    // ========================================================================
    // Geometry Operations
    // ========================================================================

    registry.register(NodeType {
        id: "transform".to_string(),
        name: "Transform".to_string(),
        category: NodeCategory::Geometry,
        description: "Translate, rotate and scale geometry".to_string(),
        properties: vec![],
        inputs: vec![
            Socket::input("Geometry", SocketType::Geometry),
            Socket::input("Translation", SocketType::Vector)
                .with_default(SocketValue::Vector([0.0, 0.0, 0.0])),
            Socket::input("Rotation", SocketType::Vector)
                .with_default(SocketValue::Vector([0.0, 0.0, 0.0])),
            Socket::input("Scale", SocketType::Vector)
                .with_default(SocketValue::Vector([1.0, 1.0, 1.0])),
        ],
        outputs: vec![Socket::output("Geometry", SocketType::Geometry)],
    });

    registry.register(NodeType {
        id: "set_position".to_string(),
        name: "Set Position".to_string(),
        category: NodeCategory::Geometry,
        description: "Offset point positions".to_string(),
        properties: vec![],
        inputs: vec![
            Socket::input("Geometry", SocketType::Geometry),
            Socket::input("Selection", SocketType::Bool).with_default(SocketValue::Bool(true)),
            Socket::input("Offset", SocketType::Vector)
                .with_default(SocketValue::Vector([0.0, 0.0, 0.0])),
        ],
        outputs: vec![Socket::output("Geometry", SocketType::Geometry)],
    });

    registry.register(NodeType {
        id: "join_geometry".to_string(),
        name: "Join Geometry".to_string(),
        category: NodeCategory::Geometry,
        description: "Merge two geometry streams".to_string(),
        properties: vec![],
        inputs: vec![
            Socket::input("A", SocketType::Geometry),
            Socket::input("B", SocketType::Geometry),
        ],
        outputs: vec![Socket::output("Geometry", SocketType::Geometry)],
    });

    registry
}
