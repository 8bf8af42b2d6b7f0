// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader tree node set.

use crate::node::{NodeCategory, NodeRegistry, NodeType, PropertySpec};
use crate::socket::{Socket, SocketType, SocketValue};

/// Create the shader node registry with all available node types
pub fn create_shader_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    // ========================================================================
    // Output Nodes
    // ========================================================================

    registry.register(NodeType {
        id: "material_output".to_string(),
        name: "Material Output".to_string(),
        category: NodeCategory::Output,
        description: "Final surface output".to_string(),
        properties: vec![],
        inputs: vec![
            Socket::input("Surface", SocketType::Shader),
            Socket::input("Displacement", SocketType::Vector)
                .with_default(SocketValue::Vector([0.0, 0.0, 0.0])),
        ],
        outputs: vec![],
    });

    // ========================================================================
    // Shading
    // ========================================================================

    registry.register(NodeType {
        id: "principled_bsdf".to_string(),
        name: "Principled BSDF".to_string(),
        category: NodeCategory::Shading,
        description: "Physically based surface shader".to_string(),
        properties: vec![],
        inputs: vec![
            Socket::input("Base Color", SocketType::Color)
                .with_default(SocketValue::Color([0.8, 0.8, 0.8, 1.0])),
            Socket::input("Metallic", SocketType::Float).with_default(SocketValue::Float(0.0)),
            Socket::input("Roughness", SocketType::Float).with_default(SocketValue::Float(0.5)),
            Socket::input("IOR", SocketType::Float).with_default(SocketValue::Float(1.45)),
            Socket::input("Emission", SocketType::Color)
                .with_default(SocketValue::Color([0.0, 0.0, 0.0, 1.0])),
            Socket::input("Emission Strength", SocketType::Float)
                .with_default(SocketValue::Float(0.0)),
            Socket::input("Alpha", SocketType::Float).with_default(SocketValue::Float(1.0)),
        ],
        outputs: vec![Socket::output("BSDF", SocketType::Shader)],
    });

    // ========================================================================
    // Input Nodes - Constants
    // ========================================================================

    registry.register(NodeType {
        id: "rgb".to_string(),
        name: "RGB".to_string(),
        category: NodeCategory::Input,
        description: "Constant color value".to_string(),
        properties: vec![PropertySpec::new(
            "color",
            SocketValue::Color([0.5, 0.5, 0.5, 1.0]),
        )],
        inputs: vec![],
        outputs: vec![Socket::output("Color", SocketType::Color)],
    });

    registry.register(NodeType {
        id: "value".to_string(),
        name: "Value".to_string(),
        category: NodeCategory::Input,
        description: "Constant float value".to_string(),
        properties: vec![PropertySpec::new("value", SocketValue::Float(0.0))],
        inputs: vec![],
        outputs: vec![Socket::output("Value", SocketType::Float)],
    });

    // ========================================================================
    // Math & Color
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

    registry.register(NodeType {
        id: "mix_color".to_string(),
        name: "Mix Color".to_string(),
        category: NodeCategory::Utility,
        description: "Blend two colors by a factor".to_string(),
        properties: vec![PropertySpec::new(
            "blend_mode",
            SocketValue::String("mix".to_string()),
        )],
        inputs: vec![
            Socket::input("Factor", SocketType::Float).with_default(SocketValue::Float(0.5)),
            Socket::input("A", SocketType::Color)
                .with_default(SocketValue::Color([0.0, 0.0, 0.0, 1.0])),
            Socket::input("B", SocketType::Color)
                .with_default(SocketValue::Color([1.0, 1.0, 1.0, 1.0])),
        ],
        outputs: vec![Socket::output("Color", SocketType::Color)],
    });

    // ========================================================================
    // Textures
    // ========================================================================

    registry.register(NodeType {
        id: "image_texture".to_string(),
        name: "Image Texture".to_string(),
        category: NodeCategory::Texture,
        description: "Sample an image file".to_string(),
        properties: vec![PropertySpec::new(
            "image",
            SocketValue::String(String::new()),
        )],
        inputs: vec![
            Socket::input("Vector", SocketType::Vector)
                .with_default(SocketValue::Vector([0.0, 0.0, 0.0])),
        ],
        outputs: vec![
            Socket::output("Color", SocketType::Color),
            Socket::output("Alpha", SocketType::Float),
        ],
    });

    registry.register(NodeType {
        id: "fresnel".to_string(),
        name: "Fresnel".to_string(),
        category: NodeCategory::Utility,
        description: "View-angle dependent blending factor".to_string(),
        properties: vec![],
        inputs: vec![
            Socket::input("IOR", SocketType::Float).with_default(SocketValue::Float(1.45)),
        ],
        outputs: vec![Socket::output("Factor", SocketType::Float)],
    });

    registry
}
