// SPDX-License-Identifier: MIT OR Apache-2.0
//! Socket definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketId(pub Uuid);

impl SocketId {
    /// Create a new random socket ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SocketId {
    fn default() -> Self {
        Self::new()
    }
}

/// Socket direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocketDirection {
    /// Input socket
    Input,
    /// Output socket
    Output,
}

/// Data type that can flow through sockets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocketType {
    /// Boolean value
    Bool,
    /// Integer value
    Int,
    /// Floating point value
    Float,
    /// 3D vector
    Vector,
    /// Color (RGBA)
    Color,
    /// String value
    String,
    /// Geometry stream (carries no default value)
    Geometry,
    /// Shader closure (carries no default value)
    Shader,
}

impl SocketType {
    /// Check if this type can connect to another type
    pub fn can_connect_to(&self, other: &SocketType) -> bool {
        if self == other {
            return true;
        }

        // Implicit conversions between value-carrying types
        matches!(
            (self, other),
            (Self::Int, Self::Float)
                | (Self::Float, Self::Int)
                | (Self::Bool, Self::Float)
                | (Self::Bool, Self::Int)
                | (Self::Float, Self::Vector | Self::Color)
                | (Self::Color, Self::Vector)
                | (Self::Vector, Self::Color)
        )
    }
}

/// Value that can be stored in a socket default or node property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SocketValue {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i32),
    /// Float
    Float(f32),
    /// 3D vector
    Vector([f32; 3]),
    /// Color (RGBA)
    Color([f32; 4]),
    /// String
    String(String),
}

impl SocketValue {
    /// Get the socket type for this value
    pub fn socket_type(&self) -> SocketType {
        match self {
            Self::Bool(_) => SocketType::Bool,
            Self::Int(_) => SocketType::Int,
            Self::Float(_) => SocketType::Float,
            Self::Vector(_) => SocketType::Vector,
            Self::Color(_) => SocketType::Color,
            Self::String(_) => SocketType::String,
        }
    }
}

/// A socket on a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Socket {
    /// Unique socket ID
    pub id: SocketId,
    /// Socket name, used to match link endpoints across export/import
    pub name: String,
    /// Socket direction
    pub direction: SocketDirection,
    /// Data type
    pub socket_type: SocketType,
    /// Default value (for unlinked inputs)
    pub default_value: Option<SocketValue>,
    /// Whether a link currently attaches to this socket
    pub linked: bool,
}

impl Socket {
    /// Create a new input socket
    pub fn input(name: impl Into<String>, socket_type: SocketType) -> Self {
        Self {
            id: SocketId::new(),
            name: name.into(),
            direction: SocketDirection::Input,
            socket_type,
            default_value: None,
            linked: false,
        }
    }

    /// Create a new output socket
    pub fn output(name: impl Into<String>, socket_type: SocketType) -> Self {
        Self {
            id: SocketId::new(),
            name: name.into(),
            direction: SocketDirection::Output,
            socket_type,
            default_value: None,
            linked: false,
        }
    }

    /// Set the default value
    pub fn with_default(mut self, value: SocketValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Check if a connection to another socket is valid
    pub fn can_connect(&self, other: &Socket) -> bool {
        // Must be opposite directions
        if self.direction == other.direction {
            return false;
        }

        self.socket_type.can_connect_to(&other.socket_type)
    }
}
