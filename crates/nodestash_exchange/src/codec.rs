// SPDX-License-Identifier: MIT OR Apache-2.0
//! Value codec: conversion between host property values and their JSON form.
//!
//! The exporter reads host values as [`HostValue`] and the codec flattens
//! them into [`PropValue`], the JSON-representable subset the document
//! format allows. On import the codec writes values back through
//! [`PropertyReflect`], where the host re-wraps flat arrays into its native
//! composite types.

use crate::host::PropertyReflect;
use serde::{Deserialize, Serialize};

/// A JSON-representable property value.
///
/// Serialized untagged, so documents contain plain JSON scalars and arrays
/// rather than enum wrappers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Floating point scalar
    Float(f64),
    /// Text scalar (also covers enum-style selectors)
    String(String),
    /// Flattened numeric sequence (vectors, eulers, colors)
    NumberArray(Vec<f64>),
}

/// A property value as the host exposes it, before JSON conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Floating point scalar
    Float(f64),
    /// Text scalar
    String(String),
    /// Fixed-size numeric sequence (vector, euler, quaternion)
    Sequence(Vec<f64>),
    /// Color channels; the host may or may not carry an alpha channel
    Color {
        /// Red channel
        r: f64,
        /// Green channel
        g: f64,
        /// Blue channel
        b: f64,
        /// Alpha channel, when the host value has one
        a: Option<f64>,
    },
    /// A value the codec cannot represent in JSON (object references,
    /// nested collections). Serialization omits it.
    Opaque,
}

/// Error writing a value back onto a host object.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CodecError {
    /// No property or input socket with this identifier
    #[error("no property or socket named `{0}`")]
    UnknownProperty(String),

    /// The value cannot be coerced into the property's native type
    #[error("property `{property}` expects {expected}")]
    TypeMismatch {
        /// Property identifier
        property: String,
        /// Description of the expected shape
        expected: &'static str,
    },

    /// The socket exists but does not carry a default value
    #[error("socket `{0}` does not carry a default value")]
    NoDefault(String),
}

/// Convert a host value to its JSON form.
///
/// Returns `None` for values the document format cannot represent; callers
/// omit the property. Colors missing an alpha channel are padded to 1.0.
pub fn serialize(value: &HostValue) -> Option<PropValue> {
    match value {
        HostValue::Bool(v) => Some(PropValue::Bool(*v)),
        HostValue::Int(v) => Some(PropValue::Int(*v)),
        HostValue::Float(v) => Some(PropValue::Float(*v)),
        HostValue::String(v) => Some(PropValue::String(v.clone())),
        HostValue::Sequence(v) => Some(PropValue::NumberArray(v.clone())),
        HostValue::Color { r, g, b, a } => {
            Some(PropValue::NumberArray(vec![*r, *g, *b, a.unwrap_or(1.0)]))
        }
        HostValue::Opaque => None,
    }
}

/// Write a recorded value back onto a host object's property.
///
/// Delegates to [`PropertyReflect::set_property`]; the host re-wraps
/// [`PropValue::NumberArray`] into the property's native composite type.
/// Errors are per-field and non-fatal to the surrounding import.
pub fn restore<R>(owner: &mut R, name: &str, value: &PropValue) -> Result<(), CodecError>
where
    R: PropertyReflect + ?Sized,
{
    owner.set_property(name, value)
}
