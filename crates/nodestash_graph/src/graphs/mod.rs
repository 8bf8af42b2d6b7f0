// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in node registries per tree kind.

pub mod geometry;
pub mod shader;
