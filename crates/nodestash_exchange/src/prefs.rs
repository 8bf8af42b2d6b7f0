// SPDX-License-Identifier: MIT OR Apache-2.0
//! User preferences and per-kind document file layout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Preferences file name, stored inside the host's config directory.
pub const PREFS_FILE_NAME: &str = "nodestash.prefs";

/// The kind of node tree a document belongs to.
///
/// Geometry and shader selections live in independent documents, so a block
/// picker only ever offers blocks the current editor can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeKind {
    /// Geometry node trees
    Geometry,
    /// Shader node trees
    Shader,
}

impl TreeKind {
    /// Document file name for this kind.
    pub fn file_name(&self) -> &'static str {
        match self {
            TreeKind::Geometry => "export_geometry_nodes.json",
            TreeKind::Shader => "export_shader_nodes.json",
        }
    }

    /// Display name for messages and pickers.
    pub fn display_name(&self) -> &'static str {
        match self {
            TreeKind::Geometry => "geometry",
            TreeKind::Shader => "shader",
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// User-configurable settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prefs {
    /// Directory the per-kind documents are written to
    pub export_directory: PathBuf,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            export_directory: default_export_directory(),
        }
    }
}

impl Prefs {
    /// Get the path to the preferences file inside a config directory.
    pub fn prefs_file_path(config_dir: &Path) -> PathBuf {
        config_dir.join(PREFS_FILE_NAME)
    }

    /// Load preferences from `path`.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        ron::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save preferences to `path` as pretty RON.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }

    /// Document path for a tree kind.
    pub fn export_path(&self, kind: TreeKind) -> PathBuf {
        self.export_directory.join(kind.file_name())
    }
}

/// The user's desktop, falling back to the working directory.
fn default_export_directory() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.desktop_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
