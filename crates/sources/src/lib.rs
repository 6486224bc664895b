//! Shader source slots for the viewer.
//!
//! The renderer compiles whatever the *live* fragment slot currently holds;
//! the vertex stage is fixed for the process lifetime. A `SourceSet` also
//! remembers the fragment source it started with, so the reset trigger can
//! roll back edits without touching the user's file on disk.
//!
//! Types:
//!
//! - `SourceError` classifies fragment-file read failures with the offending
//!   path attached.
//! - `SourceSet` holds the vertex stage plus the original and live fragment
//!   slots.
//!
//! Functions:
//!
//! - `SourceSet::builtin` / `with_fragment` / `from_fragment_file` construct
//!   the set from the bundled pair or a user-supplied fragment.
//! - `SourceSet::set_fragment` and `reset_fragment` mutate the live slot.
//! - `read_fragment_file` is the shared disk read used at startup and on
//!   reload triggers.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Vertex stage shared by every program the viewer links. Forwards the quad
/// corners and texture coordinates; `mvp` stays identity in this tool but the
/// uniform is part of the program contract.
pub const BUILTIN_VERTEX: &str = r#"#version 330 core

in vec2 position;
in vec2 texcoord;

uniform mat4 mvp;

out vec2 v_texcoord;

void main() {
    v_texcoord = texcoord;
    gl_Position = mvp * vec4(position, 0.0, 1.0);
}
"#;

/// Fragment stage used when no `--fragment` file is supplied: a plain
/// passthrough of the base image. Also what `shaderpad defaults fragment`
/// prints as an editing starting point.
pub const BUILTIN_FRAGMENT: &str = r#"#version 330 core

in vec2 v_texcoord;

uniform sampler2D image;

out vec4 frag_color;

void main() {
    frag_color = texture(image, v_texcoord);
}
"#;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read fragment source {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The two shader stages the renderer compiles, with the fragment stage held
/// twice: the original captured at construction and the live slot the next
/// recompile will use.
#[derive(Debug, Clone)]
pub struct SourceSet {
    vertex: String,
    fragment_original: String,
    fragment_live: String,
}

impl SourceSet {
    /// Bundled vertex + fragment pair.
    pub fn builtin() -> Self {
        Self::with_fragment(BUILTIN_FRAGMENT)
    }

    /// Bundled vertex stage with the given fragment as both original and
    /// live slot.
    pub fn with_fragment(fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        Self {
            vertex: BUILTIN_VERTEX.to_string(),
            fragment_original: fragment.clone(),
            fragment_live: fragment,
        }
    }

    /// Reads the fragment stage from disk; the file's content becomes both
    /// the original and the live slot.
    pub fn from_fragment_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let fragment = read_fragment_file(path.as_ref())?;
        Ok(Self::with_fragment(fragment))
    }

    pub fn vertex(&self) -> &str {
        &self.vertex
    }

    /// The live fragment slot, i.e. what the next recompile uses.
    pub fn fragment(&self) -> &str {
        &self.fragment_live
    }

    pub fn original_fragment(&self) -> &str {
        &self.fragment_original
    }

    /// Replaces the live slot, leaving the original untouched.
    pub fn set_fragment(&mut self, source: String) {
        self.fragment_live = source;
    }

    /// Copies the original fragment over the live slot.
    pub fn reset_fragment(&mut self) {
        self.fragment_live = self.fragment_original.clone();
    }
}

impl Default for SourceSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Reads a fragment source file, attaching the path to any I/O failure.
pub fn read_fragment_file(path: &Path) -> Result<String, SourceError> {
    fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_slots_are_populated() {
        let set = SourceSet::builtin();
        assert!(set.vertex().contains("gl_Position"));
        assert!(set.fragment().contains("texture(image"));
        assert_eq!(set.fragment(), set.original_fragment());
    }

    #[test]
    fn set_fragment_leaves_original_untouched() {
        let mut set = SourceSet::with_fragment("original");
        set.set_fragment("edited".to_string());
        assert_eq!(set.fragment(), "edited");
        assert_eq!(set.original_fragment(), "original");
    }

    #[test]
    fn reset_restores_original_fragment() {
        let mut set = SourceSet::with_fragment("original");
        set.set_fragment("edited".to_string());
        set.reset_fragment();
        assert_eq!(set.fragment(), "original");
    }

    #[test]
    fn from_fragment_file_fills_both_slots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("live.frag");
        fs::write(&path, "void main() {}").unwrap();

        let set = SourceSet::from_fragment_file(&path).expect("load fragment");
        assert_eq!(set.fragment(), "void main() {}");
        assert_eq!(set.original_fragment(), "void main() {}");
        assert_eq!(set.vertex(), BUILTIN_VERTEX);
    }

    #[test]
    fn missing_fragment_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.frag");

        let err = SourceSet::from_fragment_file(&path).unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
        assert!(err.to_string().contains("absent.frag"));
    }
}
