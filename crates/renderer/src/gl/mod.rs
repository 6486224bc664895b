//! GL-facing resource wrappers.
//!
//! Submodule responsibilities:
//!
//! - `program`: stage compilation, linking, and the cached attribute/uniform
//!   locations the draw path uses.
//! - `texture`: the asynchronously decoded base image behind a write-once
//!   ready gate.
//! - `quad`: the two static vertex buffers and the triangle-strip draw.
//!
//! Everything here takes `&glow::Context` per call rather than holding it;
//! the context lives in `crate::context::GlWindow` for the process lifetime.

mod program;
mod quad;
mod texture;

pub use program::ShaderProgram;
pub use quad::Quad;
pub use texture::{DecodedImage, Texture};
