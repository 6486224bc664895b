//! Windowed OpenGL renderer for shaderpad: a single textured quad drawn
//! through a user-editable fragment shader, recompiled on demand.
//!
//! The crate is driven entirely through [`Renderer::run`], which owns the
//! window and GL context for the life of the process:
//!
//! ```text
//!   RendererConfig + SourceSet
//!          │
//!          ▼
//!   Renderer::run ──▶ GlWindow ──▶ winit event loop ──▶ Scene::draw()
//!                                         │
//!     R key / Backspace / file watcher ───┘ arm the reload latch;
//!     the next frame rebuilds the ShaderProgram before drawing
//! ```
//!
//! The image decode runs on its own thread and reports back through a
//! [`UserEvent`]; until its pixels arrive, frames clear to black.
//!
//! Shader compile and link failures are not fatal: the renderer logs the
//! driver's info log, drops the program, and keeps clearing until the next
//! reload succeeds.

mod context;
mod error;
mod gl;
mod reload;
mod scene;
mod types;
mod watch;
mod window;

pub use error::{RenderError, ShaderStage};
pub use gl::{DecodedImage, Quad, ShaderProgram, Texture};
pub use types::{RendererConfig, DEFAULT_IMAGE, DEFAULT_SURFACE_SIZE};
pub use window::UserEvent;

use anyhow::Result;
use sources::SourceSet;

/// Owner of the render loop inputs; constructed by the CLI, consumed by
/// [`Renderer::run`].
pub struct Renderer {
    config: RendererConfig,
    sources: SourceSet,
}

impl Renderer {
    pub fn new(config: RendererConfig, sources: SourceSet) -> Self {
        Self { config, sources }
    }

    /// Opens the window and runs the event loop until the user quits.
    /// Blocks the calling thread.
    pub fn run(self) -> Result<()> {
        window::run(self.config, self.sources)
    }
}
