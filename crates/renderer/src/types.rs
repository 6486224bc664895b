use std::path::PathBuf;

/// Image loaded when the CLI names none.
pub const DEFAULT_IMAGE: &str = "base.png";

/// Window size used when the CLI names none.
pub const DEFAULT_SURFACE_SIZE: (u32, u32) = (800, 600);

/// Runtime configuration handed from the CLI to [`crate::Renderer`].
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Image drawn through the fragment shader.
    pub image: PathBuf,
    /// Fragment source file to watch for edits; `None` runs the built-in
    /// fragment with nothing to watch.
    pub fragment: Option<PathBuf>,
    /// Initial window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Reload automatically when the fragment file changes on disk.
    pub watch: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            image: PathBuf::from(DEFAULT_IMAGE),
            fragment: None,
            surface_size: DEFAULT_SURFACE_SIZE,
            watch: true,
        }
    }
}
