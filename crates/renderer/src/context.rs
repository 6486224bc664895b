//! Window and GL context bootstrap: winit window, glutin display/context/
//! surface, loaded `glow` function table.
//!
//! Bootstrap failures here are fatal to startup and propagate as
//! `anyhow::Error`; after construction the rest of the crate only sees the
//! `glow::Context` and the stored surface dimensions.

use std::ffi::CString;
use std::num::NonZeroU32;

use anyhow::{anyhow, Context as _, Result};
use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasRawWindowHandle;
use tracing::{debug, warn};
use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

/// Owns the window, the current GL context/surface, the loaded function
/// table, and the stored viewport dimensions the draw step reads.
pub(crate) struct GlWindow {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    gl: glow::Context,
    window: Window,
    size: (u32, u32),
}

impl GlWindow {
    pub(crate) fn new<T: 'static>(
        event_loop: &EventLoop<T>,
        title: &str,
        size: (u32, u32),
    ) -> Result<Self> {
        let window_builder = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(size.0, size.1));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                // No multisampling needed for a textured quad; prefer the
                // leanest config offered.
                configs
                    .reduce(|best, candidate| {
                        if candidate.num_samples() < best.num_samples() {
                            candidate
                        } else {
                            best
                        }
                    })
                    .expect("display offered no GL configs")
            })
            .map_err(|err| anyhow!("failed to create window and GL display: {err}"))?;
        let window = window.ok_or_else(|| anyhow!("display builder returned no window"))?;

        let raw_window_handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(raw_window_handle));
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .context("failed to create GL context")?;

        let inner = window.inner_size();
        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(inner.width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(inner.height).unwrap_or(NonZeroU32::MIN),
        );
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .context("failed to create GL surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        if let Err(err) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
            warn!(error = %err, "vsync unavailable; continuing without");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|symbol| match CString::new(symbol) {
                Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()),
                Err(_) => std::ptr::null(),
            })
        };

        unsafe {
            // Fixed clear color for the process lifetime; frames only clear.
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            // Core profile requires a bound vertex array for attribute
            // pointers; a single one serves the whole process.
            let vao = gl
                .create_vertex_array()
                .map_err(|detail| anyhow!("failed to create vertex array: {detail}"))?;
            gl.bind_vertex_array(Some(vao));
        }

        let version = unsafe { gl.get_parameter_string(glow::VERSION) };
        let renderer = unsafe { gl.get_parameter_string(glow::RENDERER) };
        debug!(%version, %renderer, "GL context ready");

        Ok(Self {
            surface,
            context,
            gl,
            window,
            size: (inner.width, inner.height),
        })
    }

    pub(crate) fn gl(&self) -> &glow::Context {
        &self.gl
    }

    pub(crate) fn window(&self) -> &Window {
        &self.window
    }

    /// Dimensions the draw step uses for the viewport.
    pub(crate) fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Resizes the GL surface and updates the stored dimensions. Zero-sized
    /// updates (minimized window) are ignored.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let (Some(width), Some(height)) = (
            NonZeroU32::new(new_size.width),
            NonZeroU32::new(new_size.height),
        ) else {
            return;
        };
        self.surface.resize(&self.context, width, height);
        self.size = (new_size.width, new_size.height);
    }

    /// Presents the frame. Swap failures drop the frame and keep running.
    pub(crate) fn swap(&self) {
        if let Err(err) = self.surface.swap_buffers(&self.context) {
            warn!(error = %err, "swap_buffers failed; frame dropped");
        }
    }
}
