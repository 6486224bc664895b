//! Per-frame work: consuming a reload and running the draw sequence.

use glow::HasContext;
use sources::SourceSet;
use tracing::{debug, error, info};

use crate::gl::{DecodedImage, Quad, ShaderProgram, Texture};

/// Unit the base texture binds to and the `image` uniform points at.
const BASE_IMAGE_UNIT: u32 = 0;

/// No camera or transform system exists; the quad is always screen-filling.
const IDENTITY_MVP: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// Owns the drawable resources. Every slot is optional: an empty one means
/// its constructor failed or the compile has not succeeded yet, and the draw
/// step degrades to however far it can get.
pub(crate) struct Scene {
    program: Option<ShaderProgram>,
    texture: Option<Texture>,
    quad: Option<Quad>,
}

impl Scene {
    pub(crate) fn new(texture: Option<Texture>, quad: Option<Quad>) -> Self {
        Self {
            program: None,
            texture,
            quad,
        }
    }

    /// Destroys the current program, then compiles from the live source. A
    /// failure leaves no program, pausing rendering at clear-only frames;
    /// nothing retries it until the next trigger.
    pub(crate) fn recompile(&mut self, gl: &glow::Context, sources: &SourceSet) {
        if let Some(old) = self.program.take() {
            old.free(gl);
        }
        match ShaderProgram::compile(gl, sources.vertex(), sources.fragment()) {
            Ok(program) => {
                info!("shader program ready");
                self.program = Some(program);
            }
            Err(err) => {
                error!(error = %err, "shader reload failed; rendering paused until the next edit");
            }
        }
    }

    /// Hands the decoded base image to the texture for its one-time upload.
    pub(crate) fn image_decoded(&mut self, gl: &glow::Context, image: &DecodedImage) {
        match self.texture.as_mut() {
            Some(texture) => texture.upload(gl, image),
            None => debug!("decoded image arrived but no texture exists; dropping payload"),
        }
    }

    /// The per-frame draw sequence: viewport and clear always; texture bind,
    /// program activation, uniforms, and the quad draw only as far as the
    /// resources allow.
    pub(crate) fn draw(&self, gl: &glow::Context, surface_size: (u32, u32)) {
        unsafe {
            gl.viewport(0, 0, surface_size.0 as i32, surface_size.1 as i32);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }

        let Some(texture) = self.texture.as_ref().filter(|texture| texture.ready()) else {
            return;
        };
        texture.bind(gl, BASE_IMAGE_UNIT);

        let (Some(program), Some(quad)) = (self.program.as_ref(), self.quad.as_ref()) else {
            return;
        };

        program.activate(gl);
        program.set_mvp(gl, &IDENTITY_MVP);
        program.set_image_unit(gl, BASE_IMAGE_UNIT as i32);
        quad.draw(
            gl,
            program.position_location(),
            program.texcoord_location(),
        );
    }
}
