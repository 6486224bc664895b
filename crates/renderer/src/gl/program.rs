//! Shader program compilation and the locations cached from it.
//!
//! Classic GL lifetime rules apply: each stage is compiled and checked
//! separately so diagnostics name the failing stage, stage objects never
//! survive a failed path, and once a link attempt has been made the stage
//! objects are detached and deleted whether or not it succeeded. A failed
//! link also deletes the program object before the error is surfaced, so a
//! `ShaderProgram` is either fully linked and usable or never exists.
//!
//! Attribute and uniform locations the compiler optimized away are held as
//! `None`; the setters accept the call and no-op, which tolerates fragment
//! sources that do not reference every uniform.

use glow::HasContext;
use tracing::debug;

use crate::error::{RenderError, ShaderStage};

/// Attribute names the quad binds, resolved once per link.
const ATTR_POSITION: &str = "position";
const ATTR_TEXCOORD: &str = "texcoord";
/// Uniform names the draw sequence sets each frame.
const UNIFORM_MVP: &str = "mvp";
const UNIFORM_IMAGE: &str = "image";

/// A linked program plus the locations resolved from it.
#[derive(Debug)]
pub struct ShaderProgram {
    program: glow::NativeProgram,
    position: Option<u32>,
    texcoord: Option<u32>,
    mvp: Option<glow::NativeUniformLocation>,
    image: Option<glow::NativeUniformLocation>,
}

impl ShaderProgram {
    /// Compiles both stages and links them. Any intermediate object created
    /// along a failure path is deleted before the error returns.
    pub fn compile(
        gl: &glow::Context,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, RenderError> {
        let vertex = compile_stage(gl, ShaderStage::Vertex, vertex_source)?;
        let fragment = match compile_stage(gl, ShaderStage::Fragment, fragment_source) {
            Ok(shader) => shader,
            Err(err) => {
                unsafe { gl.delete_shader(vertex) };
                return Err(err);
            }
        };

        let program = match unsafe { gl.create_program() } {
            Ok(program) => program,
            Err(detail) => {
                unsafe {
                    gl.delete_shader(vertex);
                    gl.delete_shader(fragment);
                }
                return Err(RenderError::resource("shader program", detail));
            }
        };

        let linked = unsafe {
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);
            let linked = gl.get_program_link_status(program);
            // Linked or not, the stage objects have served their purpose.
            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            linked
        };

        if !linked {
            let log = unsafe { gl.get_program_info_log(program) };
            unsafe { gl.delete_program(program) };
            return Err(RenderError::Link { log });
        }

        let (position, texcoord, mvp, image) = unsafe {
            (
                gl.get_attrib_location(program, ATTR_POSITION),
                gl.get_attrib_location(program, ATTR_TEXCOORD),
                gl.get_uniform_location(program, UNIFORM_MVP),
                gl.get_uniform_location(program, UNIFORM_IMAGE),
            )
        };
        debug!(
            ?position,
            ?texcoord,
            mvp = mvp.is_some(),
            image = image.is_some(),
            "linked shader program"
        );

        Ok(Self {
            program,
            position,
            texcoord,
            mvp,
            image,
        })
    }

    /// Binds this program as the active one.
    pub fn activate(&self, gl: &glow::Context) {
        unsafe { gl.use_program(Some(self.program)) };
    }

    /// Location of the corner-position attribute, if the program declares it.
    pub fn position_location(&self) -> Option<u32> {
        self.position
    }

    /// Location of the texture-coordinate attribute, if declared.
    pub fn texcoord_location(&self) -> Option<u32> {
        self.texcoord
    }

    /// Uploads a column-major 4x4 matrix to `mvp`. Activates the program
    /// first so the update lands here no matter what was bound; no-op when
    /// the shader does not reference the uniform.
    pub fn set_mvp(&self, gl: &glow::Context, matrix: &[f32; 16]) {
        if let Some(location) = &self.mvp {
            self.activate(gl);
            unsafe { gl.uniform_matrix_4_f32_slice(Some(location), false, matrix) };
        }
    }

    /// Points the `image` sampler at a texture unit. Same activation and
    /// absence rules as [`Self::set_mvp`].
    pub fn set_image_unit(&self, gl: &glow::Context, unit: i32) {
        if let Some(location) = &self.image {
            self.activate(gl);
            unsafe { gl.uniform_1_i32(Some(location), unit) };
        }
    }

    /// Releases the GPU handle. Consuming `self` makes use-after-free
    /// unrepresentable.
    pub fn free(self, gl: &glow::Context) {
        unsafe { gl.delete_program(self.program) };
    }
}

fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::NativeShader, RenderError> {
    let shader = unsafe { gl.create_shader(stage_type(stage)) }
        .map_err(|detail| RenderError::resource("shader object", detail))?;

    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(RenderError::Compile { stage, log });
        }
    }

    Ok(shader)
}

fn stage_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_types_map_to_gl_enums() {
        assert_eq!(stage_type(ShaderStage::Vertex), glow::VERTEX_SHADER);
        assert_eq!(stage_type(ShaderStage::Fragment), glow::FRAGMENT_SHADER);
    }

    #[test]
    fn shader_interface_names_match_builtin_sources() {
        // The cached locations are only meaningful if the bundled stages
        // actually declare these names.
        assert!(sources::BUILTIN_VERTEX.contains(ATTR_POSITION));
        assert!(sources::BUILTIN_VERTEX.contains(ATTR_TEXCOORD));
        assert!(sources::BUILTIN_VERTEX.contains(UNIFORM_MVP));
        assert!(sources::BUILTIN_FRAGMENT.contains(UNIFORM_IMAGE));
    }
}
