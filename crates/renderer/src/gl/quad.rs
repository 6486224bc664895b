//! The screen-filling quad: two static buffers, one strip draw.

use glow::HasContext;

use crate::error::RenderError;

/// Corner positions spanning clip space, triangle-strip order.
const POSITIONS: [f32; 8] = [-1.0, -1.0, -1.0, 1.0, 1.0, -1.0, 1.0, 1.0];
/// Texture coordinates for the same corners, same order.
const TEXCOORDS: [f32; 8] = [0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0];

const VERTEX_COUNT: i32 = 4;
const COMPONENTS_PER_VERTEX: i32 = 2;

/// Immutable for the process lifetime. `draw` resolves nothing itself: it
/// binds whichever attribute locations the caller hands it, so it only makes
/// sense after [`crate::ShaderProgram::activate`].
#[derive(Debug)]
pub struct Quad {
    positions: glow::NativeBuffer,
    texcoords: glow::NativeBuffer,
}

impl Quad {
    pub fn create(gl: &glow::Context) -> Result<Self, RenderError> {
        let positions = upload_static(gl, &POSITIONS)?;
        let texcoords = match upload_static(gl, &TEXCOORDS) {
            Ok(buffer) => buffer,
            Err(err) => {
                unsafe { gl.delete_buffer(positions) };
                return Err(err);
            }
        };
        Ok(Self {
            positions,
            texcoords,
        })
    }

    /// Issues the 4-vertex strip. Attributes the active program does not
    /// declare (location `None`) are skipped, and every attribute array
    /// enabled here is disabled again before returning.
    pub fn draw(&self, gl: &glow::Context, position: Option<u32>, texcoord: Option<u32>) {
        unsafe {
            if let Some(location) = position {
                gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.positions));
                gl.enable_vertex_attrib_array(location);
                gl.vertex_attrib_pointer_f32(
                    location,
                    COMPONENTS_PER_VERTEX,
                    glow::FLOAT,
                    false,
                    0,
                    0,
                );
            }
            if let Some(location) = texcoord {
                gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.texcoords));
                gl.enable_vertex_attrib_array(location);
                gl.vertex_attrib_pointer_f32(
                    location,
                    COMPONENTS_PER_VERTEX,
                    glow::FLOAT,
                    false,
                    0,
                    0,
                );
            }

            gl.draw_arrays(glow::TRIANGLE_STRIP, 0, VERTEX_COUNT);

            if let Some(location) = position {
                gl.disable_vertex_attrib_array(location);
            }
            if let Some(location) = texcoord {
                gl.disable_vertex_attrib_array(location);
            }
        }
    }
}

fn upload_static(gl: &glow::Context, data: &[f32]) -> Result<glow::NativeBuffer, RenderError> {
    let buffer = unsafe { gl.create_buffer() }
        .map_err(|detail| RenderError::resource("vertex buffer", detail))?;
    unsafe {
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(data),
            glow::STATIC_DRAW,
        );
        gl.bind_buffer(glow::ARRAY_BUFFER, None);
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners(data: &[f32; 8]) -> Vec<(f32, f32)> {
        data.chunks(2).map(|pair| (pair[0], pair[1])).collect()
    }

    #[test]
    fn positions_cover_clip_space_corners() {
        let corners = corners(&POSITIONS);
        assert_eq!(corners.len(), VERTEX_COUNT as usize);
        for expected in [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
            assert!(corners.contains(&expected), "missing corner {expected:?}");
        }
    }

    #[test]
    fn texcoords_cover_unit_square_in_matching_order() {
        let positions = corners(&POSITIONS);
        let texcoords = corners(&TEXCOORDS);
        for (position, texcoord) in positions.iter().zip(&texcoords) {
            // Each corner's texcoord is its position remapped from [-1, 1]
            // to [0, 1]; this pins the buffer orders to each other.
            assert_eq!(texcoord.0, (position.0 + 1.0) / 2.0);
            assert_eq!(texcoord.1, (position.1 + 1.0) / 2.0);
        }
    }
}
