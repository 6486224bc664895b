//! The base-image texture behind a write-once ready gate.
//!
//! The GPU object is created up front; pixels arrive later from a one-shot
//! decode thread via the event loop. Until then `ready` is false, the draw
//! step skips the frame body, and a stray `bind` is a logged no-op. There is
//! no timeout: if the decode never completes, the viewer keeps clearing
//! frames forever.

use std::path::{Path, PathBuf};
use std::thread;

use glow::HasContext;
use image::imageops::flip_vertical_in_place;
use tracing::{debug, error, trace};
use winit::event_loop::EventLoopProxy;

use crate::error::RenderError;
use crate::window::UserEvent;

/// RGBA pixels handed from the decode thread to the event loop.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// 2D texture whose sampling is gated on `ready`; the gate flips exactly
/// once, when the decoded payload is uploaded.
#[derive(Debug)]
pub struct Texture {
    texture: glow::NativeTexture,
    ready: bool,
}

impl Texture {
    /// Creates the GPU object and spawns the decode thread; returns
    /// immediately in the not-ready state.
    pub fn load(
        gl: &glow::Context,
        path: &Path,
        events: EventLoopProxy<UserEvent>,
    ) -> Result<Self, RenderError> {
        let texture = unsafe { gl.create_texture() }
            .map_err(|detail| RenderError::resource("texture object", detail))?;

        spawn_decode(path.to_path_buf(), events)?;

        Ok(Self {
            texture,
            ready: false,
        })
    }

    pub fn ready(&self) -> bool {
        self.ready
    }

    /// Uploads the decoded pixels (nearest filtering, clamped on both axes)
    /// and marks the texture ready. Only the first payload counts.
    pub fn upload(&mut self, gl: &glow::Context, image: &DecodedImage) {
        if self.ready {
            debug!("duplicate image payload ignored; texture already ready");
            return;
        }

        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                image.width as i32,
                image.height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(&image.pixels),
            );
            gl.bind_texture(glow::TEXTURE_2D, None);
        }

        self.ready = true;
        debug!(
            width = image.width,
            height = image.height,
            "base texture uploaded"
        );
    }

    /// Binds to the given unit when ready; otherwise a no-op with a trace
    /// diagnostic. Callers normally skip the draw entirely before reaching
    /// this guard.
    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        if !self.ready {
            trace!("texture not ready yet; skipping bind");
            return;
        }
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
        }
    }
}

/// One-shot worker: decode, flip, post the payload back to the loop. A
/// decode failure logs and posts nothing, leaving the texture not-ready for
/// good.
fn spawn_decode(path: PathBuf, events: EventLoopProxy<UserEvent>) -> Result<(), RenderError> {
    thread::Builder::new()
        .name("image-decode".into())
        .spawn(move || match decode_image(&path) {
            Ok(image) => {
                if events.send_event(UserEvent::ImageDecoded(image)).is_err() {
                    debug!("event loop gone before image decode finished");
                }
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "failed to decode base image");
            }
        })
        .map_err(|err| RenderError::resource("image decode thread", err.to_string()))?;
    Ok(())
}

/// Decode plus the upload-convention vertical flip. The flip is part of the
/// texture contract; texture coordinates are not adjusted to compensate.
fn decode_image(path: &Path) -> Result<DecodedImage, image::ImageError> {
    let mut pixels = image::open(path)?.to_rgba8();
    flip_vertical_in_place(&mut pixels);
    let (width, height) = pixels.dimensions();
    Ok(DecodedImage {
        width,
        height,
        pixels: pixels.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_flips_rows_vertically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.png");

        let mut img = image::RgbaImage::new(1, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255])); // top row red
        img.put_pixel(0, 1, image::Rgba([0, 0, 255, 255])); // bottom row blue
        img.save(&path).unwrap();

        let decoded = decode_image(&path).expect("decode test image");
        assert_eq!((decoded.width, decoded.height), (1, 2));
        // After the flip the bottom source row comes first.
        assert_eq!(&decoded.pixels[0..4], &[0, 0, 255, 255]);
        assert_eq!(&decoded.pixels[4..8], &[255, 0, 0, 255]);
    }

    #[test]
    fn decode_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(decode_image(&dir.path().join("absent.png")).is_err());
    }
}
