//! Event loop wiring: keyboard triggers, watcher/decoder events, and the
//! per-frame redraw step.
//!
//! Everything that can request a recompile funnels into one pending latch,
//! and the latch is only consumed at the top of a redraw:
//!
//! ```text
//! R key ----------------+
//! Backspace (reset) ----+--> ReloadControl (latch) --+
//! file watcher ---------+                            |
//!                                                    v
//! RedrawRequested --> take latch? recompile --> Scene::draw --> swap
//!        ^                                                        |
//!        +-- AboutToWait: request_redraw (vsync paces the loop) --+
//! ```
//!
//! The decode thread and the watcher run off the main thread and report back
//! through [`UserEvent`]s on the loop's proxy, so all GL work stays on the
//! thread that owns the context.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use sources::SourceSet;
use tracing::{error, info, warn};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder};
use winit::keyboard::{Key, NamedKey};

use crate::context::GlWindow;
use crate::gl::{DecodedImage, Quad, Texture};
use crate::reload::ReloadControl;
use crate::scene::Scene;
use crate::types::RendererConfig;
use crate::watch::SourceWatcher;

/// Events posted to the loop from worker threads.
#[derive(Debug)]
pub enum UserEvent {
    /// The watched fragment file changed on disk.
    FragmentChanged,
    /// The image decode thread finished; pixels are ready for upload.
    ImageDecoded(DecodedImage),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Trigger {
    Reload,
    Reset,
    Quit,
}

fn trigger_for(key: &Key, state: ElementState, repeat: bool) -> Option<Trigger> {
    if state != ElementState::Pressed || repeat {
        return None;
    }
    match key {
        Key::Character(text) if text.eq_ignore_ascii_case("r") => Some(Trigger::Reload),
        Key::Character(text) if text.eq_ignore_ascii_case("q") => Some(Trigger::Quit),
        Key::Named(NamedKey::Backspace) => Some(Trigger::Reset),
        Key::Named(NamedKey::Escape) => Some(Trigger::Quit),
        _ => None,
    }
}

/// Everything the event-loop closure owns. Holding the watcher here keeps it
/// alive for the lifetime of the loop.
struct LoopState {
    gl_window: GlWindow,
    scene: Scene,
    sources: SourceSet,
    control: ReloadControl,
    fragment: Option<PathBuf>,
    _watcher: Option<SourceWatcher>,
}

impl LoopState {
    /// One frame: consume the reload latch if set, then draw and present.
    fn redraw(&mut self) {
        if self.control.take() {
            self.scene.recompile(self.gl_window.gl(), &self.sources);
        }
        self.scene.draw(self.gl_window.gl(), self.gl_window.size());
        self.gl_window.swap();
    }

    /// Re-reads the fragment file into the live slot. Read failures keep the
    /// previous live source so a half-saved file cannot wipe the screen.
    fn refresh_live_source(&mut self) {
        let Some(path) = self.fragment.as_ref() else {
            return;
        };
        match sources::read_fragment_file(path) {
            Ok(text) => self.sources.set_fragment(text),
            Err(err) => {
                warn!(error = %err, "could not refresh fragment source; keeping previous")
            }
        }
    }

    fn image_decoded(&mut self, image: &DecodedImage) {
        self.scene.image_decoded(self.gl_window.gl(), image);
    }
}

/// Opens the window, builds the GL resources, and runs the event loop until
/// the user quits. Blocks the calling thread.
pub(crate) fn run(config: RendererConfig, sources: SourceSet) -> Result<()> {
    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event()
        .build()
        .map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let proxy = event_loop.create_proxy();

    let gl_window = GlWindow::new(&event_loop, "shaderpad", config.surface_size)?;

    let texture = match Texture::load(gl_window.gl(), &config.image, proxy.clone()) {
        Ok(texture) => Some(texture),
        Err(err) => {
            error!(
                error = %err,
                image = %config.image.display(),
                "base texture unavailable; draws will be skipped"
            );
            None
        }
    };
    let quad = match Quad::create(gl_window.gl()) {
        Ok(quad) => Some(quad),
        Err(err) => {
            error!(error = %err, "quad buffers unavailable; draws will be skipped");
            None
        }
    };

    let watcher = match config.fragment.as_ref().filter(|_| config.watch) {
        Some(path) => match SourceWatcher::spawn(path, proxy.clone()) {
            Ok(watcher) => {
                info!(fragment = %path.display(), "watching fragment source for edits");
                Some(watcher)
            }
            Err(err) => {
                warn!(error = %err, "fragment watcher unavailable; use R to reload manually");
                None
            }
        },
        None => None,
    };

    let mut state = LoopState {
        gl_window,
        scene: Scene::new(texture, quad),
        sources,
        // Armed so the first frame performs the initial compile.
        control: ReloadControl::armed(),
        fragment: config.fragment,
        _watcher: watcher,
    };

    event_loop
        .run(move |event, elwt| match event {
            Event::UserEvent(UserEvent::FragmentChanged) => {
                state.refresh_live_source();
                state.control.request_reload();
            }
            Event::UserEvent(UserEvent::ImageDecoded(image)) => {
                state.image_decoded(&image);
            }
            Event::WindowEvent { window_id, event }
                if window_id == state.gl_window.window().id() =>
            {
                match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => elwt.exit(),
                    WindowEvent::KeyboardInput { event, .. } => {
                        match trigger_for(&event.logical_key, event.state, event.repeat) {
                            Some(Trigger::Reload) => {
                                info!("reload requested");
                                state.refresh_live_source();
                                state.control.request_reload();
                            }
                            Some(Trigger::Reset) => {
                                info!("reset requested; restoring original fragment source");
                                state.control.request_reset(&mut state.sources);
                            }
                            Some(Trigger::Quit) => elwt.exit(),
                            None => {}
                        }
                    }
                    WindowEvent::Resized(new_size) => state.gl_window.resize(new_size),
                    WindowEvent::RedrawRequested => state.redraw(),
                    _ => {}
                }
            }
            Event::AboutToWait => {
                // One frame per display refresh; vsync paces the redraws.
                state.gl_window.window().request_redraw();
                elwt.set_control_flow(ControlFlow::Wait);
            }
            _ => {}
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::SmolStr;

    #[test]
    fn letter_keys_map_to_triggers_case_insensitively() {
        let reload = Key::Character(SmolStr::new("R"));
        assert_eq!(
            trigger_for(&reload, ElementState::Pressed, false),
            Some(Trigger::Reload)
        );
        let quit = Key::Character(SmolStr::new("q"));
        assert_eq!(
            trigger_for(&quit, ElementState::Pressed, false),
            Some(Trigger::Quit)
        );
    }

    #[test]
    fn named_keys_reset_and_quit() {
        assert_eq!(
            trigger_for(&Key::Named(NamedKey::Backspace), ElementState::Pressed, false),
            Some(Trigger::Reset)
        );
        assert_eq!(
            trigger_for(&Key::Named(NamedKey::Escape), ElementState::Pressed, false),
            Some(Trigger::Quit)
        );
    }

    #[test]
    fn releases_repeats_and_other_keys_are_ignored() {
        let reload = Key::Character(SmolStr::new("r"));
        assert_eq!(trigger_for(&reload, ElementState::Released, false), None);
        assert_eq!(trigger_for(&reload, ElementState::Pressed, true), None);
        assert_eq!(
            trigger_for(&Key::Named(NamedKey::Space), ElementState::Pressed, false),
            None
        );
    }
}
