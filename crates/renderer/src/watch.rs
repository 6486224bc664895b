//! Filesystem watch on the fragment source file.
//!
//! Watches the file's parent directory rather than the file itself: editors
//! that save atomically (write to a temp file, then rename over the target)
//! replace the watched inode, and a direct file watch goes quiet after the
//! first save. Directory events are filtered back down to the fragment's
//! file name before anything is forwarded to the event loop.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};
use winit::event_loop::EventLoopProxy;

use crate::window::UserEvent;

/// Keeps the watcher alive for the lifetime of the event loop; dropping it
/// stops change notifications.
pub(crate) struct SourceWatcher {
    _watcher: RecommendedWatcher,
}

impl SourceWatcher {
    pub(crate) fn spawn(fragment: &Path, events: EventLoopProxy<UserEvent>) -> Result<Self> {
        let directory = match fragment.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = fragment
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| anyhow!("fragment path {} has no file name", fragment.display()))?;

        let mut watcher =
            notify::recommended_watcher(move |result: Result<Event, notify::Error>| {
                match result {
                    Ok(event) => {
                        if !matches!(
                            event.kind,
                            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                        ) {
                            return;
                        }
                        if !touches_file(&event.paths, &file_name) {
                            return;
                        }
                        debug!("fragment file changed on disk");
                        if events.send_event(UserEvent::FragmentChanged).is_err() {
                            debug!("event loop gone; dropping file change notification");
                        }
                    }
                    Err(err) => warn!(error = %err, "fragment watcher error"),
                }
            })
            .context("failed to create fragment watcher")?;
        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .with_context(|| format!("failed to watch {}", directory.display()))?;

        Ok(Self { _watcher: watcher })
    }
}

fn touches_file(paths: &[PathBuf], file_name: &OsStr) -> bool {
    paths.iter().any(|path| path.file_name() == Some(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_the_fragment_name_in_any_directory() {
        let paths = [
            PathBuf::from("/tmp/other.frag"),
            PathBuf::from("/home/me/shaders/live.frag"),
        ];
        assert!(touches_file(&paths, OsStr::new("live.frag")));
    }

    #[test]
    fn ignores_sibling_files_like_editor_swap_files() {
        let paths = [
            PathBuf::from("/home/me/shaders/.live.frag.swp"),
            PathBuf::from("/home/me/shaders/live.frag~"),
        ];
        assert!(!touches_file(&paths, OsStr::new("live.frag")));
    }
}
