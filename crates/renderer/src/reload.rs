//! The reload state machine: one pending latch between triggers and ticks.

use sources::SourceSet;

/// Pending-reload latch. Triggers raise it; the frame tick consumes it once
/// per frame, so overlapping triggers collapse into a single recompile.
#[derive(Debug)]
pub(crate) struct ReloadControl {
    pending: bool,
}

impl ReloadControl {
    /// Starts raised, so the first tick performs the initial compile through
    /// the same path as every later reload.
    pub(crate) fn armed() -> Self {
        Self { pending: true }
    }

    /// The next tick recompiles from the live source.
    pub(crate) fn request_reload(&mut self) {
        self.pending = true;
    }

    /// Copies the stored original fragment over the live slot, then raises
    /// the latch.
    pub(crate) fn request_reset(&mut self, sources: &mut SourceSet) {
        sources.reset_fragment();
        self.pending = true;
    }

    /// Consumes the latch; it is clear afterwards regardless of what the
    /// caller does with the answer.
    pub(crate) fn take(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_armed_for_the_initial_compile() {
        let mut control = ReloadControl::armed();
        assert!(control.take());
        assert!(!control.take());
    }

    #[test]
    fn repeated_requests_collapse_into_one() {
        let mut control = ReloadControl::armed();
        control.take();

        control.request_reload();
        control.request_reload();
        assert!(control.take());
        assert!(!control.take());
    }

    #[test]
    fn reset_restores_original_source_and_arms() {
        let mut control = ReloadControl::armed();
        control.take();

        let mut sources = SourceSet::with_fragment("original");
        sources.set_fragment("edited".to_string());

        control.request_reset(&mut sources);
        assert_eq!(sources.fragment(), "original");
        assert!(control.take());
    }
}
