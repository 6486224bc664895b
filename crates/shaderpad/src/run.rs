use anyhow::Result;
use renderer::{Renderer, RendererConfig, DEFAULT_SURFACE_SIZE};
use sources::SourceSet;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::RunArgs;

pub fn run(args: RunArgs) -> Result<()> {
    // Read shader sources before any window exists so a bad path fails with
    // a readable error instead of a blank window.
    let sources = match args.fragment.as_ref() {
        Some(path) => {
            let set = SourceSet::from_fragment_file(path)?;
            info!(fragment = %path.display(), "loaded fragment source");
            set
        }
        None => {
            info!("no fragment file given; using the built-in passthrough");
            SourceSet::builtin()
        }
    };

    let config = RendererConfig {
        image: args.image.clone(),
        fragment: args.fragment.clone(),
        surface_size: args.size.unwrap_or(DEFAULT_SURFACE_SIZE),
        watch: !args.no_watch,
    };
    debug!(
        image = %config.image.display(),
        size = ?config.surface_size,
        watch = config.watch,
        "starting renderer"
    );

    Renderer::new(config, sources).run()
}

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
