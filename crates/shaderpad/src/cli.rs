use std::path::PathBuf;

use clap::{Parser, Subcommand};
use renderer::DEFAULT_IMAGE;

#[derive(Parser, Debug)]
#[command(
    name = "shaderpad",
    author,
    version,
    about = "Live fragment-shader viewer for images",
    arg_required_else_help = false
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Image drawn through the fragment shader.
    #[arg(value_name = "IMAGE", default_value = DEFAULT_IMAGE)]
    pub image: PathBuf,

    /// Fragment source file to load and watch. Seed one with
    /// `shaderpad defaults fragment`; omitted, the built-in passthrough runs.
    #[arg(long, value_name = "FILE")]
    pub fragment: Option<PathBuf>,

    /// Initial window size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Disable the fragment file watcher (R still reloads manually).
    #[arg(long)]
    pub no_watch: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the built-in shader sources, for seeding an editable file.
    Defaults(DefaultsCommand),
}

#[derive(Parser, Debug)]
pub struct DefaultsCommand {
    #[command(subcommand)]
    pub stage: DefaultsStage,
}

#[derive(Subcommand, Debug)]
pub enum DefaultsStage {
    /// Print the fixed vertex stage.
    Vertex,
    /// Print the passthrough fragment stage.
    Fragment,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected WIDTHxHEIGHT".to_string())?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid width".to_string())?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid height".to_string())?;
    if width == 0 || height == 0 {
        return Err("size dimensions must be greater than zero".into());
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_size_variants() {
        assert_eq!(parse_size("1280x720").unwrap(), (1280, 720));
        assert_eq!(parse_size(" 640X480 ").unwrap(), (640, 480));
        assert!(parse_size("1280").is_err());
        assert!(parse_size("0x720").is_err());
    }
}
