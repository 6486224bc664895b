mod cli;
mod defaults;
mod run;

use anyhow::Result;
use cli::Command;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    match cli.command {
        Some(Command::Defaults(defaults_cmd)) => {
            defaults::run(defaults_cmd.stage);
            Ok(())
        }
        None => run::run(cli.run),
    }
}
