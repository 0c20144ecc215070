use std::path::Path;

use clap::Parser;
use miette::Result;
use spriteswap::cli::{Cli, Commands};
use spriteswap::output::Printer;
use spriteswap::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().quiet(cli.quiet);

    match cli.command {
        Commands::Init(args) => spriteswap::cli::init::run(args, &printer)?,
        Commands::Completions(args) => spriteswap::cli::completions::run(args)?,
        command => {
            let config = Config::discover(cli.config.as_deref(), Path::new("."))?;
            match command {
                Commands::Recolor(args) => spriteswap::cli::recolor::run(args, &config, &printer)?,
                Commands::Palette(args) => spriteswap::cli::palette::run(args, &config, &printer)?,
                Commands::Session(args) => spriteswap::cli::session::run(args, &config, &printer)?,
                Commands::Init(_) | Commands::Completions(_) => {}
            }
        }
    }

    Ok(())
}
