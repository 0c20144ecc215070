pub mod completions;
pub mod init;
pub mod palette;
pub mod recolor;
pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// spriteswap - Shading-aware colour swapping for pixel-art sprites
#[derive(Parser, Debug)]
#[command(name = "spriteswap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./spriteswap.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Swap a colour in a sprite or a directory of sprites
    Recolor(recolor::RecolorArgs),

    /// List the dominant colours of a sprite
    Palette(palette::PaletteArgs),

    /// Edit a sprite interactively with undo
    Session(session::SessionArgs),

    /// Write a spriteswap.yaml with default settings
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recolor() {
        let cli = Cli::try_parse_from([
            "spriteswap",
            "recolor",
            "hero.png",
            "--from",
            "#FF0000",
            "--to",
            "0,255,0",
            "-t",
            "12",
            "--no-preserve-bw",
        ])
        .unwrap();

        let Commands::Recolor(args) = cli.command else {
            panic!("expected recolor");
        };
        assert_eq!(args.from, Colour::rgb(255, 0, 0));
        assert_eq!(args.to, Colour::rgb(0, 255, 0));
        assert_eq!(args.threshold, Some(12));
        assert!(args.no_preserve_bw);
    }

    #[test]
    fn test_parse_rejects_bad_colour() {
        let result = Cli::try_parse_from([
            "spriteswap", "recolor", "hero.png", "--from", "#GG0000", "--to", "#000",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_preserve_flags_conflict() {
        let result = Cli::try_parse_from([
            "spriteswap",
            "recolor",
            "hero.png",
            "--from",
            "#F00",
            "--to",
            "#0F0",
            "--preserve-bw",
            "--no-preserve-bw",
        ]);
        assert!(result.is_err());
    }
}
