//! Shell completions generation.

use std::io::Write;

use clap::Args;
use clap::CommandFactory;
use clap_complete::Shell;

use crate::error::Result;

const BIN_NAME: &str = "spriteswap";

/// Generate shell completions
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    write_completions(args.shell, &mut std::io::stdout());
    Ok(())
}

/// Write the completion script for `shell` to `out`.
pub fn write_completions<W: Write>(shell: Shell, out: &mut W) {
    let mut cmd = super::Cli::command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completions_cover_subcommands() {
        let mut out = Vec::new();
        write_completions(Shell::Bash, &mut out);
        let script = String::from_utf8(out).unwrap();

        assert!(script.contains("_spriteswap()"));
        for sub in ["recolor", "palette", "session", "init", "completions"] {
            assert!(script.contains(sub), "missing {}", sub);
        }
        assert!(script.contains("--no-preserve-bw"));
    }

    #[test]
    fn test_fish_completions() {
        let mut out = Vec::new();
        write_completions(Shell::Fish, &mut out);

        assert!(String::from_utf8(out).unwrap().contains("complete -c spriteswap"));
    }
}
