//! Interactive session command.
//!
//! Reads one command per line (from stdin or a script file) and drives a
//! [`Session`]: load a sprite, pick a swatch, pick a new colour, apply,
//! undo, save.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Config;
use crate::error::{SwapError, Result};
use crate::output::{describe_stats, display_path, plural, Printer};
use crate::raster::load_image;
use crate::session::{Board, Session};
use crate::types::{Colour, ToleranceConfig};

/// Edit a sprite interactively, one command per line
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Image to load on start
    pub image: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Starting match distance, 0-100
    #[arg(long, short)]
    pub threshold: Option<i32>,

    /// Recolor near-black and near-white pixels too
    #[arg(long)]
    pub no_preserve_bw: bool,
}

const HELP: &str = "\
commands:
  load PATH              load a sprite (clears undo history)
  palette                show original and edited swatches
  select [edited] N      select swatch N (1-based)
  new COLOUR             set the new colour and apply it
  apply                  apply the current swap again
  undo                   revert the last swap
  threshold N            set match distance (0-100)
  preserve on|off        protect near-black and near-white pixels
  save PATH [SCALE]      write the edited sprite
  status                 show the current selection
  quit                   leave the session";

/// One parsed session command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(PathBuf),
    Palette,
    Select(Board, usize),
    New(Colour),
    Apply,
    Undo,
    Threshold(i32),
    Preserve(bool),
    Save(PathBuf, u32),
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse a command line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "load" | "open" => Self::Load(require_path(word, rest)?),
            "palette" | "swatches" => Self::Palette,
            "select" => parse_select(rest)?,
            "new" | "to" => Self::New(rest.parse()?),
            "apply" => Self::Apply,
            "undo" => Self::Undo,
            "threshold" => Self::Threshold(parse_number(word, rest)?),
            "preserve" => Self::Preserve(parse_switch(rest)?),
            "save" => {
                let (path, scale) = match rest.rsplit_once(char::is_whitespace) {
                    Some((p, s)) if s.parse::<u32>().is_ok() => (p.trim(), parse_number(word, s)?),
                    _ => (rest, 1),
                };
                Self::Save(require_path(word, path)?, scale)
            }
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(SwapError::Parse {
                    message: format!("Unknown command: {}", other),
                    help: Some("Type `help` for the list of commands".to_string()),
                })
            }
        };

        Ok(Some(command))
    }
}

fn require_path(word: &str, rest: &str) -> Result<PathBuf> {
    if rest.is_empty() {
        return Err(SwapError::Parse {
            message: format!("{} needs a file path", word),
            help: None,
        });
    }
    Ok(PathBuf::from(rest))
}

fn parse_number<T: std::str::FromStr>(word: &str, s: &str) -> Result<T> {
    s.trim().parse().map_err(|_| SwapError::Parse {
        message: format!("{} expects a number, got '{}'", word, s.trim()),
        help: None,
    })
}

fn parse_switch(s: &str) -> Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(SwapError::Parse {
            message: format!("Expected on or off, got '{}'", s),
            help: None,
        }),
    }
}

fn parse_select(rest: &str) -> Result<Command> {
    let (board, index) = match rest.split_once(char::is_whitespace) {
        Some((b, n)) => {
            let board = match b.to_ascii_lowercase().as_str() {
                "edited" | "latest" => Board::Edited,
                "original" => Board::Original,
                other => {
                    return Err(SwapError::Parse {
                        message: format!("Unknown palette '{}'", other),
                        help: Some("Use `select N` or `select edited N`".to_string()),
                    })
                }
            };
            (board, n)
        }
        None => (Board::Original, rest),
    };

    let n: usize = parse_number("select", index)?;
    if n == 0 {
        return Err(SwapError::Parse {
            message: "Swatch numbers start at 1".to_string(),
            help: None,
        });
    }
    Ok(Command::Select(board, n - 1))
}

pub fn run(args: SessionArgs, config: &Config, printer: &Printer) -> Result<()> {
    let preserve = if args.no_preserve_bw { Some(false) } else { None };
    let tolerance = config.tolerance(args.threshold, preserve)?;
    let mut session = Session::new(tolerance, config.palette_options());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(image) = &args.image {
        execute(&mut session, Command::Load(image.clone()), &mut out, printer)?;
    }

    match &args.script {
        Some(script) => {
            let file = File::open(script).map_err(|e| SwapError::Io {
                path: script.clone(),
                message: format!("Failed to open script: {}", e),
            })?;
            drive(&mut session, BufReader::new(file), &mut out, printer)
        }
        None => {
            printer.info("Ready", "type `help` for commands");
            drive(&mut session, io::stdin().lock(), &mut out, printer)
        }
    }
}

/// Run every command from `input` against `session`.
///
/// Command errors are reported and the loop continues; only output write
/// failures end the session early.
pub fn drive<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    printer: &Printer,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                printer.error("Error", &e.to_string());
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        if let Err(e) = execute(session, command, out, printer) {
            if matches!(e, SwapError::IoError(_)) {
                return Err(e);
            }
            printer.error("Error", &e.to_string());
        }
    }

    Ok(())
}

/// Apply one command to the session.
pub fn execute<W: Write>(
    session: &mut Session,
    command: Command,
    out: &mut W,
    printer: &Printer,
) -> Result<()> {
    match command {
        Command::Load(path) => {
            let buffer = load_image(&path)?;
            let (w, h) = buffer.dimensions();
            let palette = session.load(buffer);
            printer.status("Loaded", &format!("{} ({}x{})", display_path(&path), w, h));
            if palette.overflowed {
                printer.warning(
                    "Warning",
                    &format!(
                        "{} in image, palette shows the most frequent",
                        plural(palette.distinct, "colour", "colours")
                    ),
                );
            }
            write_boards(session, out, printer)?;
        }
        Command::Palette => write_boards(session, out, printer)?,
        Command::Select(board, index) => {
            session.select(board, index)?;
            writeln!(out, "{}", session.status_line())?;
        }
        Command::New(colour) => {
            if session.selection().is_none() {
                return Err(SwapError::Session {
                    message: "Please select a color to change on the sprite".to_string(),
                    help: Some("Use `select N` first".to_string()),
                });
            }
            session.set_new_colour(colour);
            apply(session, out, printer)?;
        }
        Command::Apply => apply(session, out, printer)?,
        Command::Undo => {
            if session.undo() {
                printer.status("Undone", &plural(session.undo_depth(), "step left", "steps left"));
                write_boards(session, out, printer)?;
                writeln!(out, "{}", session.status_line())?;
            } else {
                printer.warning("Undo", "Nothing to undo.");
            }
        }
        Command::Threshold(threshold) => {
            let preserve_bw = session.tolerance().preserve_bw;
            session.set_tolerance(ToleranceConfig::new(threshold, preserve_bw)?);
            printer.info("Threshold", &threshold.to_string());
        }
        Command::Preserve(preserve_bw) => {
            let threshold = session.tolerance().threshold;
            session.set_tolerance(ToleranceConfig::new(threshold, preserve_bw)?);
            printer.info("Preserve", if preserve_bw { "on" } else { "off" });
        }
        Command::Save(path, scale) => {
            session.save(&path, scale)?;
            printer.status("Saved", &format!("sprite to {}", display_path(&path)));
        }
        Command::Status => writeln!(out, "{}", session.status_line())?,
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => {}
    }

    Ok(())
}

fn apply<W: Write>(session: &mut Session, out: &mut W, printer: &Printer) -> Result<()> {
    let stats = session.apply()?;
    if let (Some(selection), Some(new)) = (session.selection(), session.new_colour()) {
        printer.status(
            "Swapped",
            &format!("{} -> {} ({})", selection.colour, new, describe_stats(&stats)),
        );
    }
    write_boards(session, out, printer)
}

fn write_boards<W: Write>(session: &Session, out: &mut W, printer: &Printer) -> Result<()> {
    if !session.is_loaded() {
        return Err(SwapError::Session {
            message: "No image loaded".to_string(),
            help: Some("Use `load PATH` first".to_string()),
        });
    }
    writeln!(out, "original: {}", printer.swatch_row(session.swatches(Board::Original)))?;
    writeln!(out, "edited:   {}", printer.swatch_row(session.swatches(Board::Edited)))?;
    Ok(())
}

/// Run a script file against a fresh session built from `config`.
pub fn run_script(script: &Path, config: &Config, out: &mut impl Write) -> Result<Session> {
    let tolerance = config.tolerance(None, None)?;
    let mut session = Session::new(tolerance, config.palette_options());
    let file = File::open(script).map_err(|e| SwapError::Io {
        path: script.to_path_buf(),
        message: format!("Failed to open script: {}", e),
    })?;
    drive(&mut session, BufReader::new(file), out, &Printer::plain().quiet(true))?;
    Ok(session)
}
