//! Terminal output formatting for the spriteswap CLI.
//!
//! Status lines follow Cargo's layout: a right-aligned coloured verb, then
//! the message. They go to stderr; stdout carries palette listings and
//! other machine-readable output.

use std::io::{self, IsTerminal, Write};

use crate::recolor::RecolorStats;
use crate::types::Colour;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Colour is enabled when stderr is a terminal. `quiet` drops status and
/// info lines but keeps warnings and errors.
pub struct Printer {
    color: bool,
    quiet: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
            quiet: false,
        }
    }

    /// Printer that never emits escape codes.
    pub fn plain() -> Self {
        Self {
            color: false,
            quiet: false,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// e.g. "   Recolored hero.png (42 pixels)"
    pub fn status(&self, verb: &str, message: &str) {
        if !self.quiet {
            self.print_line(GREEN, verb, message);
        }
    }

    pub fn info(&self, verb: &str, message: &str) {
        if !self.quiet {
            self.print_line(CYAN, verb, message);
        }
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// A two-cell block painted in `colour` (24-bit background), or the
    /// colour's hex code when styling is off.
    pub fn swatch(&self, colour: Colour) -> String {
        if self.color {
            format!("\x1b[48;2;{};{};{}m  {RESET}", colour.r, colour.g, colour.b)
        } else {
            format!("[{}]", colour)
        }
    }

    /// A numbered row of swatches, e.g. `1 ██ 2 ██ 3 ██`.
    pub fn swatch_row(&self, colours: &[Colour]) -> String {
        colours
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} {}", i + 1, self.swatch(*c)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(
                stderr,
                "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"
            );
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Pluralize a count: `plural(1, "pixel", "pixels")` → "1 pixel".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// One-line summary of a recolor pass.
pub fn describe_stats(stats: &RecolorStats) -> String {
    let mut parts = vec![plural(stats.changed(), "pixel", "pixels")];
    if stats.adjusted > 0 {
        parts.push(format!("{} shaded", stats.adjusted));
    }
    if stats.preserved > 0 {
        parts.push(format!("{} preserved", stats.preserved));
    }
    parts.join(", ")
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &std::path::Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}
