//! Recolor command implementation.
//!
//! Swaps one colour for another in a sprite, or in every sprite under a
//! directory, and writes the results.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Config;
use crate::error::Result;
use crate::output::{describe_stats, display_path, plural, Printer};
use crate::raster::{collect_images, load_image, save_image};
use crate::recolor::{recolor, RecolorStats};
use crate::types::{Colour, ToleranceConfig};

const RECOLORED_SUFFIX: &str = ".recolored";

/// Swap a colour in a sprite (or a directory of sprites)
#[derive(Args, Debug)]
pub struct RecolorArgs {
    /// Image file or directory of images
    #[arg(required = true)]
    pub input: PathBuf,

    /// Colour to replace (#RRGGBB, r,g,b or hsl(h, s%, l%))
    #[arg(long)]
    pub from: Colour,

    /// Replacement colour
    #[arg(long)]
    pub to: Colour,

    /// Match distance, 0-100 (default from config, else 30)
    #[arg(long, short)]
    pub threshold: Option<i32>,

    /// Keep near-black and near-white pixels untouched
    #[arg(long)]
    pub preserve_bw: bool,

    /// Recolor near-black and near-white pixels too
    #[arg(long, conflicts_with = "preserve_bw")]
    pub no_preserve_bw: bool,

    /// Output file (single input) or directory (directory input)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Integer upscale applied to the written image
    #[arg(long)]
    pub scale: Option<u32>,
}

impl RecolorArgs {
    fn preserve_override(&self) -> Option<bool> {
        if self.preserve_bw {
            Some(true)
        } else if self.no_preserve_bw {
            Some(false)
        } else {
            None
        }
    }
}

pub fn run(args: RecolorArgs, config: &Config, printer: &Printer) -> Result<()> {
    let tolerance = config.tolerance(args.threshold, args.preserve_override())?;
    let scale = args.scale.unwrap_or_else(|| config.effective_scale()).max(1);

    let output = args.output.clone().or_else(|| config.output.clone());

    let mut files = collect_images(&args.input)?;
    if args.input.is_dir() {
        files.retain(|f| !is_previous_output(f, output.as_deref()));
    }
    if files.is_empty() {
        printer.warning(
            "Warning",
            &format!("no images found in {}", display_path(&args.input)),
        );
        return Ok(());
    }

    let mut total = RecolorStats::default();

    for file in &files {
        let target = output_path(&args.input, file, output.as_deref());
        let stats = recolor_file(file, &target, args.from, args.to, &tolerance, scale)?;
        printer.status(
            "Recolored",
            &format!(
                "{} -> {} ({})",
                display_path(file),
                display_path(&target),
                describe_stats(&stats)
            ),
        );
        total += stats;
    }

    printer.status(
        "Finished",
        &format!(
            "{} {} -> {} in {}",
            describe_stats(&total),
            args.from,
            args.to,
            plural(files.len(), "file", "files")
        ),
    );

    Ok(())
}

/// Load, recolor and save a single image.
pub fn recolor_file(
    input: &Path,
    output: &Path,
    from: Colour,
    to: Colour,
    tolerance: &ToleranceConfig,
    scale: u32,
) -> Result<RecolorStats> {
    let mut buffer = load_image(input)?;
    let stats = recolor(&mut buffer, from, to, tolerance);
    save_image(&buffer, output, scale)?;
    Ok(stats)
}

/// Where the recolored copy of `file` is written.
///
/// With no output given, the copy lands next to the source as
/// `<stem>.recolored.<ext>`. For directory input, `output` is a directory
/// mirroring the input layout; for file input it is the output file.
fn output_path(input: &Path, file: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(out) if input.is_dir() => {
            let relative = file.strip_prefix(input).unwrap_or(file);
            out.join(relative)
        }
        Some(out) if out.is_dir() => match file.file_name() {
            Some(name) => out.join(name),
            None => out.to_path_buf(),
        },
        Some(out) => out.to_path_buf(),
        None => sibling_path(file),
    }
}

/// Whether a scanned file was written by an earlier recolor run: a
/// `<stem>.recolored.<ext>` sibling, or anything under the output directory.
fn is_previous_output(file: &Path, output: Option<&Path>) -> bool {
    if output.is_some_and(|out| file.starts_with(out)) {
        return true;
    }
    file.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(RECOLORED_SUFFIX))
}

fn sibling_path(file: &Path) -> PathBuf {
    let stem = file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sprite");
    let ext = file
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");
    file.with_file_name(format!("{}{}.{}", stem, RECOLORED_SUFFIX, ext))
}
