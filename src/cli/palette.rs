//! Palette command implementation.
//!
//! Lists the dominant colours of a sprite, most frequent first.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::config::Config;
use crate::error::{SwapError, Result};
use crate::extract::{extract_palette_with, OverflowPolicy, Palette};
use crate::output::{display_path, plural, Printer};
use crate::raster::load_image;

/// List the dominant colours of a sprite
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Image file to extract colours from
    #[arg(required = true)]
    pub file: PathBuf,

    /// Distinct colours allowed before the image counts as overflowing
    #[arg(long)]
    pub max_colors: Option<usize>,

    /// What to list when the image overflows
    #[arg(long, value_enum)]
    pub overflow: Option<OverflowPolicy>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// JSON shape of one palette entry.
#[derive(Debug, Serialize)]
pub struct SwatchJson {
    pub colour: String,
    pub rgba: [u8; 4],
    pub count: usize,
}

pub fn run(args: PaletteArgs, config: &Config, printer: &Printer) -> Result<()> {
    let display = display_path(&args.file);
    let buffer = load_image(&args.file)?;

    let mut options = config.palette_options();
    if let Some(max) = args.max_colors {
        options.max_colors = max.max(1);
    }
    if let Some(overflow) = args.overflow {
        options.overflow = overflow;
    }

    let palette = extract_palette_with(&buffer, &options);

    if palette.overflowed {
        printer.warning(
            "Warning",
            &format!(
                "{} has {}, more than the {} allowed",
                display,
                plural(palette.distinct, "colour", "colours"),
                options.max_colors
            ),
        );
    }
    printer.status(
        "Sampled",
        &format!("{} from {}", plural(palette.len(), "colour", "colours"), display),
    );

    if args.json {
        println!("{}", palette_json(&palette)?);
    } else {
        for line in palette_lines(&palette, printer) {
            println!("{}", line);
        }
    }

    Ok(())
}

/// Pretty JSON array of the palette entries.
pub fn palette_json(palette: &Palette) -> Result<String> {
    let swatches: Vec<SwatchJson> = palette
        .entries
        .iter()
        .map(|e| SwatchJson {
            colour: e.colour.to_string(),
            rgba: e.colour.to_rgba(),
            count: e.frequency,
        })
        .collect();

    serde_json::to_string_pretty(&swatches).map_err(|e| SwapError::Parse {
        message: format!("Failed to serialize palette: {}", e),
        help: None,
    })
}

/// One text line per swatch: index, swatch, hex, count and HSL.
pub fn palette_lines(palette: &Palette, printer: &Printer) -> Vec<String> {
    palette
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let (h, s, l) = entry.colour.to_hsl();
            format!(
                "{:>2} {} {:<9} {:>6}  {}",
                i + 1,
                printer.swatch(entry.colour),
                entry.colour.to_string(),
                entry.frequency,
                printer.dim(&format!("hsl({:.0}, {:.0}%, {:.0}%)", h, s, l))
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_palette;
    use crate::types::{Colour, PixelBuffer};

    fn sample() -> Palette {
        let buf = PixelBuffer::from_rows(vec![vec![
            Colour::rgb(255, 0, 0),
            Colour::rgb(255, 0, 0),
            Colour::new(0, 0, 255, 128),
        ]])
        .unwrap();
        extract_palette(&buf, 16)
    }

    #[test]
    fn test_palette_json() {
        insta::assert_snapshot!(palette_json(&sample()).unwrap(), @r###"
        [
          {
            "colour": "#FF0000",
            "rgba": [
              255,
              0,
              0,
              255
            ],
            "count": 2
          },
          {
            "colour": "#0000FF80",
            "rgba": [
              0,
              0,
              255,
              128
            ],
            "count": 1
          }
        ]
        "###);
    }

    #[test]
    fn test_palette_lines_plain() {
        let lines = palette_lines(&sample(), &Printer::plain());

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], " 1 [#FF0000] #FF0000        2  hsl(0, 100%, 50%)");
        assert!(lines[1].starts_with(" 2 [#0000FF80] #0000FF80"));
        assert!(lines[1].ends_with("hsl(240, 100%, 50%)"));
    }

    #[test]
    fn test_run_missing_file() {
        let args = PaletteArgs {
            file: PathBuf::from("/nonexistent/sprite.png"),
            max_colors: None,
            overflow: None,
            json: false,
        };
        assert!(run(args, &Config::default(), &Printer::plain()).is_err());
    }
}
