//! Dominant colour extraction (palette swatches).
//!
//! Counts every distinct RGBA colour in a buffer and keeps the most frequent
//! ones as swatches. Ties are broken by the colour tuple, highest first.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Colour, PixelBuffer};

/// Number of swatches a palette holds.
pub const PALETTE_SIZE: usize = 10;

/// Default number of distinct colours an image may have before it counts
/// as overflowing.
pub const DEFAULT_MAX_COLORS: usize = 16;

/// What to do when an image has more distinct colours than `max_colors`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Keep the most frequent colours anyway.
    #[default]
    Cap,
    /// Report no swatches at all.
    Empty,
}

/// A colour and how many pixels use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub colour: Colour,
    pub frequency: usize,
}

/// Result of a palette extraction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    pub entries: Vec<PaletteEntry>,
    /// Distinct colours found in the buffer.
    pub distinct: usize,
    /// True when `distinct` exceeded the configured maximum.
    pub overflowed: bool,
}

impl Palette {
    pub fn colours(&self) -> Vec<Colour> {
        self.entries.iter().map(|e| e.colour).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extraction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteOptions {
    pub max_colors: usize,
    pub overflow: OverflowPolicy,
    pub size: usize,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            max_colors: DEFAULT_MAX_COLORS,
            overflow: OverflowPolicy::default(),
            size: PALETTE_SIZE,
        }
    }
}

/// Extract up to [`PALETTE_SIZE`] swatches with the default overflow policy.
pub fn extract_palette(buffer: &PixelBuffer, max_colors: usize) -> Palette {
    extract_palette_with(
        buffer,
        &PaletteOptions {
            max_colors,
            ..Default::default()
        },
    )
}

/// Extract swatches with explicit options.
pub fn extract_palette_with(buffer: &PixelBuffer, options: &PaletteOptions) -> Palette {
    let mut counts: HashMap<Colour, usize> = HashMap::new();
    for &pixel in buffer.pixels() {
        *counts.entry(pixel).or_insert(0) += 1;
    }

    let distinct = counts.len();
    let overflowed = distinct > options.max_colors;

    if overflowed && options.overflow == OverflowPolicy::Empty {
        return Palette {
            entries: Vec::new(),
            distinct,
            overflowed,
        };
    }

    let mut entries: Vec<PaletteEntry> = counts
        .into_iter()
        .map(|(colour, frequency)| PaletteEntry { colour, frequency })
        .collect();

    // Most frequent first, then highest colour tuple first
    entries.sort_by(|a, b| {
        b.frequency
            .cmp(&a.frequency)
            .then_with(|| b.colour.cmp(&a.colour))
    });
    entries.truncate(options.size);

    Palette {
        entries,
        distinct,
        overflowed,
    }
}
