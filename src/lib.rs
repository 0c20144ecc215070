//! spriteswap - Shading-aware colour swapping for pixel-art sprites
//!
//! Replaces one colour in a sprite with another. Pixels close to the old
//! colour are swapped too, scaled by their brightness so shading survives.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod raster;
pub mod recolor;
pub mod session;
pub mod types;
pub mod undo;

pub use config::{Config, CONFIG_FILENAME};
pub use error::{Result, SwapError};
pub use extract::{
    extract_palette, extract_palette_with, OverflowPolicy, Palette, PaletteEntry, PaletteOptions,
    DEFAULT_MAX_COLORS, PALETTE_SIZE,
};
pub use raster::{load_image, save_image, scale_buffer};
pub use recolor::{recolor, recolor_rows, RecolorStats};
pub use session::{Board, Selection, Session};
pub use types::{Colour, PixelBuffer, ToleranceConfig};
pub use undo::UndoStack;
