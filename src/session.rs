//! Editing session state.
//!
//! A [`Session`] owns everything an interactive swap needs: the loaded
//! sprite, the working copy being edited, the undo history, two rows of
//! palette swatches and the current selection. Callers drive it one
//! operation at a time.

use std::fmt;
use std::path::Path;

use crate::error::{SwapError, Result};
use crate::extract::{extract_palette_with, Palette, PaletteOptions};
use crate::raster::save_image;
use crate::recolor::{recolor, RecolorStats};
use crate::types::{Colour, PixelBuffer, ToleranceConfig};
use crate::undo::UndoStack;

/// Which swatch row a selection refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board {
    /// Colours as extracted from the image.
    Original,
    /// Colours tracking the swaps applied so far.
    Edited,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Board::Original => write!(f, "original"),
            Board::Edited => write!(f, "edited"),
        }
    }
}

/// The swatch the user picked, and the colour it held when picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub board: Board,
    pub index: usize,
    pub colour: Colour,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    original: Option<PixelBuffer>,
    working: Option<PixelBuffer>,
    undo: UndoStack,
    original_swatches: Vec<Colour>,
    edited_swatches: Vec<Colour>,
    palette: Palette,
    selection: Option<Selection>,
    new_colour: Option<Colour>,
    tolerance: ToleranceConfig,
    palette_options: PaletteOptions,
}

impl Session {
    pub fn new(tolerance: ToleranceConfig, palette_options: PaletteOptions) -> Self {
        Self {
            tolerance,
            palette_options,
            ..Default::default()
        }
    }

    /// Start editing a new image. Undo history and selection are reset.
    pub fn load(&mut self, buffer: PixelBuffer) -> &Palette {
        self.undo.clear();
        self.selection = None;
        self.original = Some(buffer.clone());
        self.working = Some(buffer);
        self.refresh_swatches();
        &self.palette
    }

    pub fn is_loaded(&self) -> bool {
        self.working.is_some()
    }

    /// The image as first loaded.
    pub fn original(&self) -> Option<&PixelBuffer> {
        self.original.as_ref()
    }

    /// The image with all applied swaps.
    pub fn working(&self) -> Option<&PixelBuffer> {
        self.working.as_ref()
    }

    /// The most recent extraction result.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn swatches(&self, board: Board) -> &[Colour] {
        match board {
            Board::Original => &self.original_swatches,
            Board::Edited => &self.edited_swatches,
        }
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn new_colour(&self) -> Option<Colour> {
        self.new_colour
    }

    pub fn tolerance(&self) -> ToleranceConfig {
        self.tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: ToleranceConfig) {
        self.tolerance = tolerance;
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Select the swatch at `index` (0-based) on `board`.
    pub fn select(&mut self, board: Board, index: usize) -> Result<Selection> {
        let swatches = self.swatches(board);
        let colour = swatches.get(index).copied().ok_or_else(|| SwapError::Session {
            message: format!("No {} swatch at position {}", board, index + 1),
            help: Some(format!(
                "The {} palette has {} swatch(es)",
                board,
                swatches.len()
            )),
        })?;

        let selection = Selection {
            board,
            index,
            colour,
        };
        self.selection = Some(selection);
        Ok(selection)
    }

    pub fn set_new_colour(&mut self, colour: Colour) {
        self.new_colour = Some(colour);
    }

    /// Swap the selected colour for the new colour in the working image.
    ///
    /// The previous working image goes onto the undo stack first. The first
    /// edited swatch equal to the selected colour then takes the new colour,
    /// keeping the selected colour's alpha.
    pub fn apply(&mut self) -> Result<RecolorStats> {
        let (Some(selection), Some(new)) = (self.selection, self.new_colour) else {
            return Err(SwapError::Session {
                message: "Select a base color and new color first".to_string(),
                help: Some("Use `select N` and `new COLOUR`".to_string()),
            });
        };

        let Some(working) = self.working.as_mut() else {
            return Err(no_image());
        };

        self.undo.push(working);
        let stats = recolor(working, selection.colour, new, &self.tolerance);

        if let Some(swatch) = self
            .edited_swatches
            .iter_mut()
            .find(|c| **c == selection.colour)
        {
            *swatch = new.with_alpha(selection.colour.a);
        }

        Ok(stats)
    }

    /// Restore the previous working image. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo.pop() {
            Some(previous) => {
                self.working = Some(previous);
                self.refresh_swatches();
                true
            }
            None => false,
        }
    }

    /// Write the working image to `path`.
    pub fn save(&self, path: &Path, scale: u32) -> Result<()> {
        let working = self.working.as_ref().ok_or_else(no_image)?;
        save_image(working, path, scale)
    }

    /// Human-readable description of the current selection.
    pub fn status_line(&self) -> String {
        match self.selection {
            Some(selection) => {
                let c = selection.colour;
                format!(
                    "Selected {} color: RGB({}, {}, {}). If the edited region is unsatisfactory, \
                     run undo, then change the threshold.",
                    selection.board, c.r, c.g, c.b
                )
            }
            None => "No color selected".to_string(),
        }
    }

    /// Re-extract both swatch rows from the working image.
    fn refresh_swatches(&mut self) {
        self.palette = match &self.working {
            Some(working) => extract_palette_with(working, &self.palette_options),
            None => Palette::default(),
        };
        self.original_swatches = self.palette.colours();
        self.edited_swatches = self.palette.colours();
    }
}

fn no_image() -> SwapError {
    SwapError::Session {
        message: "No image loaded".to_string(),
        help: Some("Use `load PATH` first".to_string()),
    }
}
