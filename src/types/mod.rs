//! Core domain types for spriteswap.
//!
//! - `Colour` - RGBA colour values
//! - `PixelBuffer` - the editable sprite
//! - `ToleranceConfig` - how loosely a swap matches

mod buffer;
mod colour;
mod tolerance;

pub use buffer::PixelBuffer;
pub use colour::{Colour, BLACK_LIMIT, WHITE_LIMIT};
pub use tolerance::{ToleranceConfig, DEFAULT_THRESHOLD, MAX_THRESHOLD};
