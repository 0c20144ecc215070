//! Raster image load and save.
//!
//! Decoding and encoding go through the `image` crate; anything it can read
//! is normalized to RGBA8 on load. Saving can upscale by an integer factor.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{SwapError, Result};
use crate::types::PixelBuffer;

/// File extensions treated as sprites when scanning directories.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "bmp", "gif", "jpg", "jpeg", "tga", "webp"];

/// Largest integer upscale accepted on save.
pub const MAX_SCALE: u32 = 64;

/// Load an image file as an RGBA pixel buffer.
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .map_err(|e| SwapError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .to_rgba8();

    Ok(PixelBuffer::from(img))
}

/// Write a buffer to an image file. The format follows the extension.
///
/// # Arguments
///
/// * `buffer` - Pixels to write
/// * `path` - Output file path
/// * `scale` - Integer scale factor (1 = no scaling)
pub fn save_image(buffer: &PixelBuffer, path: &Path, scale: u32) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SwapError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let scaled = scale_buffer(buffer, scale)?;
    scaled.to_image().save(path).map_err(|e| SwapError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write image: {}", e),
    })?;

    Ok(())
}

/// Nearest-neighbour integer upscale, keeping pixel edges crisp.
///
/// Scales above [`MAX_SCALE`], or ones whose result would not fit in `u32`
/// dimensions, are rejected.
pub fn scale_buffer(buffer: &PixelBuffer, scale: u32) -> Result<PixelBuffer> {
    if scale <= 1 {
        return Ok(buffer.clone());
    }

    let too_large = || SwapError::Parse {
        message: format!("Scale {} is too large", scale),
        help: Some(format!("Use a scale from 1 to {}", MAX_SCALE)),
    };
    if scale > MAX_SCALE {
        return Err(too_large());
    }

    let (width, height) = buffer.dimensions();
    let scaled_width = width.checked_mul(scale).ok_or_else(too_large)?;
    let scaled_height = height.checked_mul(scale).ok_or_else(too_large)?;
    let mut scaled = PixelBuffer::filled(
        scaled_width,
        scaled_height,
        crate::types::Colour::TRANSPARENT,
    );

    for y in 0..scaled_height {
        for x in 0..scaled_width {
            if let Some(colour) = buffer.get(x / scale, y / scale) {
                scaled.set(x, y, colour);
            }
        }
    }

    Ok(scaled)
}

/// Whether a path looks like an image this tool handles.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Collect image files under `root`, sorted. A file path yields itself.
pub fn collect_images(root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| SwapError::Io {
            path: root.to_path_buf(),
            message: format!("Failed to scan directory: {}", e),
        })?;

        if entry.file_type().is_file() && is_image_path(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
