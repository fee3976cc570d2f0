// Inputs handed to the overlay by its collaborators: the decoded image and the
// precomputed mask list.
// Visual expectation: `load_image` gives a buffer that, pushed to the window,
// shows the photo exactly as stored on disk.

use std::fs;
use std::path::Path;

use image::RgbImage;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::raster::pack;
use crate::types::{FrameBuffer, Mask};

/// Decode an image file into 0x00RRGGBB pixels at its native size.
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let img = image::open(path).map_err(|source| Error::ImageLoad { path: path.to_path_buf(), source })?;
    let rgb = img.to_rgb8();
    info!(path = %path.display(), width = rgb.width(), height = rgb.height(), "image loaded");
    Ok(frame_from_rgb(&rgb))
}

/// Pack an RGB image buffer row by row.
pub fn frame_from_rgb(rgb: &RgbImage) -> FrameBuffer {
    let (w, h) = rgb.dimensions();
    let mut out = Vec::with_capacity((w as usize) * (h as usize));
    for pixel in rgb.pixels() {
        out.push(pack(pixel[0], pixel[1], pixel[2]));
    }
    FrameBuffer { width: w as usize, height: h as usize, pixels: out }
}

/// Read a JSON array of masks. An empty array is a valid, empty list.
pub fn load_masks(path: &Path) -> Result<Vec<Mask>> {
    let text = fs::read_to_string(path)?;
    let masks = parse_masks(&text).map_err(|source| Error::MaskLoad { path: path.to_path_buf(), source })?;
    debug!(path = %path.display(), count = masks.len(), "masks loaded");
    Ok(masks)
}

pub fn parse_masks(text: &str) -> std::result::Result<Vec<Mask>, serde_json::Error> {
    serde_json::from_str(text)
}
