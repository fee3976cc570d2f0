// Core types shared by the renderer, the interaction reducer and the window shell.

use serde::{Deserialize, Serialize};
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,      // canvas width in image pixels
    pub height: usize,     // canvas height in image pixels
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A black canvas of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Read one pixel; `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

/// Point label. Foreground marks what belongs to the object, background what does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    Background = 0,
    Foreground = 1,
}

/// An annotation point in image pixel space.
/// Coordinates may sit outside the image while the pointer is dragged past an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub label: Label,
}

impl Point {
    pub fn new(x: f32, y: f32, label: Label) -> Self {
        Self { x, y, label }
    }

    pub fn foreground(x: f32, y: f32) -> Self {
        Self::new(x, y, Label::Foreground)
    }

    pub fn background(x: f32, y: f32) -> Self {
        Self::new(x, y, Label::Background)
    }
}

/// A precomputed segmentation candidate.
/// `segmentation[j]` lists the occupied columns of image row `j`, strictly increasing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mask {
    pub bbox: [f32; 4],               // x, y, w, h in image pixels
    pub segmentation: Vec<Vec<u32>>,  // one occupancy list per row
    pub area: f64,                    // pixel count, comparable to width * height
}

impl Mask {
    /// Fraction of the image this mask covers.
    /// Visual: compared against the area threshold to decide if the mask is drawn.
    pub fn area_fraction(&self, width: usize, height: usize) -> f64 {
        self.area / (width as f64 * height as f64)
    }
}

/// Which pointer gestures are live for the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Click,
    Box,
    Everything,
}

/// The image being annotated. The canvas takes its exact pixel size.
#[derive(Clone, Debug)]
pub struct ImageContext {
    pub width: usize,
    pub height: usize,
    pub image: Rc<FrameBuffer>,   // shared decoded image; identity marks "same image"
}

impl ImageContext {
    pub fn new(image: FrameBuffer) -> Self {
        Self { width: image.width, height: image.height, image: Rc::new(image) }
    }

    /// Same logical image: same handle and same dimensions.
    pub fn same_as(&self, other: &ImageContext) -> bool {
        Rc::ptr_eq(&self.image, &other.image)
            && self.width == other.width
            && self.height == other.height
    }
}

/// Straight-alpha color used by every stroke and fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,   // 0.0 transparent .. 1.0 opaque
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 1.0);
    pub const GREEN: Rgba = Rgba::new(0, 255, 0, 1.0);
    pub const RED: Rgba = Rgba::new(255, 0, 0, 1.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}
