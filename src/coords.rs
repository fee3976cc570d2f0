//! Display space <-> image pixel space.
//!
//! The canvas always has the image's native size; the window stretches it
//! (aspect preserved, centered). This module is the only place display
//! coordinates exist. Nothing is clamped: a pointer outside the image maps to
//! coordinates outside `[0, width] x [0, height]`.

/// Scale that fits an image inside a container with its aspect ratio kept.
///
/// A zero-sized container gives `0.0`, a zero-sized image gives `inf`. Both are
/// allowed through; mapping with them yields non-finite values instead of panicking.
pub fn display_scale(container: (f32, f32), image: (f32, f32)) -> f32 {
    let (cw, ch) = container;
    let (iw, ih) = image;
    (cw / iw).min(ch / ih)
}

/// Map a display-space position back to image pixels.
pub fn to_image_space(display_x: f32, display_y: f32, origin_x: f32, origin_y: f32, scale: f32) -> (f32, f32) {
    ((display_x - origin_x) / scale, (display_y - origin_y) / scale)
}

/// Where the image sits inside the container for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub origin_x: f32,
    pub origin_y: f32,
    pub scale: f32,
}

impl Viewport {
    /// Identity mapping: display pixels are image pixels.
    pub const IDENTITY: Viewport = Viewport { origin_x: 0.0, origin_y: 0.0, scale: 1.0 };

    /// Fit `image` into `container`, centered on the spare axis.
    /// Must be recomputed whenever either size changes; a stale viewport maps
    /// pointer events to the wrong pixels.
    pub fn fit(container: (f32, f32), image: (f32, f32)) -> Self {
        let scale = display_scale(container, image);
        let origin_x = (container.0 - image.0 * scale) / 2.0;
        let origin_y = (container.1 - image.1 * scale) / 2.0;
        Self { origin_x, origin_y, scale }
    }

    pub fn to_image(&self, display_x: f32, display_y: f32) -> (f32, f32) {
        to_image_space(display_x, display_y, self.origin_x, self.origin_y, self.scale)
    }

    pub fn to_display(&self, image_x: f32, image_y: f32) -> (f32, f32) {
        (self.origin_x + image_x * self.scale, self.origin_y + image_y * self.scale)
    }
}
