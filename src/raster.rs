// Software drawing on the canvas.
// Visual effects provided here:
// 1) The base image copied in at native resolution.
// 2) Alpha-blended strokes (solid or dashed) for boxes and mask runs.
// 3) Filled discs for the annotation points.
//
// The renderer talks to a `Painter`, so the same frame can go to pixels
// (`FrameBuffer`) or to a list of draw calls (`Recorder`) in tests.

use crate::types::{FrameBuffer, Rgba};

/// How a line or rectangle outline is stroked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,            // pixels across the line
    pub alpha: f32,            // global alpha, multiplied with `color.a`
    pub dash: Option<[u32; 2]>, // [on, off] lengths in pixels; None = solid
}

impl Stroke {
    pub fn solid(color: Rgba, width: f32, alpha: f32) -> Self {
        Self { color, width, alpha, dash: None }
    }

    pub fn dashed(color: Rgba, width: f32, alpha: f32, dash: [u32; 2]) -> Self {
        Self { color, width, alpha, dash: Some(dash) }
    }

    fn effective_alpha(&self) -> f32 {
        (self.color.a * self.alpha).clamp(0.0, 1.0)
    }
}

/// Draw target for one frame.
pub trait Painter {
    /// Copy the base image at (0,0), full opacity.
    fn draw_image(&mut self, image: &FrameBuffer);
    /// Outline of the axis-aligned rectangle spanning the two corners.
    fn stroke_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, stroke: &Stroke);
    /// Straight segment, both endpoints included.
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, stroke: &Stroke);
    /// Filled disc; `alpha` is multiplied with `color.a`.
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba, alpha: f32);
}

/* ---------- Pixel level ---------- */

/// Blend `color` over the pixel at (x,y) with straight alpha, if inside bounds.
/// Visual: the pixel shifts toward `color` by `alpha`.
#[inline]
pub fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: Rgba, alpha: f32) {
    if x < 0 || y < 0 || alpha <= 0.0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    if alpha >= 1.0 {
        fb.pixels[idx] = pack(color.r, color.g, color.b);
        return;
    }

    let old = fb.pixels[idx];
    let inv = 1.0 - alpha;
    let mixc = |dst: u32, src: u8| -> u8 {
        (dst as f32 * inv + src as f32 * alpha).round().clamp(0.0, 255.0) as u8
    };
    let r = mixc((old >> 16) & 0xFF, color.r);
    let g = mixc((old >> 8) & 0xFF, color.g);
    let b = mixc(old & 0xFF, color.b);
    fb.pixels[idx] = pack(r, g, b);
}

#[inline]
pub fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline]
pub fn unpack(px: u32) -> (u8, u8, u8) {
    (((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
}

/// Clip a segment to `[xmin, xmax] x [ymin, ymax]` (Liang-Barsky, in f64 so far-off
/// endpoints keep their precision). Returns the clipped ends and the entry
/// parameter `t0` along the original segment; `None` when nothing is inside.
fn clip_segment(
    (x0, y0, x1, y1): (f64, f64, f64, f64),
    (xmin, ymin, xmax, ymax): (f64, f64, f64, f64),
) -> Option<(f64, f64, f64, f64, f64)> {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [(-dx, x0 - xmin), (dx, xmax - x0), (-dy, y0 - ymin), (dy, ymax - y0)] {
        if p == 0.0 {
            // Parallel to this edge: fully outside or no constraint.
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }
    Some((x0 + t0 * dx, y0 + t0 * dy, x0 + t1 * dx, y0 + t1 * dy, t0))
}

/// Thick line via Bresenham: each step stamps `width` pixels across the minor axis.
/// Dashes count steps along the major axis, so a dash is `on` pixels long.
/// The segment is clipped to the canvas plus the stroke width first, so only
/// on-canvas steps are walked; the dash phase is carried over from the clipped part.
fn raster_line(fb: &mut FrameBuffer, x0: f32, y0: f32, x1: f32, y1: f32, stroke: &Stroke) {
    if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
        return;
    }
    if fb.width == 0 || fb.height == 0 {
        return;
    }
    let alpha = stroke.effective_alpha();
    let thick = (stroke.width.round() as i32).clamp(1, 64);
    let lo = -(thick - 1) / 2;
    let hi = thick / 2;

    let (x0, y0, x1, y1) = (x0.round() as f64, y0.round() as f64, x1.round() as f64, y1.round() as f64);
    let pad = (thick + 1) as f64;
    let bounds = (-pad, -pad, fb.width as f64 - 1.0 + pad, fb.height as f64 - 1.0 + pad);
    let Some((cx0, cy0, cx1, cy1, t0)) = clip_segment((x0, y0, x1, y1), bounds) else {
        return;
    };
    let major = (x1 - x0).abs().max((y1 - y0).abs());
    let mut step = (t0 * major).round() as u64;

    let (mut x, mut y) = (cx0.round() as i64, cy0.round() as i64);
    let (x1, y1) = (cx1.round() as i64, cy1.round() as i64);
    let dx = (x1 - x).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let dy = -(y1 - y).abs();
    let sy = if y < y1 { 1 } else { -1 };
    let mostly_horizontal = dx >= -dy;
    let mut err = dx + dy;

    loop {
        let on = match stroke.dash {
            Some([on, off]) if on + off > 0 => step % u64::from(on + off) < u64::from(on),
            _ => true,
        };
        if on {
            for k in lo..=hi {
                let k = k as i64;
                if mostly_horizontal {
                    blend_pixel(fb, x as i32, (y + k) as i32, stroke.color, alpha);
                } else {
                    blend_pixel(fb, (x + k) as i32, y as i32, stroke.color, alpha);
                }
            }
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
        step += 1;
    }
}

impl Painter for FrameBuffer {
    fn draw_image(&mut self, image: &FrameBuffer) {
        // Sizes normally match; copy the overlap if they ever don't.
        let w = self.width.min(image.width);
        let h = self.height.min(image.height);
        for y in 0..h {
            let dst = y * self.width;
            let src = y * image.width;
            self.pixels[dst..dst + w].copy_from_slice(&image.pixels[src..src + w]);
        }
    }

    fn stroke_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, stroke: &Stroke) {
        let (l, r) = (x0.min(x1), x0.max(x1));
        let (t, b) = (y0.min(y1), y0.max(y1));
        raster_line(self, l, t, r, t, stroke);
        raster_line(self, r, t, r, b, stroke);
        raster_line(self, r, b, l, b, stroke);
        raster_line(self, l, b, l, t, stroke);
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, stroke: &Stroke) {
        raster_line(self, x0, y0, x1, y1, stroke);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba, alpha: f32) {
        if radius <= 0.0 || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let a = (color.a * alpha).clamp(0.0, 1.0);
        let r2 = radius * radius;
        let (x_min, x_max) = ((cx - radius).floor() as i32, (cx + radius).ceil() as i32);
        let (y_min, y_max) = ((cy - radius).floor() as i32, (cy + radius).ceil() as i32);

        // Scan just the bounding box; a pixel is in if its center is.
        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    blend_pixel(self, x, y, color, a);
                }
            }
        }
    }
}

/* ---------- Recording painter ---------- */

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Image { width: usize, height: usize },
    Rect { x0: f32, y0: f32, x1: f32, y1: f32, stroke: Stroke },
    Line { x0: f32, y0: f32, x1: f32, y1: f32, stroke: Stroke },
    Circle { cx: f32, cy: f32, radius: f32, color: Rgba, alpha: f32 },
}

/// Painter that keeps the calls instead of pixels.
#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rects(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Rect { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Circle { .. }))
    }
}

impl Painter for Recorder {
    fn draw_image(&mut self, image: &FrameBuffer) {
        self.ops.push(DrawOp::Image { width: image.width, height: image.height });
    }

    fn stroke_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, stroke: &Stroke) {
        self.ops.push(DrawOp::Rect { x0, y0, x1, y1, stroke: *stroke });
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, stroke: &Stroke) {
        self.ops.push(DrawOp::Line { x0, y0, x1, y1, stroke: *stroke });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba, alpha: f32) {
        self.ops.push(DrawOp::Circle { cx, cy, radius, color, alpha });
    }
}
