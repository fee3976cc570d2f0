//! Overlay renderer.
//!
//! Every frame is a full redraw from the current [`Scene`], in this order:
//! base image, box preview (box mode, two points), mask boxes and runs (only
//! when the overlay is shown and the mask passes the area threshold), then the
//! annotation points on top.

use std::rc::Rc;

use tracing::debug;

use crate::color::mask_rgba;
use crate::raster::{Painter, Stroke};
use crate::runs::mask_runs;
use crate::types::{ImageContext, Mask, Mode, Point, Label, Rgba};

pub const BOX_PREVIEW_WIDTH: f32 = 2.0;
pub const BOX_PREVIEW_ALPHA: f32 = 0.9;
pub const MASK_BBOX_WIDTH: f32 = 2.0;
pub const MASK_BBOX_ALPHA: f32 = 0.9;
pub const MASK_BBOX_DASH: [u32; 2] = [4, 4];
pub const RUN_WIDTH: f32 = 1.0;
pub const RUN_ALPHA: f32 = 0.8;
pub const POINT_RADIUS: f32 = 5.0;
pub const POINT_ALPHA: f32 = 0.9;

/// Snapshot of everything a frame depends on.
/// Cheap to clone: the image and the mask list are shared.
#[derive(Clone, Debug)]
pub struct Scene {
    pub image: ImageContext,
    pub mode: Mode,
    pub masks: Rc<[Mask]>,
    pub points: Vec<Point>,
    pub show_overlay: bool,
    pub mask_area_threshold: f32,   // fraction of the image area, 0..=1
}

impl Scene {
    /// True when none of the watched inputs changed.
    pub fn same_as(&self, other: &Scene) -> bool {
        self.image.same_as(&other.image)
            && self.mode == other.mode
            && (Rc::ptr_eq(&self.masks, &other.masks) || self.masks == other.masks)
            && self.points == other.points
            && self.show_overlay == other.show_overlay
            && self.mask_area_threshold == other.mask_area_threshold
    }

    /// Masks that pass the area threshold, with their list index (the color seed).
    pub fn visible_masks(&self) -> impl Iterator<Item = (usize, &Mask)> {
        let (w, h) = (self.image.width, self.image.height);
        let threshold = self.mask_area_threshold as f64;
        // Written as `!(a > t)` so a NaN fraction (zero-sized image) still draws.
        self.masks
            .iter()
            .enumerate()
            .filter(move |(_, m)| !(m.area_fraction(w, h) > threshold))
    }
}

/// Draw the whole frame for `scene`.
pub fn render_scene<P: Painter + ?Sized>(painter: &mut P, scene: &Scene) {
    // 1) Base image at native resolution.
    painter.draw_image(&scene.image.image);

    // 2) Box preview while two corners exist.
    if scene.mode == Mode::Box {
        if let [a, b] = scene.points.as_slice() {
            let stroke = Stroke::solid(Rgba::BLACK, BOX_PREVIEW_WIDTH, BOX_PREVIEW_ALPHA);
            painter.stroke_rect(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y), &stroke);
        }
    }

    // 3) Overlay hidden: the base image and box preview are all the masks get.
    if scene.show_overlay {
        for (index, mask) in scene.visible_masks() {
            draw_mask(painter, index, mask);
        }
    }

    // 4) Points last so they stay visible above the masks.
    for p in &scene.points {
        let fill = match p.label {
            Label::Foreground => Rgba::GREEN,
            Label::Background => Rgba::RED,
        };
        painter.fill_circle(p.x, p.y, POINT_RADIUS, fill, POINT_ALPHA);
    }
}

/// Dashed bounding box, then one solid horizontal stroke per run.
fn draw_mask<P: Painter + ?Sized>(painter: &mut P, index: usize, mask: &Mask) {
    let color = mask_rgba(index);
    let [x, y, w, h] = mask.bbox;
    let bbox = Stroke::dashed(color, MASK_BBOX_WIDTH, MASK_BBOX_ALPHA, MASK_BBOX_DASH);
    painter.stroke_rect(x, y, x + w, y + h, &bbox);

    let run = Stroke::solid(color, RUN_WIDTH, RUN_ALPHA);
    for (row, r) in mask_runs(&mask.segmentation) {
        let j = row as f32;
        painter.stroke_line(r.start as f32, j, r.end as f32, j, &run);
    }
}

/// Redraws only when the scene changed since the last frame that was drawn.
#[derive(Debug, Default)]
pub struct Overlay {
    last: Option<Scene>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn needs_redraw(&self, scene: &Scene) -> bool {
        self.last.as_ref().is_none_or(|last| !last.same_as(scene))
    }

    /// Draw `scene` if it changed. Returns whether a frame was drawn.
    /// Without a surface nothing happens; the scene stays dirty and is drawn
    /// the next time a surface is available.
    pub fn render<P: Painter + ?Sized>(&mut self, surface: Option<&mut P>, scene: &Scene) -> bool {
        if !self.needs_redraw(scene) {
            return false;
        }
        let Some(painter) = surface else {
            debug!("no drawing surface, skipping frame");
            return false;
        };
        render_scene(painter, scene);
        self.last = Some(scene.clone());
        true
    }
}
