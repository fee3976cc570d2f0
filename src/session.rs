// Host boundary: the reducer runs here, and the host hears about changes only
// through whole-value setter calls.

use std::rc::Rc;

use tracing::{debug, info};

use crate::coords::Viewport;
use crate::interaction::{step, AnnotationState, BoxSelection, InputEvent};
use crate::render::Scene;
use crate::types::{ImageContext, Mask, Mode, Point};

/// Setter callbacks the host application provides.
pub trait AnnotationHost {
    /// Replacement point list after a pointer event changed it.
    fn set_points(&mut self, points: Vec<Point>);
    /// Box-ready flag after it changed.
    fn set_box_ready(&mut self, ready: bool);
}

/// One annotation session on one image with a fixed mode.
pub struct Session<H: AnnotationHost> {
    host: H,
    mode: Mode,
    state: AnnotationState,
    viewport: Viewport,
}

impl<H: AnnotationHost> Session<H> {
    pub fn new(host: H, mode: Mode) -> Self {
        Self { host, mode, state: AnnotationState::default(), viewport: Viewport::IDENTITY }
    }

    /// Start with the overlay shown or hidden.
    pub fn with_show_overlay(mut self, show: bool) -> Self {
        self.state.show_overlay = show;
        self
    }

    pub fn state(&self) -> &AnnotationState {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Latest image placement; call whenever the window or image size changes.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Run one event through the reducer and notify the host of what changed.
    pub fn handle(&mut self, event: &InputEvent) {
        let next = step(&self.state, self.mode, event, &self.viewport);

        if next.points != self.state.points {
            debug!(count = next.points.len(), "points replaced");
            self.host.set_points(next.points.clone());
        }
        if next.box_ready != self.state.box_ready {
            if next.box_ready {
                if let Some(b) = BoxSelection::from_points(&next.points) {
                    info!(x0 = b.x0, y0 = b.y0, x1 = b.x1, y1 = b.y1, "box ready");
                }
            }
            self.host.set_box_ready(next.box_ready);
        }
        if next.show_overlay != self.state.show_overlay {
            debug!(show = next.show_overlay, "overlay toggled");
        }

        self.state = next;
    }

    /// Session boundary reset (e.g. switching images): no points, no box.
    pub fn clear_points(&mut self) {
        if !self.state.points.is_empty() {
            self.host.set_points(Vec::new());
        }
        if self.state.box_ready {
            self.host.set_box_ready(false);
        }
        self.state = AnnotationState { show_overlay: self.state.show_overlay, ..Default::default() };
    }

    /// Render snapshot for the current state.
    pub fn scene(&self, image: &ImageContext, masks: &Rc<[Mask]>, mask_area_threshold: f32) -> Scene {
        Scene {
            image: image.clone(),
            mode: self.mode,
            masks: Rc::clone(masks),
            points: self.state.points.clone(),
            show_overlay: self.state.show_overlay,
            mask_area_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::Buttons;

    #[derive(Default)]
    struct Calls {
        points: Vec<Vec<Point>>,
        ready: Vec<bool>,
    }

    impl AnnotationHost for Calls {
        fn set_points(&mut self, points: Vec<Point>) {
            self.points.push(points);
        }
        fn set_box_ready(&mut self, ready: bool) {
            self.ready.push(ready);
        }
    }

    #[test]
    fn setters_fire_only_on_change() {
        let mut s = Session::new(Calls::default(), Mode::Click);
        s.handle(&InputEvent::Move { x: 1.0, y: 1.0, buttons: Buttons::NONE });
        assert!(s.host().points.is_empty());

        s.handle(&InputEvent::Click { x: 1.0, y: 2.0 });
        s.handle(&InputEvent::ContextMenu { x: 3.0, y: 4.0 });
        assert_eq!(s.host().points.len(), 2);
        assert_eq!(s.host().points[1].len(), 2);
        assert!(s.host().ready.is_empty());
    }

    #[test]
    fn clear_resets_points_and_box() {
        let mut s = Session::new(Calls::default(), Mode::Box);
        s.handle(&InputEvent::Move { x: 1.0, y: 1.0, buttons: Buttons::NONE });
        s.handle(&InputEvent::Move { x: 5.0, y: 5.0, buttons: Buttons::PRIMARY });
        s.handle(&InputEvent::Release { x: 5.0, y: 5.0 });
        assert_eq!(s.host().ready, vec![true]);

        s.clear_points();
        assert!(s.state().points.is_empty());
        assert!(!s.state().box_ready);
        assert_eq!(s.host().ready, vec![true, false]);
        assert_eq!(s.host().points.last(), Some(&Vec::new()));
    }

    #[test]
    fn redrag_tells_host_box_is_not_ready() {
        let mut s = Session::new(Calls::default(), Mode::Box);
        s.handle(&InputEvent::Move { x: 1.0, y: 1.0, buttons: Buttons::NONE });
        s.handle(&InputEvent::Move { x: 5.0, y: 5.0, buttons: Buttons::PRIMARY });
        s.handle(&InputEvent::Release { x: 5.0, y: 5.0 });
        s.handle(&InputEvent::Move { x: 8.0, y: 2.0, buttons: Buttons::PRIMARY });

        assert_eq!(s.host().ready, vec![true, false]);
        assert_eq!(
            s.host().points.last(),
            Some(&vec![Point::foreground(1.0, 1.0), Point::foreground(8.0, 2.0)])
        );
    }

    #[test]
    fn scene_reflects_state() {
        let image = ImageContext::new(crate::types::FrameBuffer::new(4, 4));
        let masks: Rc<[Mask]> = Vec::<Mask>::new().into();
        let mut s = Session::new(Calls::default(), Mode::Click);
        s.handle(&InputEvent::Click { x: 1.0, y: 1.0 });
        s.handle(&InputEvent::SuppressKey(true));
        let scene = s.scene(&image, &masks, 0.3);
        assert_eq!(scene.points.len(), 1);
        assert!(!scene.show_overlay);
        assert_eq!(scene.mask_area_threshold, 0.3);
        assert_eq!(scene.mode, Mode::Click);
    }
}
