//! Pointer events -> annotation state.
//!
//! [`step`] is a pure reducer: it takes the current [`AnnotationState`] and one
//! [`InputEvent`] and returns the next state. Lists are always replaced whole,
//! never edited in place.

use crate::coords::Viewport;
use crate::types::{Mode, Point};

/// Which pointer buttons are held during a move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Buttons {
    pub primary: bool,
    pub secondary: bool,
}

impl Buttons {
    pub const NONE: Buttons = Buttons { primary: false, secondary: false };
    pub const PRIMARY: Buttons = Buttons { primary: true, secondary: false };

    pub fn any(&self) -> bool {
        self.primary || self.secondary
    }
}

/// Raw input in display space, already split into discrete events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to (x,y) with `buttons` held.
    Move { x: f32, y: f32, buttons: Buttons },
    /// Primary button clicked at (x,y).
    Click { x: f32, y: f32 },
    /// Secondary button (context menu) at (x,y).
    ContextMenu { x: f32, y: f32 },
    /// Primary button released.
    Release { x: f32, y: f32 },
    /// Overlay suppress key went down (`true`) or up (`false`).
    SuppressKey(bool),
}

/// Shared annotation state. The reducer is its only writer during a session.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationState {
    pub points: Vec<Point>,
    pub box_ready: bool,
    pub show_overlay: bool,
}

impl Default for AnnotationState {
    fn default() -> Self {
        Self { points: Vec::new(), box_ready: false, show_overlay: true }
    }
}

/// Next state for `event` under `mode`.
pub fn step(state: &AnnotationState, mode: Mode, event: &InputEvent, viewport: &Viewport) -> AnnotationState {
    // The suppress key works the same in every mode and only touches rendering.
    if let InputEvent::SuppressKey(held) = *event {
        return AnnotationState { show_overlay: !held, ..state.clone() };
    }

    match mode {
        Mode::Click => step_click(state, event, viewport),
        Mode::Box => step_box(state, event, viewport),
        Mode::Everything => state.clone(),
    }
}

fn step_click(state: &AnnotationState, event: &InputEvent, viewport: &Viewport) -> AnnotationState {
    let point = match *event {
        InputEvent::Click { x, y } => {
            let (ix, iy) = viewport.to_image(x, y);
            Point::foreground(ix, iy)
        }
        InputEvent::ContextMenu { x, y } => {
            let (ix, iy) = viewport.to_image(x, y);
            Point::background(ix, iy)
        }
        _ => return state.clone(),
    };

    // Append only; existing points and their labels never change.
    let mut points = Vec::with_capacity(state.points.len() + 1);
    points.extend_from_slice(&state.points);
    points.push(point);
    AnnotationState { points, ..state.clone() }
}

fn step_box(state: &AnnotationState, event: &InputEvent, viewport: &Viewport) -> AnnotationState {
    match *event {
        // Hover preview: the anchor follows the pointer until a drag starts.
        InputEvent::Move { x, y, buttons } if !buttons.any() && state.points.len() < 2 => {
            let (ix, iy) = viewport.to_image(x, y);
            AnnotationState { points: vec![Point::foreground(ix, iy)], ..state.clone() }
        }
        // Drag: anchor stays, the second corner follows the pointer.
        // Only primary alone drags; a chorded press is ignored.
        InputEvent::Move { x, y, buttons } if buttons == Buttons::PRIMARY => {
            let Some(&anchor) = state.points.first() else {
                return state.clone();
            };
            let (ix, iy) = viewport.to_image(x, y);
            AnnotationState {
                points: vec![anchor, Point::foreground(ix, iy)],
                box_ready: false,
                ..state.clone()
            }
        }
        // Release commits the box once both corners exist.
        InputEvent::Release { .. } if state.points.len() == 2 => {
            AnnotationState { box_ready: true, ..state.clone() }
        }
        _ => state.clone(),
    }
}

/// A committed box in image pixels, corners normalised.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSelection {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoxSelection {
    /// Box spanned by a two-point list; `None` for any other length.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let [a, b] = points else {
            return None;
        };
        Some(Self {
            x0: a.x.min(b.x),
            y0: a.y.min(b.y),
            x1: a.x.max(b.x),
            y1: a.y.max(b.y),
        })
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}
