// Window + raw input.
// Visual effects provided here:
// 1) A resizable window that shows the canvas, stretched with its aspect kept.
// 2) Mouse and key state turned into discrete events for the session.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, ScaleMode, Window, WindowOptions};
use tracing::debug;

use crate::config::SuppressKey;
use crate::error::Error;
use crate::interaction::{Buttons, InputEvent};
use crate::types::FrameBuffer;

/// Input state sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawInput {
    pub pos: Option<(f32, f32)>,  // window pixels; may lie outside the window
    pub buttons: Buttons,
    pub suppress: bool,           // suppress key held
}

/// Turns per-frame samples into edge events.
#[derive(Debug, Default)]
pub struct InputTracker {
    prev: RawInput,
    last_pos: (f32, f32),
}

impl InputTracker {
    /// Events for this frame, in order: suppress key, move, button edges.
    /// A primary release yields `Release` then `Click`; a secondary press yields `ContextMenu`.
    pub fn events(&mut self, now: RawInput) -> Vec<InputEvent> {
        let mut out = Vec::new();

        if now.suppress != self.prev.suppress {
            out.push(InputEvent::SuppressKey(now.suppress));
        }

        if let Some(pos) = now.pos {
            if now.pos != self.prev.pos {
                out.push(InputEvent::Move { x: pos.0, y: pos.1, buttons: now.buttons });
            }
            self.last_pos = pos;
        }
        let (x, y) = self.last_pos;

        if self.prev.buttons.primary && !now.buttons.primary {
            out.push(InputEvent::Release { x, y });
            out.push(InputEvent::Click { x, y });
        }
        if !self.prev.buttons.secondary && now.buttons.secondary {
            out.push(InputEvent::ContextMenu { x, y });
        }

        self.prev = now;
        out
    }
}

pub struct Viewer {
    window: Window,
    suppress_key: SuppressKey,
}

impl Viewer {
    /// Open a resizable window of the given container size.
    pub fn new(title: &str, width: usize, height: usize, suppress_key: SuppressKey) -> Result<Self, Error> {
        let options = WindowOptions {
            resize: true,
            scale_mode: ScaleMode::AspectRatioStretch,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        debug!(width, height, "window opened");
        Ok(Self { window, suppress_key })
    }

    /// Push the canvas; minifb stretches it into the window.
    pub fn present(&mut self, canvas: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&canvas.pixels, canvas.width, canvas.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// C clears the point list.
    pub fn clear_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::C, KeyRepeat::No)
    }

    /// `[` / `]` nudge the mask area threshold down / up.
    pub fn threshold_nudge(&self) -> Option<f32> {
        if self.window.is_key_pressed(Key::LeftBracket, KeyRepeat::Yes) {
            Some(-0.05)
        } else if self.window.is_key_pressed(Key::RightBracket, KeyRepeat::Yes) {
            Some(0.05)
        } else {
            None
        }
    }

    /// Current window size in pixels; the viewport is fitted into this.
    pub fn container_size(&self) -> (f32, f32) {
        let (w, h) = self.window.get_size();
        (w as f32, h as f32)
    }

    pub fn raw_input(&self) -> RawInput {
        RawInput {
            pos: self.window.get_unscaled_mouse_pos(MouseMode::Pass),
            buttons: Buttons {
                primary: self.window.get_mouse_down(MouseButton::Left),
                secondary: self.window.get_mouse_down(MouseButton::Right),
            },
            suppress: self.suppress_held(),
        }
    }

    fn suppress_held(&self) -> bool {
        let keys: &[Key] = match self.suppress_key {
            SuppressKey::Shift => &[Key::LeftShift, Key::RightShift],
            SuppressKey::Ctrl => &[Key::LeftCtrl, Key::RightCtrl],
            SuppressKey::Alt => &[Key::LeftAlt, Key::RightAlt],
            SuppressKey::Space => &[Key::Space],
        };
        keys.iter().any(|&k| self.window.is_key_down(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32, buttons: Buttons) -> RawInput {
        RawInput { pos: Some((x, y)), buttons, suppress: false }
    }

    #[test]
    fn still_pointer_emits_nothing() {
        let mut t = InputTracker::default();
        t.events(at(3.0, 3.0, Buttons::NONE));
        assert!(t.events(at(3.0, 3.0, Buttons::NONE)).is_empty());
    }

    #[test]
    fn drag_and_release() {
        let mut t = InputTracker::default();
        t.events(at(1.0, 1.0, Buttons::NONE));
        let press = t.events(at(1.0, 1.0, Buttons::PRIMARY));
        assert!(press.is_empty());

        let drag = t.events(at(5.0, 6.0, Buttons::PRIMARY));
        assert_eq!(drag, vec![InputEvent::Move { x: 5.0, y: 6.0, buttons: Buttons::PRIMARY }]);

        let up = t.events(at(5.0, 6.0, Buttons::NONE));
        assert_eq!(up, vec![InputEvent::Release { x: 5.0, y: 6.0 }, InputEvent::Click { x: 5.0, y: 6.0 }]);
    }

    #[test]
    fn secondary_press_is_context_menu() {
        let mut t = InputTracker::default();
        t.events(at(2.0, 2.0, Buttons::NONE));
        let right = Buttons { primary: false, secondary: true };
        assert_eq!(t.events(at(2.0, 2.0, right)), vec![InputEvent::ContextMenu { x: 2.0, y: 2.0 }]);
        assert!(t.events(at(2.0, 2.0, right)).is_empty());
    }

    #[test]
    fn suppress_edges_come_first() {
        let mut t = InputTracker::default();
        let down = t.events(RawInput { pos: Some((0.0, 0.0)), buttons: Buttons::NONE, suppress: true });
        assert_eq!(down[0], InputEvent::SuppressKey(true));
        let up = t.events(RawInput { pos: Some((0.0, 0.0)), buttons: Buttons::NONE, suppress: false });
        assert_eq!(up, vec![InputEvent::SuppressKey(false)]);
    }

    #[test]
    fn release_without_position_uses_last_known() {
        let mut t = InputTracker::default();
        t.events(at(7.0, 8.0, Buttons::PRIMARY));
        let up = t.events(RawInput { pos: None, buttons: Buttons::NONE, suppress: false });
        assert_eq!(up[0], InputEvent::Release { x: 7.0, y: 8.0 });
    }
}
