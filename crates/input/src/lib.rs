//! Keyboard and mouse state for the viewer.
//!
//! Window events are folded into an [`InputState`] as they arrive; the frame
//! loop calls [`InputState::begin_frame`] and then reads it once per frame.

use glam::Vec2;
use std::collections::HashSet;

/// Held keys and buttons plus motion and scroll, latched per frame.
#[derive(Debug, Default)]
pub struct InputState {
    keys_held: HashSet<KeyCode>,
    buttons_held: HashSet<MouseButton>,

    /// Motion latched by the last `begin_frame`.
    motion: Vec2,
    pending_motion: Vec2,

    /// Scroll in lines latched by the last `begin_frame` (positive = away from the user).
    scroll: f32,
    pending_scroll: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch motion and scroll gathered since the previous call.
    pub fn begin_frame(&mut self) {
        self.motion = std::mem::take(&mut self.pending_motion);
        self.scroll = std::mem::take(&mut self.pending_scroll);
    }

    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.buttons_held.insert(button);
            }
            ElementState::Released => {
                self.buttons_held.remove(&button);
            }
        }
    }

    /// Raw device motion, in unaccelerated pixels.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.pending_motion += Vec2::new(delta.0 as f32, delta.1 as f32);
    }

    /// Wheel movement, already converted to lines.
    pub fn process_scroll(&mut self, lines: f32) {
        self.pending_scroll += lines;
    }

    /// Forget held keys and buttons. Release events are not delivered to an
    /// unfocused window.
    pub fn release_all(&mut self) {
        self.keys_held.clear();
        self.buttons_held.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.buttons_held.contains(&button)
    }

    pub fn is_shift_held(&self) -> bool {
        self.is_key_held(KeyCode::ShiftLeft) || self.is_key_held(KeyCode::ShiftRight)
    }

    /// Mouse motion this frame.
    pub fn motion(&self) -> Vec2 {
        self.motion
    }

    /// Scroll lines this frame.
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Motion this frame while the left button drags, zero otherwise.
    pub fn orbit_drag(&self) -> Vec2 {
        if self.is_mouse_held(MouseButton::Left) {
            self.motion
        } else {
            Vec2::ZERO
        }
    }
}

pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
