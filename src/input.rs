//! Pointer tracking over window events.
//!
//! [`Pointer`] folds raw winit cursor events into the one piece of input the
//! force model reads: the latest cursor position in logical coordinates plus
//! whether the cursor is currently over the window. Leaving the window
//! deactivates the pointer; the remembered position is then ignored.

use glam::Vec2;
use winit::event::WindowEvent;

/// Current pointer state, updated by the driver and read by the force model.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Pointer {
    position: Vec2,
    active: bool,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest cursor position in logical coordinates.
    ///
    /// Only meaningful while [`active`](Self::active) returns true.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whether the cursor is currently over the window.
    #[inline]
    pub fn active(&self) -> bool {
        self.active
    }

    /// Place the pointer programmatically. Used by embedders that feed
    /// synthetic pointer positions, and by tests.
    pub fn set(&mut self, position: Vec2) {
        self.position = position;
        self.active = true;
    }

    /// Deactivate the pointer.
    pub fn clear(&mut self) {
        self.active = false;
    }

    /// Fold a window event into the pointer state. `scale_factor` converts
    /// the physical cursor position into logical coordinates.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent, scale_factor: f64) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(scale_factor);
                self.set(Vec2::new(logical.x, logical.y));
            }
            WindowEvent::CursorLeft { .. } => self.clear(),
            _ => {}
        }
    }
}
