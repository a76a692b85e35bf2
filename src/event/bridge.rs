//! Host-side plumbing between raw platform input and the canonical event
//! shape. The platform layer calls these with decoded button/motion/wheel
//! data; the bridge keeps the persistent event, assigns sequence ids and
//! invokes the root dispatch entry points.

use crate::event::{Event, KeyModifiers, MouseButton};
use crate::tree::{NodeId, Tree};
use glam::Vec2;

#[derive(Debug, Default)]
pub struct PointerBridge {
    event: Event,
}

impl PointerBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn event_mut(&mut self) -> &mut Event {
        &mut self.event
    }

    /// Button press or release. Every button transition starts a fresh
    /// pointer sequence, so nodes captured under the previous id stop
    /// matching.
    pub fn button(&mut self, tree: &mut Tree, root: NodeId, button: MouseButton, pressed: bool) {
        self.event.id += 1;
        self.event.mouse.buttons.set(button.flag(), pressed);
        if pressed {
            self.event.mouse.down = self.event.mouse.pos;
        } else {
            self.event.mouse.up = self.event.mouse.pos;
        }
        self.event.rearm();
        if pressed {
            tree.dispatch_mouse_down(root, &mut self.event);
        } else {
            tree.dispatch_mouse_up(root, &mut self.event);
        }
    }

    /// Pointer motion. The drag vector tracks pos minus the press anchor
    /// while the left button is held, and is zero otherwise.
    pub fn motion(&mut self, tree: &mut Tree, root: NodeId, pos: Vec2) {
        self.event.mouse.pos = pos;
        if self.event.mouse.buttons.contains(crate::event::MouseButtons::LEFT) {
            self.event.mouse.drag = pos - self.event.mouse.down;
        } else {
            self.event.mouse.drag = Vec2::ZERO;
        }
        self.event.rearm();
        tree.dispatch_mouse_move(root, &mut self.event);
    }

    pub fn wheel(&mut self, tree: &mut Tree, root: NodeId, delta: Vec2) {
        self.event.mouse.wheel = delta;
        self.event.rearm();
        tree.dispatch_wheel(root, &mut self.event);
    }

    pub fn set_modifiers(&mut self, modifiers: KeyModifiers) {
        self.event.modifiers = modifiers;
    }

    /// Surface resize: pins the root's size style and refreshes.
    pub fn resize(&mut self, tree: &mut Tree, root: NodeId, width: f32, height: f32) {
        self.event.rearm();
        tree.set_root_size(root, width, height, &mut self.event);
    }
}
