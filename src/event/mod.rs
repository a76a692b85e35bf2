mod bridge;
mod dispatch;

pub use bridge::*;

use crate::tree::{NodeId, Tree};
use bitflags::bitflags;
use glam::Vec2;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Back,
    Forward,
}

bitflags! {
    /// The set of buttons currently held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const MIDDLE = 1 << 1;
        const RIGHT = 1 << 2;
        const BACK = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

impl MouseButton {
    pub fn flag(self) -> MouseButtons {
        match self {
            Self::Left => MouseButtons::LEFT,
            Self::Middle => MouseButtons::MIDDLE,
            Self::Right => MouseButtons::RIGHT,
            Self::Back => MouseButtons::BACK,
            Self::Forward => MouseButtons::FORWARD,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeyModifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

/// Pointer state carried on every event: current position, press/release
/// anchors, the live drag vector and the wheel delta.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub down: Vec2,
    pub up: Vec2,
    pub pos: Vec2,
    pub drag: Vec2,
    pub wheel: Vec2,
    pub buttons: MouseButtons,
}

/// The ephemeral record passed by mutable reference through one dispatch.
///
/// Only `id` carries meaning across dispatches: it identifies one
/// press-to-release pointer sequence and is compared against the capture id
/// nodes store on press.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: u64,
    pub propagate: bool,
    pub subject: Option<NodeId>,
    pub mouse: MouseState,
    pub modifiers: KeyModifiers,
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}

impl Event {
    pub fn new() -> Self {
        Self {
            id: 0,
            propagate: true,
            subject: None,
            mouse: MouseState::default(),
            modifiers: KeyModifiers::default(),
        }
    }

    /// Halts descent for the remainder of the current dispatch.
    pub fn consume(&mut self) {
        self.propagate = false;
    }

    /// The dispatch originator must call this before starting a new,
    /// independent dispatch.
    pub fn rearm(&mut self) {
        self.propagate = true;
        self.subject = None;
    }
}

/// The event kinds a node keeps independent listener lists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    MouseDown,
    MouseUp,
    MouseMove,
    Drag,
    Wheel,
    MouseEnter,
    MouseLeave,
    Refresh,
}

impl EventKind {
    pub const COUNT: usize = 8;
}

fn next_listener_id() -> u64 {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A registered callback. Listeners run synchronously inline during
/// propagation and may mutate the tree or the event.
#[derive(Clone)]
pub struct EventListener {
    id: u64,
    handler: Rc<RefCell<dyn FnMut(&mut Tree, NodeId, &mut Event)>>,
}

impl EventListener {
    pub fn new<F>(handler: F) -> Self
    where
        F: FnMut(&mut Tree, NodeId, &mut Event) + 'static,
    {
        Self {
            id: next_listener_id(),
            handler: Rc::new(RefCell::new(handler)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn call(&self, tree: &mut Tree, node: NodeId, event: &mut Event) {
        (self.handler.borrow_mut())(tree, node, event);
    }
}

impl PartialEq for EventListener {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListener")
            .field("id", &self.id)
            .finish()
    }
}
