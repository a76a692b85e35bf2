//! Depth-first pointer dispatch over the element tree.
//!
//! Contract, common to every kind: a node's own listeners run first; clearing
//! the event's propagate flag halts descent for the remainder of the current
//! dispatch. Children are visited in reverse insertion order, so the topmost
//! sibling in z-order is hit-tested first (drawing iterates forward).

use crate::event::{Event, EventKind, MouseButtons};
use crate::tree::{NodeId, Tree};

impl Tree {
    /// Pointer press. A child whose containment test matches stores the
    /// event's id as its capture id *before* its own listeners run; that id
    /// routes later move/drag/up traffic to it until a new press.
    pub fn dispatch_mouse_down(&mut self, id: NodeId, event: &mut Event) {
        log::trace!("mouse down #{} at {:?}", event.id, event.mouse.pos);
        self.tell(id, EventKind::MouseDown, event);
        if !event.propagate {
            return;
        }
        for child in self.children_topmost_first(id) {
            if self.contains_point(child, event.mouse.pos) {
                if let Some(node) = self.get_mut(child) {
                    node.capture_id = Some(event.id);
                }
                self.dispatch_mouse_down(child, event);
            }
            if !event.propagate {
                return;
            }
        }
    }

    pub fn dispatch_mouse_up(&mut self, id: NodeId, event: &mut Event) {
        self.tell(id, EventKind::MouseUp, event);
        if !event.propagate {
            return;
        }
        for child in self.children_topmost_first(id) {
            if self.contains_point(child, event.mouse.pos) {
                self.dispatch_mouse_up(child, event);
            }
            if !event.propagate {
                return;
            }
        }
    }

    /// Pointer motion. Per child: forward drag when a button is held and the
    /// child holds this sequence's capture id (containment does not matter),
    /// synthesize enter/leave on containment transitions, then forward the
    /// move itself to containing children.
    pub fn dispatch_mouse_move(&mut self, id: NodeId, event: &mut Event) {
        self.tell(id, EventKind::MouseMove, event);
        if !event.propagate {
            return;
        }
        let dragging = event
            .mouse
            .buttons
            .intersects(MouseButtons::LEFT | MouseButtons::RIGHT);
        for child in self.children_topmost_first(id) {
            let Some(node) = self.get(child) else {
                continue;
            };
            let was_over = node.mouse_over;
            let captured = node.capture_id == Some(event.id);
            let contains = self.contains_point(child, event.mouse.pos);

            if dragging && captured {
                self.dispatch_drag(child, event);
            }
            if contains && !was_over {
                if let Some(node) = self.get_mut(child) {
                    node.mouse_over = true;
                }
                self.dispatch_mouse_enter(child, event);
            }
            if !contains && was_over {
                if let Some(node) = self.get_mut(child) {
                    node.mouse_over = false;
                }
                self.dispatch_mouse_leave(child, event);
            }
            if contains {
                self.dispatch_mouse_move(child, event);
            }
            if !event.propagate {
                return;
            }
        }
    }

    /// Drag routes purely by capture id: the pointer may be far outside the
    /// child's bounds and the drag must still reach it.
    pub fn dispatch_drag(&mut self, id: NodeId, event: &mut Event) {
        self.tell(id, EventKind::Drag, event);
        if !event.propagate {
            return;
        }
        for child in self.children_topmost_first(id) {
            let captured = self
                .get(child)
                .is_some_and(|node| node.capture_id == Some(event.id));
            if captured {
                self.dispatch_drag(child, event);
            }
            if !event.propagate {
                return;
            }
        }
    }

    pub fn dispatch_wheel(&mut self, id: NodeId, event: &mut Event) {
        self.tell(id, EventKind::Wheel, event);
        if !event.propagate {
            return;
        }
        for child in self.children_topmost_first(id) {
            if self.contains_point(child, event.mouse.pos) {
                self.dispatch_wheel(child, event);
            }
            if !event.propagate {
                return;
            }
        }
    }

    /// Standalone enter dispatch: diffs containment against each child's
    /// stored over-flag, for when containment changes without pointer motion
    /// (e.g. after a resize).
    pub fn dispatch_mouse_enter(&mut self, id: NodeId, event: &mut Event) {
        self.tell(id, EventKind::MouseEnter, event);
        if !event.propagate {
            return;
        }
        for child in self.children_topmost_first(id) {
            let Some(node) = self.get(child) else {
                continue;
            };
            let was_over = node.mouse_over;
            if self.contains_point(child, event.mouse.pos) && !was_over {
                if let Some(node) = self.get_mut(child) {
                    node.mouse_over = true;
                }
                self.dispatch_mouse_enter(child, event);
            }
            if !event.propagate {
                return;
            }
        }
    }

    pub fn dispatch_mouse_leave(&mut self, id: NodeId, event: &mut Event) {
        self.tell(id, EventKind::MouseLeave, event);
        if !event.propagate {
            return;
        }
        for child in self.children_topmost_first(id) {
            let Some(node) = self.get(child) else {
                continue;
            };
            let was_over = node.mouse_over;
            if !self.contains_point(child, event.mouse.pos) && was_over {
                if let Some(node) = self.get_mut(child) {
                    node.mouse_over = false;
                }
                self.dispatch_mouse_leave(child, event);
            }
            if !event.propagate {
                return;
            }
        }
    }

    /// Hit testing iterates children in reverse insertion order; listeners
    /// may destroy nodes mid-dispatch, so stale keys are skipped by lookup.
    fn children_topmost_first(&self, id: NodeId) -> Vec<NodeId> {
        match self.get(id) {
            Some(node) => node.children().iter().rev().copied().collect(),
            None => Vec::new(),
        }
    }
}
