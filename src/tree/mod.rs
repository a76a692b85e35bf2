mod behavior;

pub use behavior::*;

use crate::event::{Event, EventKind, EventListener};
use crate::geometry::{Edges, Rect};
use crate::style::{Distance, Style};
use glam::Vec2;
use slotmap::{SlotMap, new_key_type};
use smol_str::SmolStr;

new_key_type! {
    /// Stable arena key for a node. Keys stay valid until the node is
    /// destroyed; a stale key simply fails lookups.
    pub struct NodeId;
}

/// One element of the retained tree.
///
/// Children are stored in insertion order, and that order is the z-order:
/// later children draw on top and are hit-tested first.
pub struct Node {
    pub name: SmolStr,
    pub style: Style,
    pub rect: Rect,
    pub inner_rect: Rect,
    pub scroll_offset: f32,
    pub wrap_group: usize,
    pub mouse_over: bool,
    pub capture_id: Option<u64>,
    pub dirty: bool,
    parent: Option<NodeId>,
    prime_ancestor: NodeId,
    children: Vec<NodeId>,
    pub(crate) behavior: Box<dyn Behavior>,
    pub(crate) listeners: [Vec<EventListener>; EventKind::COUNT],
}

impl Node {
    fn new(parent: Option<NodeId>, prime_ancestor: NodeId) -> Self {
        Self {
            name: SmolStr::new_static("element"),
            style: Style::default(),
            rect: Rect::ZERO,
            inner_rect: Rect::ZERO,
            scroll_offset: 0.0,
            wrap_group: 0,
            mouse_over: false,
            capture_id: None,
            dirty: true,
            parent,
            prime_ancestor,
            children: Vec::new(),
            behavior: Box::new(DefaultBehavior),
            listeners: std::array::from_fn(|_| Vec::new()),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The root of the subtree this node belongs to.
    pub fn prime_ancestor(&self) -> NodeId {
        self.prime_ancestor
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Margins resolved against this node's own rect.
    pub fn resolved_margins(&self) -> Edges {
        Edges {
            left: self.style.margin.left.resolve(self.rect.width),
            right: self.style.margin.right.resolve(self.rect.width),
            top: self.style.margin.top.resolve(self.rect.height),
            bottom: self.style.margin.bottom.resolve(self.rect.height),
        }
    }
}

/// Arena-owned element tree. Every node lives in one slot map; parent and
/// prime-ancestor links are plain keys, usable only for traversal.
#[derive(Default)]
pub struct Tree {
    nodes: SlotMap<NodeId, Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node, appending it to `parent`'s children and inheriting the
    /// parent's prime ancestor. A node created without a parent is the root
    /// of its own subtree.
    pub fn new_node(&mut self, parent: Option<NodeId>) -> NodeId {
        let prime = parent.map(|p| self.nodes[p].prime_ancestor);
        let id = self
            .nodes
            .insert_with_key(|key| Node::new(parent, prime.unwrap_or(key)));
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn set_name(&mut self, id: NodeId, name: impl Into<SmolStr>) {
        self.nodes[id].name = name.into();
    }

    pub fn style_mut(&mut self, id: NodeId) -> &mut Style {
        &mut self.nodes[id].style
    }

    /// Consumed by the scroll pass on the next layout run.
    pub fn set_scroll_offset(&mut self, id: NodeId, offset: f32) {
        self.nodes[id].scroll_offset = offset;
    }

    pub fn set_behavior(&mut self, id: NodeId, behavior: impl Behavior + 'static) {
        self.nodes[id].behavior = Box::new(behavior);
    }

    /// Re-parents `child` under `parent`, appending it at the top of the
    /// z-order and re-rooting its subtree's prime ancestor.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.nodes[child].parent {
            self.nodes[old_parent].children.retain(|&c| c != child);
        }
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        let prime = self.nodes[parent].prime_ancestor;
        self.reroot(child, prime);
    }

    /// Identity-based removal. The child keeps living in the arena as the
    /// root of its own detached subtree.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent].children.retain(|&c| c != child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
        self.reroot(child, child);
    }

    fn reroot(&mut self, id: NodeId, prime: NodeId) {
        let children = match self.nodes.get_mut(id) {
            Some(node) => {
                node.prime_ancestor = prime;
                node.children.clone()
            }
            None => return,
        };
        for child in children {
            self.reroot(child, prime);
        }
    }

    /// Destroys a node and its entire subtree, depth-first, detaching it from
    /// its parent.
    pub fn destroy(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if let Some(parent) = node.parent {
            self.nodes[parent].children.retain(|&c| c != id);
        }
        self.destroy_subtree(id);
    }

    fn destroy_subtree(&mut self, id: NodeId) {
        let children = match self.nodes.get(id) {
            Some(node) => node.children.clone(),
            None => return,
        };
        for child in children {
            self.destroy_subtree(child);
        }
        self.nodes.remove(id);
    }

    /// Containment test, routed through the node's behavior so shapes other
    /// than rects can participate in hit testing.
    pub fn contains_point(&self, id: NodeId, point: Vec2) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        node.behavior.contains(node, point)
    }

    pub fn listen(&mut self, id: NodeId, kind: EventKind, listener: EventListener) {
        self.nodes[id].listeners[kind as usize].push(listener);
    }

    /// Invokes one node's listeners for a kind, in registration order, with
    /// no descent. Sets the event's subject to the node.
    pub fn tell(&mut self, id: NodeId, kind: EventKind, event: &mut Event) {
        let listeners = match self.nodes.get(id) {
            Some(node) => node.listeners[kind as usize].clone(),
            None => return,
        };
        event.subject = Some(id);
        for listener in listeners {
            listener.call(self, id, event);
        }
    }

    /// Marks the node and all its ancestors dirty. Strictly upward; never
    /// descends. The root's refresh listeners are notified when the bubble
    /// reaches it, so the owner can schedule the next layout/draw cycle.
    pub fn refresh(&mut self, id: NodeId, event: &mut Event) {
        let mut current = Some(id);
        while let Some(key) = current {
            let Some(node) = self.nodes.get_mut(key) else {
                return;
            };
            node.dirty = true;
            current = node.parent;
            if current.is_none() {
                log::trace!("refresh reached root {:?}", key);
                self.tell(key, EventKind::Refresh, event);
            }
        }
    }

    /// Observes and clears the dirty flag, conventionally on the root.
    pub fn take_dirty(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                let was_dirty = node.dirty;
                node.dirty = false;
                was_dirty
            }
            None => false,
        }
    }

    /// Host notification that the output surface changed size: pins the root
    /// style to the new extent and requests a refresh.
    pub fn set_root_size(&mut self, root: NodeId, width: f32, height: f32, event: &mut Event) {
        log::debug!("root resized to {width}x{height}");
        if let Some(node) = self.nodes.get_mut(root) {
            node.style.size.width = Distance::px(width);
            node.style.size.height = Distance::px(height);
        }
        self.refresh(root, event);
    }
}

macro_rules! impl_listen_shorthand {
    ($($method:ident => $kind:ident),* $(,)?) => {
        impl Tree {
            $(
                pub fn $method<F>(&mut self, id: NodeId, handler: F)
                where
                    F: FnMut(&mut Tree, NodeId, &mut Event) + 'static,
                {
                    self.listen(id, EventKind::$kind, EventListener::new(handler));
                }
            )*
        }
    };
}

impl_listen_shorthand! {
    on_mouse_down => MouseDown,
    on_mouse_up => MouseUp,
    on_mouse_move => MouseMove,
    on_drag => Drag,
    on_wheel => Wheel,
    on_mouse_enter => MouseEnter,
    on_mouse_leave => MouseLeave,
    on_refresh => Refresh,
}
