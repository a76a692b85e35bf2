//! Retained-mode UI core: an arena-backed element tree, a multi-pass
//! geometry resolver and a pointer/refresh event router. Rendering and
//! windowing live behind the [`backend::RenderBackend`] seam; a host
//! feeds decoded platform input through [`event::PointerBridge`].

pub mod backend;
pub mod event;
pub mod geometry;
pub mod layout;
pub mod style;
pub mod tree;

pub use backend::RenderBackend;
pub use event::{
    Event, EventKind, EventListener, KeyModifiers, MouseButton, MouseButtons, MouseState,
    PointerBridge,
};
pub use geometry::{Edges, Rect, Size};
pub use layout::LayoutContext;
pub use style::{
    Alignment, Arrangement, Background, Border, Color, Distance, DistanceMode, Margin, Overflow,
    PositionConstraint, SizeConstraint, Style,
};
pub use tree::{Behavior, DefaultBehavior, Node, NodeId, Tree};
