use crate::backend::RenderBackend;
use crate::geometry::Size;
use crate::tree::Node;
use glam::Vec2;

/// Per-node capability hooks: containment, intrinsic measurement, drawing.
///
/// Most nodes keep the defaults. A node swaps in its own implementation to
/// change one contract without touching the others, e.g. a dial replaces
/// `contains` with a radial test, a text node supplies `measure`.
pub trait Behavior {
    /// Whether `point` lies within the node. The default tests the node's
    /// rect; degenerate rects contain nothing.
    fn contains(&self, node: &Node, point: Vec2) -> bool {
        node.rect.contains(point)
    }

    /// Intrinsic content size at the given scale. Returning `Some` replaces
    /// the child-sum during static sizing.
    fn measure(&self, _scale: f32) -> Option<Size> {
        None
    }

    /// Draws the node itself; children are drawn by the tree traversal
    /// afterwards. The default fills the background when visible.
    fn draw(&self, node: &Node, backend: &mut dyn RenderBackend) -> Result<(), String> {
        if node.style.background.color.is_visible() {
            backend.fill_rect(node.rect, node.style.background.color)?;
        }
        if node.style.border.color.is_visible() {
            let reference = node.rect.width.min(node.rect.height);
            backend.stroke_rect(
                node.rect,
                node.style.border.color,
                node.style.border.width.resolve(reference).max(1.0),
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBehavior;

impl Behavior for DefaultBehavior {}
