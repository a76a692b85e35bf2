//! Seam to the pixel rendering backend. The core never draws pixels itself;
//! it walks the resolved tree and issues primitive calls through this trait.

use crate::geometry::Rect;
use crate::style::{Color, Overflow};
use crate::tree::{NodeId, Tree};
use glam::Vec2;

pub trait RenderBackend {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String>;
    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) -> Result<(), String>;
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) -> Result<(), String>;
    fn stroke_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        color: Color,
        line_width: f32,
    ) -> Result<(), String>;
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, line_width: f32) -> Result<(), String>;
    /// Textured glyph quad: destination rect plus atlas coordinates.
    fn glyph_quad(&mut self, rect: Rect, uv: Rect, color: Color) -> Result<(), String>;
    /// `Some` establishes a scissor region, `None` releases it.
    fn set_clip(&mut self, clip: Option<Rect>) -> Result<(), String>;
}

impl Tree {
    /// Draws a resolved subtree: each node's draw hook runs before its
    /// children, children composite in insertion order (forward iteration;
    /// hit testing is the reverse), and `Overflow::Hidden` clips children to
    /// the node's rect. Clears the dirty flag on the way out.
    pub fn draw(&mut self, id: NodeId, backend: &mut dyn RenderBackend) -> Result<(), String> {
        let Some(node) = self.get(id) else {
            return Ok(());
        };
        let rect = node.rect;
        let clipped = node.style.overflow == Overflow::Hidden;
        let children: Vec<NodeId> = node.children().to_vec();

        node.behavior.draw(node, backend)?;

        if clipped {
            backend.set_clip(Some(rect))?;
        }
        for child in children {
            self.draw(child, backend)?;
        }
        if clipped {
            backend.set_clip(None)?;
        }

        if let Some(node) = self.get_mut(id) {
            node.dirty = false;
        }
        Ok(())
    }
}
