mod color;
mod distance;

pub use color::*;
pub use distance::*;

/// Main-axis choice for child flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arrangement {
    Horizontal,
    #[default]
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    Hidden,
    #[default]
    Visible,
    Scroll,
    Wrap,
}

/// Size constraints, each side independently optional.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeConstraint {
    pub width: Distance,
    pub height: Distance,
    pub min_width: Distance,
    pub min_height: Distance,
    pub max_width: Distance,
    pub max_height: Distance,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margin {
    pub left: Distance,
    pub right: Distance,
    pub top: Distance,
    pub bottom: Distance,
}

impl Margin {
    pub fn uniform(distance: Distance) -> Self {
        Self {
            left: distance,
            right: distance,
            top: distance,
            bottom: distance,
        }
    }
}

/// Explicit offsets from the container's edges. When a side is set it wins
/// over the flow position on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionConstraint {
    pub left: Distance,
    pub right: Distance,
    pub top: Distance,
    pub bottom: Distance,
}

impl PositionConstraint {
    pub fn is_set(&self) -> bool {
        self.left.is_set() || self.right.is_set() || self.top.is_set() || self.bottom.is_set()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Border {
    pub width: Distance,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Background {
    pub color: Color,
}

/// The full per-node style bundle consumed by the layout pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    pub position: PositionConstraint,
    pub size: SizeConstraint,
    pub margin: Margin,
    pub border: Border,
    pub background: Background,
    pub overflow: Overflow,
    pub vertical_align: Alignment,
    pub horizontal_align: Alignment,
    pub arrange: Arrangement,
}
