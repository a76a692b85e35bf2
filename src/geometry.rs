use glam::Vec2;

/// Axis-aligned rectangle in viewport coordinates.
///
/// Layout may produce degenerate rects (zero or negative extents) from
/// hostile style input; `contains` treats those as empty so the node is
/// simply non-interactive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        point.x >= self.x
            && point.y >= self.y
            && point.x <= self.x + self.width
            && point.y <= self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Per-side offsets, already resolved to concrete values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Edges {
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;
    use glam::Vec2;

    #[test]
    fn contains_includes_edges() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(30.0, 30.0)));
        assert!(rect.contains(Vec2::new(15.0, 25.0)));
        assert!(!rect.contains(Vec2::new(9.9, 15.0)));
        assert!(!rect.contains(Vec2::new(15.0, 30.1)));
    }

    #[test]
    fn degenerate_rect_contains_nothing() {
        let empty = Rect::new(10.0, 10.0, 0.0, 20.0);
        assert!(!empty.contains(Vec2::new(10.0, 15.0)));

        let inverted = Rect::new(10.0, 10.0, -5.0, -5.0);
        assert!(!inverted.contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn center_is_midpoint() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        assert_eq!(rect.center(), Vec2::new(50.0, 20.0));
    }
}
