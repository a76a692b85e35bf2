//! Geometry resolution: six ordered traversals that turn style constraints
//! into concrete rects, run over the whole subtree once per frame.
//!
//! Order matters. Static sizes must exist before relative ones can resolve
//! against a parent, arrangement needs final sizes, alignment needs flow
//! positions and wrap groups, scroll shifts arranged positions, and the inner
//! rect summarises the final child rects.

use crate::geometry::{Rect, Size};
use crate::style::{Alignment, Arrangement, Overflow};
use crate::tree::{NodeId, Tree};

/// Shared state for one layout run, passed explicitly instead of living on
/// the nodes. `scale` feeds the content measurement hook.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext {
    pub scale: f32,
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Tree {
    /// Runs the full pipeline over `root`'s subtree. O(n) per pass; there is
    /// no partial re-layout.
    pub fn run_layout(&mut self, root: NodeId, ctx: &LayoutContext) {
        self.resolve_static_size(root, ctx);
        self.resolve_relative_size(root);
        self.arrange_children(root);
        self.align_children(root);
        self.apply_scroll(root, 0.0);
        self.compute_inner_rect(root);
    }

    /// Pass 1, children before parent: sum child sizes plus margins along the
    /// main axis, keep the maximum along the cross axis. A measurement hook
    /// replaces the child sum for content nodes; a set absolute width/height
    /// overrides everything.
    pub fn resolve_static_size(&mut self, id: NodeId, ctx: &LayoutContext) -> Size {
        let children = self.nodes_children(id);
        let arrange = self.node(id).style.arrange;

        let mut size = Size::ZERO;
        for &child in &children {
            let child_size = self.resolve_static_size(child, ctx);
            let margins = self.node(child).resolved_margins();
            match arrange {
                Arrangement::Horizontal => {
                    size.width += child_size.width + margins.horizontal();
                    size.height = size.height.max(child_size.height + margins.vertical());
                }
                Arrangement::Vertical => {
                    size.height += child_size.height + margins.vertical();
                    size.width = size.width.max(child_size.width + margins.horizontal());
                }
            }
        }

        if let Some(intrinsic) = self.node(id).behavior.measure(ctx.scale) {
            size = intrinsic;
        }

        let node = self.node_mut(id);
        if node.style.size.width.is_absolute() {
            size.width = node.style.size.width.value();
        }
        if node.style.size.height.is_absolute() {
            size.height = node.style.size.height.value();
        }
        node.rect.width = size.width;
        node.rect.height = size.height;
        size
    }

    /// Pass 2, parent before children: resolve proportional sizes against the
    /// parent's already-final rect, then clamp max before min so a min
    /// constraint wins a conflict. The root resolves against its own rect.
    pub fn resolve_relative_size(&mut self, id: NodeId) {
        let parent_rect = self.parent_rect(id);
        let size = self.node(id).style.size;
        let mut rect = self.node(id).rect;

        if size.width.is_set() {
            rect.width = size.width.resolve(parent_rect.width);
        }
        if size.height.is_set() {
            rect.height = size.height.resolve(parent_rect.height);
        }
        if size.max_width.is_set() {
            rect.width = rect.width.min(size.max_width.resolve(parent_rect.width));
        }
        if size.min_width.is_set() {
            rect.width = rect.width.max(size.min_width.resolve(parent_rect.width));
        }
        if size.max_height.is_set() {
            rect.height = rect.height.min(size.max_height.resolve(parent_rect.height));
        }
        if size.min_height.is_set() {
            rect.height = rect.height.max(size.min_height.resolve(parent_rect.height));
        }
        self.node_mut(id).rect = rect;

        for child in self.nodes_children(id) {
            self.resolve_relative_size(child);
        }
    }

    /// Pass 3, parent before children: flow children along the main axis in
    /// list order with a running cursor. With `Overflow::Wrap`, a child that
    /// would overrun the container's main extent starts a new wrap-group on
    /// the next cross-axis line. Explicit position offsets are applied after
    /// flow and win for their axis.
    pub fn arrange_children(&mut self, id: NodeId) {
        let rect = self.node(id).rect;
        let arrange = self.node(id).style.arrange;
        let wrap = self.node(id).style.overflow == Overflow::Wrap;
        let children = self.nodes_children(id);

        let mut cursor_x = rect.x;
        let mut cursor_y = rect.y;
        let mut group = 0_usize;

        for &child in &children {
            let margins = self.node(child).resolved_margins();
            let child_size = Size::new(self.node(child).rect.width, self.node(child).rect.height);

            match arrange {
                Arrangement::Horizontal => {
                    if wrap && cursor_x + child_size.width + margins.horizontal() > rect.right() {
                        cursor_x = rect.x;
                        cursor_y += child_size.height + margins.bottom;
                        group += 1;
                    }
                    let node = self.node_mut(child);
                    node.rect.x = cursor_x + margins.left;
                    node.rect.y = cursor_y + margins.top;
                    node.wrap_group = group;
                    cursor_x += child_size.width + margins.horizontal();
                }
                Arrangement::Vertical => {
                    if wrap && cursor_y + child_size.height + margins.vertical() > rect.bottom() {
                        cursor_y = rect.y;
                        cursor_x += child_size.width + margins.right;
                        group += 1;
                    }
                    let node = self.node_mut(child);
                    node.rect.x = cursor_x + margins.left;
                    node.rect.y = cursor_y + margins.top;
                    node.wrap_group = group;
                    cursor_y += child_size.height + margins.vertical();
                }
            }
        }

        self.apply_position_overrides(id, &children);

        for child in children {
            self.arrange_children(child);
        }
    }

    /// Pass 4, parent before children: per wrap-group, move the
    /// margin-inclusive bounding box of flow-positioned children to satisfy
    /// the container's alignment. On the axis orthogonal to the arrangement,
    /// centering additionally nudges each child to the group's own center.
    /// Explicitly positioned children neither contribute to the box nor move.
    pub fn align_children(&mut self, id: NodeId) {
        let rect = self.node(id).rect;
        let arrange = self.node(id).style.arrange;
        let horizontal_align = self.node(id).style.horizontal_align;
        let vertical_align = self.node(id).style.vertical_align;
        let children = self.nodes_children(id);

        let group_count = children
            .iter()
            .map(|&c| self.node(c).wrap_group + 1)
            .max()
            .unwrap_or(0);
        let mut groups: Vec<Vec<NodeId>> = vec![Vec::new(); group_count];
        for &child in &children {
            let group = self.node(child).wrap_group;
            groups[group].push(child);
        }

        for group in &groups {
            let mut min_x = f32::MAX;
            let mut min_y = f32::MAX;
            let mut max_x = f32::MIN;
            let mut max_y = f32::MIN;
            let mut movable = 0_usize;

            for &child in group {
                let node = self.node(child);
                if node.style.position.is_set() {
                    continue;
                }
                movable += 1;
                let margins = node.resolved_margins();
                min_x = min_x.min(node.rect.x - margins.left);
                min_y = min_y.min(node.rect.y - margins.top);
                max_x = max_x.max(node.rect.right() + margins.right);
                max_y = max_y.max(node.rect.bottom() + margins.bottom);
            }
            if movable == 0 {
                continue;
            }

            let group_center_x = min_x + (max_x - min_x) / 2.0;
            let group_center_y = min_y + (max_y - min_y) / 2.0;
            let offset_x = rect.center().x - group_center_x;
            let offset_y = rect.center().y - group_center_y;

            for &child in group {
                if self.node(child).style.position.is_set() {
                    continue;
                }
                let child_center = self.node(child).rect.center();
                let node = self.node_mut(child);

                match horizontal_align {
                    Alignment::Start => node.rect.x += rect.x - min_x,
                    Alignment::Center => {
                        node.rect.x += offset_x;
                        if arrange == Arrangement::Vertical {
                            node.rect.x += group_center_x - child_center.x;
                        }
                    }
                    Alignment::End => node.rect.x += rect.right() - max_x,
                }

                match vertical_align {
                    Alignment::Start => node.rect.y += rect.y - min_y,
                    Alignment::Center => {
                        node.rect.y += offset_y;
                        if arrange == Arrangement::Horizontal {
                            node.rect.y += group_center_y - child_center.y;
                        }
                    }
                    Alignment::End => node.rect.y += rect.bottom() - max_y,
                }
            }
        }

        // Positioned children must come out of alignment untouched.
        self.apply_position_overrides(id, &children);

        for child in children {
            self.align_children(child);
        }
    }

    /// Pass 5, parent before children: the inherited offset plus this node's
    /// own scroll offset shifts every child vertically, and the combined
    /// offset is passed down.
    pub fn apply_scroll(&mut self, id: NodeId, inherited: f32) {
        let offset = inherited + self.node(id).scroll_offset;
        let children = self.nodes_children(id);
        for &child in &children {
            self.node_mut(child).rect.y += offset;
        }
        for child in children {
            self.apply_scroll(child, offset);
        }
    }

    /// Pass 6: the content bounding box, the tightest rect enclosing every
    /// child rect expanded by that child's margins. Consumed externally for
    /// scroll-range and overflow decisions; never feeds back into layout.
    pub fn compute_inner_rect(&mut self, id: NodeId) {
        let children = self.nodes_children(id);

        if children.is_empty() {
            let rect = self.node(id).rect;
            self.node_mut(id).inner_rect = Rect::new(rect.x, rect.y, 0.0, 0.0);
        } else {
            let mut min_x = f32::MAX;
            let mut min_y = f32::MAX;
            let mut max_x = f32::MIN;
            let mut max_y = f32::MIN;

            for &child in &children {
                let node = self.node(child);
                let margins = node.resolved_margins();
                min_x = min_x.min(node.rect.x - margins.left);
                min_y = min_y.min(node.rect.y - margins.top);
                max_x = max_x.max(node.rect.right() + margins.right);
                max_y = max_y.max(node.rect.bottom() + margins.bottom);
            }
            self.node_mut(id).inner_rect = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);
        }

        for child in children {
            self.compute_inner_rect(child);
        }
    }

    fn apply_position_overrides(&mut self, id: NodeId, children: &[NodeId]) {
        let rect = self.node(id).rect;
        for &child in children {
            let position = self.node(child).style.position;
            let child_rect = self.node(child).rect;
            let node = self.node_mut(child);
            if position.left.is_set() {
                node.rect.x = rect.x + position.left.resolve(rect.width);
            }
            if position.right.is_set() {
                node.rect.x =
                    rect.right() - child_rect.width - position.right.resolve(rect.width);
            }
            if position.top.is_set() {
                node.rect.y = rect.y + position.top.resolve(rect.height);
            }
            if position.bottom.is_set() {
                node.rect.y =
                    rect.bottom() - child_rect.height - position.bottom.resolve(rect.height);
            }
        }
    }

    fn parent_rect(&self, id: NodeId) -> Rect {
        match self.node(id).parent() {
            Some(parent) => self.node(parent).rect,
            None => self.node(id).rect,
        }
    }

    fn nodes_children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).children().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::LayoutContext;
    use crate::geometry::Size;
    use crate::style::{Alignment, Arrangement, Distance, Overflow};
    use crate::tree::{Behavior, NodeId, Tree};

    struct FixedContent {
        size: Size,
    }

    impl Behavior for FixedContent {
        fn measure(&self, scale: f32) -> Option<Size> {
            Some(Size::new(self.size.width * scale, self.size.height * scale))
        }
    }

    fn horizontal_container(tree: &mut Tree, width: f32, height: f32) -> NodeId {
        let root = tree.new_node(None);
        let node = tree.node_mut(root);
        node.style.arrange = Arrangement::Horizontal;
        node.style.size.width = Distance::px(width);
        node.style.size.height = Distance::px(height);
        root
    }

    fn sized_child(tree: &mut Tree, parent: NodeId, width: f32, height: f32) -> NodeId {
        let child = tree.new_node(Some(parent));
        let node = tree.node_mut(child);
        node.style.size.width = Distance::px(width);
        node.style.size.height = Distance::px(height);
        child
    }

    #[test]
    fn static_size_sums_main_axis_and_maxes_cross_axis() {
        let mut tree = Tree::new();
        let root = tree.new_node(None);
        tree.node_mut(root).style.arrange = Arrangement::Horizontal;
        sized_child(&mut tree, root, 20.0, 10.0);
        sized_child(&mut tree, root, 30.0, 25.0);
        let tall = sized_child(&mut tree, root, 40.0, 15.0);
        tree.node_mut(tall).style.margin.top = Distance::px(5.0);

        let size = tree.resolve_static_size(root, &LayoutContext::default());

        assert_eq!(size.width, 90.0);
        assert_eq!(size.height, 25.0);
        assert_eq!(tree.node(root).rect.width, 90.0);
    }

    #[test]
    fn absolute_size_override_beats_child_sum() {
        let mut tree = Tree::new();
        let root = tree.new_node(None);
        tree.node_mut(root).style.size.width = Distance::px(400.0);
        sized_child(&mut tree, root, 20.0, 10.0);

        let size = tree.resolve_static_size(root, &LayoutContext::default());
        assert_eq!(size.width, 400.0);
        // Height stays computed: the override is per axis.
        assert_eq!(size.height, 10.0);
    }

    #[test]
    fn measurement_hook_replaces_child_sum() {
        let mut tree = Tree::new();
        let text = tree.new_node(None);
        tree.set_behavior(
            text,
            FixedContent {
                size: Size::new(48.0, 12.0),
            },
        );

        let size = tree.resolve_static_size(text, &LayoutContext { scale: 2.0 });
        assert_eq!(size, Size::new(96.0, 24.0));
        assert_eq!(tree.node(text).rect.width, 96.0);
    }

    #[test]
    fn relative_size_resolves_against_parent_rect() {
        let mut tree = Tree::new();
        let root = horizontal_container(&mut tree, 200.0, 100.0);
        let child = tree.new_node(Some(root));
        tree.node_mut(child).style.size.width = Distance::pct(50.0);
        tree.node_mut(child).style.size.height = Distance::pct(25.0);

        tree.resolve_static_size(root, &LayoutContext::default());
        tree.resolve_relative_size(root);

        assert_eq!(tree.node(child).rect.width, 100.0);
        assert_eq!(tree.node(child).rect.height, 25.0);
    }

    #[test]
    fn min_constraint_wins_over_max() {
        let mut tree = Tree::new();
        let root = horizontal_container(&mut tree, 200.0, 100.0);
        let child = tree.new_node(Some(root));
        let style = &mut tree.node_mut(child).style;
        style.size.width = Distance::pct(50.0);
        style.size.max_width = Distance::px(40.0);
        style.size.min_width = Distance::px(60.0);

        tree.resolve_static_size(root, &LayoutContext::default());
        tree.resolve_relative_size(root);

        assert_eq!(tree.node(child).rect.width, 60.0);
    }

    #[test]
    fn relative_pass_is_idempotent_without_proportional_constraints() {
        let mut tree = Tree::new();
        let root = horizontal_container(&mut tree, 120.0, 60.0);
        sized_child(&mut tree, root, 20.0, 10.0);
        sized_child(&mut tree, root, 30.0, 20.0);

        tree.resolve_static_size(root, &LayoutContext::default());
        tree.resolve_relative_size(root);
        let snapshot: Vec<_> = tree
            .node(root)
            .children()
            .iter()
            .map(|&c| tree.node(c).rect)
            .collect();

        tree.resolve_relative_size(root);
        let again: Vec<_> = tree
            .node(root)
            .children()
            .iter()
            .map(|&c| tree.node(c).rect)
            .collect();
        assert_eq!(snapshot, again);
    }

    #[test]
    fn arrangement_positions_are_monotonic_without_overlap() {
        let mut tree = Tree::new();
        let root = horizontal_container(&mut tree, 500.0, 50.0);
        let a = sized_child(&mut tree, root, 20.0, 10.0);
        let b = sized_child(&mut tree, root, 30.0, 10.0);
        let c = sized_child(&mut tree, root, 40.0, 10.0);

        tree.resolve_static_size(root, &LayoutContext::default());
        tree.resolve_relative_size(root);
        tree.arrange_children(root);

        assert_eq!(tree.node(a).rect.x, 0.0);
        assert_eq!(tree.node(b).rect.x, 20.0);
        assert_eq!(tree.node(c).rect.x, 50.0);
        assert!(tree.node(a).rect.right() <= tree.node(b).rect.x);
        assert!(tree.node(b).rect.right() <= tree.node(c).rect.x);
    }

    #[test]
    fn centering_matches_worked_example() {
        // Container of width 100, three children 20/30/40: static width 90,
        // horizontal centering shifts the row by (100 - 90) / 2 = 5.
        let mut tree = Tree::new();
        let root = horizontal_container(&mut tree, 100.0, 50.0);
        tree.node_mut(root).style.horizontal_align = Alignment::Center;
        let a = sized_child(&mut tree, root, 20.0, 10.0);
        let b = sized_child(&mut tree, root, 30.0, 10.0);
        let c = sized_child(&mut tree, root, 40.0, 10.0);

        tree.resolve_static_size(root, &LayoutContext::default());
        tree.resolve_relative_size(root);
        tree.arrange_children(root);
        tree.align_children(root);

        assert_eq!(tree.node(a).rect.x, 5.0);
        assert_eq!(tree.node(b).rect.x, 25.0);
        assert_eq!(tree.node(c).rect.x, 55.0);
    }

    #[test]
    fn centered_group_box_lands_on_container_center() {
        let mut tree = Tree::new();
        let root = horizontal_container(&mut tree, 200.0, 100.0);
        tree.node_mut(root).style.horizontal_align = Alignment::Center;
        tree.node_mut(root).style.vertical_align = Alignment::Center;
        let a = sized_child(&mut tree, root, 30.0, 20.0);
        let b = sized_child(&mut tree, root, 50.0, 40.0);

        tree.run_layout(root, &LayoutContext::default());

        let min_x = tree.node(a).rect.x;
        let max_x = tree.node(b).rect.right();
        assert_eq!(min_x + (max_x - min_x) / 2.0, 100.0);

        // Cross-axis centering applies per child, not just per group.
        assert_eq!(tree.node(a).rect.center().y, 50.0);
        assert_eq!(tree.node(b).rect.center().y, 50.0);
    }

    #[test]
    fn end_alignment_anchors_to_far_edge() {
        let mut tree = Tree::new();
        let root = horizontal_container(&mut tree, 100.0, 50.0);
        tree.node_mut(root).style.horizontal_align = Alignment::End;
        tree.node_mut(root).style.vertical_align = Alignment::End;
        let child = sized_child(&mut tree, root, 40.0, 20.0);

        tree.run_layout(root, &LayoutContext::default());

        assert_eq!(tree.node(child).rect.right(), 100.0);
        assert_eq!(tree.node(child).rect.bottom(), 50.0);
    }

    #[test]
    fn wrap_breaks_lines_and_records_groups() {
        let mut tree = Tree::new();
        let root = horizontal_container(&mut tree, 100.0, 200.0);
        tree.node_mut(root).style.overflow = Overflow::Wrap;
        let a = sized_child(&mut tree, root, 60.0, 10.0);
        let b = sized_child(&mut tree, root, 60.0, 10.0);
        let c = sized_child(&mut tree, root, 20.0, 10.0);

        tree.resolve_static_size(root, &LayoutContext::default());
        tree.resolve_relative_size(root);
        tree.arrange_children(root);

        assert_eq!(tree.node(a).wrap_group, 0);
        assert_eq!(tree.node(b).wrap_group, 1);
        assert_eq!(tree.node(c).wrap_group, 1);
        assert_eq!(tree.node(b).rect.x, 0.0);
        assert!(tree.node(b).rect.y > tree.node(a).rect.y);
        assert_eq!(tree.node(c).rect.x, 60.0);
    }

    #[test]
    fn explicit_position_wins_and_escapes_alignment() {
        let mut tree = Tree::new();
        let root = horizontal_container(&mut tree, 100.0, 100.0);
        tree.node_mut(root).style.horizontal_align = Alignment::Center;
        tree.node_mut(root).style.vertical_align = Alignment::Center;
        let flowed = sized_child(&mut tree, root, 20.0, 20.0);
        let pinned = sized_child(&mut tree, root, 10.0, 10.0);
        tree.node_mut(pinned).style.position.right = Distance::px(5.0);
        tree.node_mut(pinned).style.position.bottom = Distance::px(5.0);

        tree.run_layout(root, &LayoutContext::default());

        assert_eq!(tree.node(pinned).rect.x, 85.0);
        assert_eq!(tree.node(pinned).rect.y, 85.0);
        // The flowed child is centered alone; the pinned one never joined
        // the group box.
        assert_eq!(tree.node(flowed).rect.center().x, 50.0);
    }

    #[test]
    fn scroll_offsets_accumulate_down_the_tree() {
        let mut tree = Tree::new();
        let root = tree.new_node(None);
        let outer = tree.new_node(Some(root));
        let inner = tree.new_node(Some(outer));
        let leaf = tree.new_node(Some(inner));
        tree.node_mut(root).scroll_offset = -10.0;
        tree.node_mut(outer).scroll_offset = -5.0;

        tree.apply_scroll(root, 0.0);

        assert_eq!(tree.node(outer).rect.y, -10.0);
        assert_eq!(tree.node(inner).rect.y, -15.0);
        assert_eq!(tree.node(leaf).rect.y, -15.0);
        // Horizontal positions are untouched: scrolling is vertical only.
        assert_eq!(tree.node(leaf).rect.x, 0.0);
    }

    #[test]
    fn inner_rect_is_margin_expanded_union() {
        let mut tree = Tree::new();
        let root = horizontal_container(&mut tree, 100.0, 100.0);
        let a = sized_child(&mut tree, root, 20.0, 20.0);
        tree.node_mut(a).style.margin.left = Distance::px(3.0);
        sized_child(&mut tree, root, 30.0, 60.0);

        tree.resolve_static_size(root, &LayoutContext::default());
        tree.resolve_relative_size(root);
        tree.arrange_children(root);
        tree.compute_inner_rect(root);

        let inner = tree.node(root).inner_rect;
        assert_eq!(inner.x, 0.0);
        assert_eq!(inner.width, 53.0);
        assert_eq!(inner.height, 60.0);
    }

    #[test]
    fn out_of_bounds_child_enlarges_inner_rect() {
        let mut tree = Tree::new();
        let root = horizontal_container(&mut tree, 100.0, 100.0);
        sized_child(&mut tree, root, 20.0, 20.0);
        tree.resolve_static_size(root, &LayoutContext::default());
        tree.resolve_relative_size(root);
        tree.arrange_children(root);
        tree.compute_inner_rect(root);
        let before = tree.node(root).inner_rect;

        let stray = sized_child(&mut tree, root, 10.0, 10.0);
        tree.node_mut(stray).style.position.left = Distance::px(150.0);
        tree.resolve_static_size(root, &LayoutContext::default());
        tree.resolve_relative_size(root);
        tree.arrange_children(root);
        tree.compute_inner_rect(root);
        let after = tree.node(root).inner_rect;

        assert!(after.right() > before.right());
        assert_eq!(after.right(), 160.0);
    }

    #[test]
    fn inner_rect_of_leaf_is_empty_at_origin() {
        let mut tree = Tree::new();
        let leaf = tree.new_node(None);
        tree.node_mut(leaf).rect = crate::geometry::Rect::new(7.0, 9.0, 20.0, 20.0);

        tree.compute_inner_rect(leaf);

        let inner = tree.node(leaf).inner_rect;
        assert_eq!((inner.x, inner.y), (7.0, 9.0));
        assert_eq!((inner.width, inner.height), (0.0, 0.0));
    }

    #[test]
    fn root_relative_size_resolves_against_own_rect() {
        let mut tree = Tree::new();
        let root = tree.new_node(None);
        tree.node_mut(root).rect = crate::geometry::Rect::new(0.0, 0.0, 300.0, 200.0);
        tree.node_mut(root).style.size.width = Distance::pct(100.0);
        tree.node_mut(root).style.size.height = Distance::pct(100.0);

        tree.resolve_relative_size(root);

        assert_eq!(tree.node(root).rect.width, 300.0);
        assert_eq!(tree.node(root).rect.height, 200.0);
    }
}
