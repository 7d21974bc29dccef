//! Measure and layout passes.
//!
//! Layout runs in two phases over a subtree:
//!
//! 1. **Measure** (bottom-up) computes every element's natural size from its
//!    content, or from its children for containers.
//! 2. **Arrange** (top-down) gives every child its final size and its
//!    position relative to its parent, distributing leftover space to
//!    flexible children.

use log::{debug, trace};

use trellis_core::{
    geometry::{Dimension, Point, Size},
    style::{Flow, LayoutStyle, Sizing},
};

use crate::tree::{ElementId, ElementKind, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrangement {
    Leaf,
    Sequence,
    Stack,
}

impl Arrangement {
    fn of(kind: &ElementKind) -> Self {
        match kind {
            ElementKind::Leaf => Arrangement::Leaf,
            ElementKind::Stripe(_) => Arrangement::Sequence,
            ElementKind::Overlay(_) => Arrangement::Stack,
        }
    }
}

/// Size of a run of children laid end to end along `dim`.
fn sequence_extent(sizes: &[Size], dim: Dimension, spacing: f32) -> Size {
    let gaps = spacing * sizes.len().saturating_sub(1) as f32;
    let primary = sizes.iter().map(|size| size.along(dim)).sum::<f32>() + gaps;
    let secondary = sizes
        .iter()
        .map(|size| size.along(dim.other()))
        .fold(0.0, f32::max);
    Size::default()
        .with_along(dim, primary)
        .with_along(dim.other(), secondary)
}

/// Replaces the measured extent on every axis whose sizing is fixed.
fn apply_fixed(style: &LayoutStyle, measured: Size) -> Size {
    Dimension::ALL.into_iter().fold(measured, |size, dim| {
        if style.sizing(dim) == Sizing::Fixed {
            size.with_along(dim, style.size().along(dim))
        } else {
            size
        }
    })
}

impl Tree {
    /// Splits the children of `id` into the active sequence and the visible
    /// free or manual children, both in display order.
    pub(crate) fn placed_children(&self, id: ElementId) -> (Vec<ElementId>, Vec<ElementId>) {
        let sequence = self.stripe(id).sequence();
        let mut detached: Vec<ElementId> = sequence
            .inactive()
            .iter()
            .copied()
            .filter(|child| {
                let element = self.get(*child);
                element.visible() && !element.style().flow().is_sequenced()
            })
            .collect();
        detached.sort_by_key(|child| self.get(*child).index());
        (sequence.active().to_vec(), detached)
    }

    /// Computes and stores the natural size of `id` and its subtree.
    pub fn measure(&mut self, id: ElementId) -> Size {
        let element = self.get(id);
        let style = element.style().clone();
        let arrangement = Arrangement::of(element.kind());

        let measured = match arrangement {
            Arrangement::Leaf => element.content(),
            Arrangement::Sequence | Arrangement::Stack => {
                let (sequenced, detached) = self.placed_children(id);
                for child in detached {
                    self.measure(child);
                }
                let sizes: Vec<Size> = sequenced.iter().map(|child| self.measure(*child)).collect();

                let extent = if arrangement == Arrangement::Stack {
                    sizes.iter().fold(Size::default(), |acc, size| acc.max(*size))
                } else {
                    let dim = style.direction();
                    sequence_extent(&sizes, dim, style.spacing(dim))
                };
                extent.add_padding(style.padding())
            }
        };

        let natural = apply_fixed(&style, measured);
        self.get_mut(id).natural = natural;
        if arrangement != Arrangement::Leaf {
            trace!(element:? = id, width = natural.width(), height = natural.height(); "Container measured");
        }
        natural
    }

    /// Measures `root` and lays its subtree out at its natural size.
    pub fn layout(&mut self, root: ElementId) -> Size {
        let size = self.measure(root);
        self.place_root(root, size);
        size
    }

    /// Measures `root` and lays its subtree out inside `size`.
    pub fn layout_in(&mut self, root: ElementId, size: Size) {
        self.measure(root);
        self.place_root(root, size);
    }

    fn place_root(&mut self, root: ElementId, size: Size) {
        self.get_mut(root).size = size;
        self.arrange(root);
        debug!(width = size.width(), height = size.height(); "Layout pass complete");
    }

    fn arrange(&mut self, id: ElementId) {
        let element = self.get(id);
        let arrangement = Arrangement::of(element.kind());
        if arrangement == Arrangement::Leaf {
            return;
        }
        let style = element.style().clone();
        let size = element.size();

        let (sequenced, detached) = self.placed_children(id);
        trace!(active = sequenced.len(), detached = detached.len(); "Arranging container");

        match arrangement {
            Arrangement::Sequence => self.arrange_sequence(&style, size, &sequenced),
            _ => {
                for child in &sequenced {
                    self.position_free(*child, &style, size);
                }
            }
        }

        for child in &detached {
            if self.get(*child).style().flow() == Flow::Free {
                self.position_free(*child, &style, size);
            } else {
                let element = self.get_mut(*child);
                element.size = element.natural;
            }
        }

        for child in sequenced.iter().chain(detached.iter()) {
            self.arrange(*child);
        }
    }

    fn arrange_sequence(&mut self, style: &LayoutStyle, size: Size, children: &[ElementId]) {
        let dim = style.direction();
        let other = dim.other();
        let padding = style.padding();
        let content = size.sub_padding(padding);
        let spacing = style.spacing(dim);
        let gaps = spacing * children.len().saturating_sub(1) as f32;

        let used: f32 = children
            .iter()
            .map(|child| self.get(*child).natural().along(dim))
            .sum();
        let leftover = content.along(dim) - used - gaps;
        let total_weight: f32 = children
            .iter()
            .map(|child| self.get(*child).style())
            .filter(|child_style| child_style.is_flexible(dim))
            .map(|child_style| child_style.weight().max(0.0))
            .sum();

        for child in children {
            let element = self.get_mut(*child);
            let natural = element.natural;
            let mut child_size = natural;
            if total_weight > 0.0 && element.style().is_flexible(dim) {
                let share = leftover * element.style().weight().max(0.0) / total_weight;
                child_size = child_size.with_along(dim, (natural.along(dim) + share).max(0.0));
            }
            if element.style().is_flexible(other) {
                child_size = child_size.with_along(other, content.along(other));
            }
            element.size = child_size;
        }

        let occupied: f32 = children
            .iter()
            .map(|child| self.get(*child).size().along(dim))
            .sum::<f32>()
            + gaps;
        let mut slack = (content.along(dim) - occupied).max(0.0);

        let mut offset = padding.start(dim);
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                offset += spacing;
            }
            let element = self.get_mut(*child);
            let child_size = element.size;
            let child_style = element.style();

            // Alignment padding is taken out of the slack left by earlier siblings.
            let align_padding = child_style.align(dim).factor() * slack;
            slack -= align_padding;
            let primary = offset + align_padding;
            let secondary = padding.start(other)
                + child_style.align(other).factor() * (content.along(other) - child_size.along(other));
            offset = primary + child_size.along(dim);

            let mut position = Point::default()
                .with_along(dim, primary)
                .with_along(other, secondary);
            for axis in Dimension::ALL {
                if style.pivot(axis) {
                    position = position.with_along(
                        axis,
                        size.along(axis) - child_size.along(axis) - position.along(axis),
                    );
                }
            }
            element.position = position;
        }
    }

    /// Sizes and aligns `child` against the content box of a container with
    /// the given style and size.
    fn position_free(&mut self, child: ElementId, style: &LayoutStyle, size: Size) {
        let padding = style.padding();
        let content = size.sub_padding(padding);
        let element = self.get_mut(child);

        let mut child_size = element.natural;
        let mut position = Point::default();
        for dim in Dimension::ALL {
            if element.style().is_flexible(dim) {
                child_size = child_size.with_along(dim, content.along(dim));
            }
            let free_space = content.along(dim) - child_size.along(dim);
            position = position.with_along(
                dim,
                padding.start(dim) + element.style().align(dim).factor() * free_space,
            );
        }
        element.size = child_size;
        element.position = position;
    }

    /// Rescales the weights of the flexible active children of `container`
    /// so that they sum to one.
    pub fn normalize_span(&mut self, container: ElementId) {
        let dim = self.get(container).style().direction();
        let flexible: Vec<ElementId> = self
            .stripe(container)
            .sequence()
            .iter()
            .copied()
            .filter(|child| self.get(*child).style().is_flexible(dim))
            .collect();
        let total: f32 = flexible
            .iter()
            .map(|child| self.get(*child).style().weight().max(0.0))
            .sum();
        if total <= 0.0 {
            return;
        }
        for child in flexible {
            let style = self.get_mut(child).style_mut();
            let weight = style.weight().max(0.0) / total;
            style.set_weight(weight);
        }
    }

    /// Start of the first active child of `container` beginning after `pos`
    /// along its direction, or the container's extent if there is none.
    pub fn next_offset(&self, container: ElementId, pos: f32) -> f32 {
        let element = self.get(container);
        let dim = element.style().direction();
        self.stripe(container)
            .sequence()
            .iter()
            .map(|child| self.get(*child).position().along(dim))
            .find(|start| *start > pos)
            .unwrap_or_else(|| element.size().along(dim))
    }

    /// End of the last active child of `container` ending before `pos` along
    /// its direction, or zero if there is none.
    pub fn prev_offset(&self, container: ElementId, pos: f32) -> f32 {
        let dim = self.get(container).style().direction();
        self.stripe(container)
            .sequence()
            .iter_rev()
            .map(|child| {
                let element = self.get(*child);
                element.position().along(dim) + element.size().along(dim)
            })
            .find(|end| *end < pos)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use trellis_core::{
        geometry::Insets,
        style::{Align, Flow},
    };

    use super::*;

    fn leaf(tree: &mut Tree, parent: ElementId, style: LayoutStyle, content: Size) -> ElementId {
        let id = tree.create_leaf(style, content);
        tree.append(parent, id);
        id
    }

    #[test]
    fn test_measure_row() {
        let mut tree = Tree::new();
        let row = tree.create(
            ElementKind::stripe(),
            LayoutStyle::row()
                .with_spacing(Dimension::X, 5.0)
                .with_padding(Insets::uniform(2.0)),
        );
        leaf(&mut tree, row, LayoutStyle::default(), Size::new(10.0, 20.0));
        leaf(&mut tree, row, LayoutStyle::default(), Size::new(30.0, 8.0));

        let natural = tree.measure(row);

        assert_approx_eq!(f32, natural.width(), 49.0);
        assert_approx_eq!(f32, natural.height(), 24.0);
    }

    #[test]
    fn test_measure_empty_container() {
        let mut tree = Tree::new();
        let column = tree.create(ElementKind::stripe(), LayoutStyle::column());
        assert!(tree.measure(column).is_zero());

        let padded = tree.create(
            ElementKind::stripe(),
            LayoutStyle::column().with_padding(Insets::new(1.0, 2.0, 3.0, 4.0)),
        );
        assert_eq!(tree.measure(padded), Size::new(6.0, 4.0));
    }

    #[test]
    fn test_measure_ignores_hidden_and_free() {
        let mut tree = Tree::new();
        let row = tree.create(ElementKind::stripe(), LayoutStyle::row());
        leaf(&mut tree, row, LayoutStyle::default(), Size::new(10.0, 10.0));
        let hidden = leaf(&mut tree, row, LayoutStyle::default(), Size::new(50.0, 50.0));
        leaf(
            &mut tree,
            row,
            LayoutStyle::default().with_flow(Flow::Free),
            Size::new(80.0, 80.0),
        );
        tree.hide(hidden);

        assert_eq!(tree.measure(row), Size::new(10.0, 10.0));
    }

    #[test]
    fn test_fixed_sizing_overrides_content() {
        let mut tree = Tree::new();
        let row = tree.create(
            ElementKind::stripe(),
            LayoutStyle::row().with_fixed_size(Size::new(200.0, 40.0)),
        );
        leaf(&mut tree, row, LayoutStyle::default(), Size::new(10.0, 10.0));

        assert_eq!(tree.layout(row), Size::new(200.0, 40.0));
        assert_eq!(tree.get(row).size(), Size::new(200.0, 40.0));
    }

    #[test]
    fn test_expand_shares_leftover_by_weight() {
        let mut tree = Tree::new();
        let row = tree.create(
            ElementKind::stripe(),
            LayoutStyle::row().with_spacing(Dimension::X, 10.0),
        );
        let fixed = leaf(&mut tree, row, LayoutStyle::default(), Size::new(20.0, 10.0));
        let one = leaf(
            &mut tree,
            row,
            LayoutStyle::default().with_sizing(Dimension::X, Sizing::Expand),
            Size::new(0.0, 10.0),
        );
        let three = leaf(
            &mut tree,
            row,
            LayoutStyle::default()
                .with_sizing(Dimension::X, Sizing::Expand)
                .with_weight(3.0),
            Size::new(0.0, 10.0),
        );

        tree.layout_in(row, Size::new(200.0, 10.0));

        assert_approx_eq!(f32, tree.get(one).size().width(), 40.0);
        assert_approx_eq!(f32, tree.get(three).size().width(), 120.0);
        assert_approx_eq!(f32, tree.get(fixed).position().x(), 0.0);
        assert_approx_eq!(f32, tree.get(one).position().x(), 30.0);
        assert_approx_eq!(f32, tree.get(three).position().x(), 80.0);
    }

    #[test]
    fn test_shrink_on_negative_leftover() {
        let mut tree = Tree::new();
        let row = tree.create(ElementKind::stripe(), LayoutStyle::row());
        let flexible = leaf(
            &mut tree,
            row,
            LayoutStyle::default().with_sizing(Dimension::X, Sizing::Expand),
            Size::new(50.0, 10.0),
        );
        leaf(&mut tree, row, LayoutStyle::default(), Size::new(50.0, 10.0));

        tree.layout_in(row, Size::new(80.0, 10.0));
        assert_approx_eq!(f32, tree.get(flexible).size().width(), 30.0);

        tree.layout_in(row, Size::new(20.0, 10.0));
        assert_approx_eq!(f32, tree.get(flexible).size().width(), 0.0);
    }

    #[test]
    fn test_zero_weight_leaves_slack() {
        let mut tree = Tree::new();
        let row = tree.create(ElementKind::stripe(), LayoutStyle::row());
        let child = leaf(
            &mut tree,
            row,
            LayoutStyle::default()
                .with_sizing(Dimension::X, Sizing::Expand)
                .with_weight(0.0)
                .with_align(Dimension::X, Align::End),
            Size::new(10.0, 10.0),
        );

        tree.layout_in(row, Size::new(100.0, 10.0));

        assert_approx_eq!(f32, tree.get(child).size().width(), 10.0);
        assert_approx_eq!(f32, tree.get(child).position().x(), 90.0);
    }

    #[test]
    fn test_primary_alignment_keeps_siblings_apart() {
        let mut tree = Tree::new();
        let row = tree.create(ElementKind::stripe(), LayoutStyle::row());
        let centered = leaf(
            &mut tree,
            row,
            LayoutStyle::default().with_align(Dimension::X, Align::Center),
            Size::new(10.0, 10.0),
        );
        let plain = leaf(&mut tree, row, LayoutStyle::default(), Size::new(10.0, 10.0));
        let trailing = leaf(
            &mut tree,
            row,
            LayoutStyle::default().with_align(Dimension::X, Align::End),
            Size::new(10.0, 10.0),
        );

        tree.layout_in(row, Size::new(100.0, 10.0));

        assert_approx_eq!(f32, tree.get(centered).position().x(), 35.0);
        assert_approx_eq!(f32, tree.get(plain).position().x(), 45.0);
        assert_approx_eq!(f32, tree.get(trailing).position().x(), 90.0);
    }

    #[test]
    fn test_alignment_and_secondary_expand() {
        let mut tree = Tree::new();
        let column = tree.create(
            ElementKind::stripe(),
            LayoutStyle::column().with_padding(Insets::uniform(5.0)),
        );
        let centered = leaf(
            &mut tree,
            column,
            LayoutStyle::default()
                .with_align(Dimension::X, Align::Center)
                .with_align(Dimension::Y, Align::Center),
            Size::new(20.0, 10.0),
        );
        let stretched = leaf(
            &mut tree,
            column,
            LayoutStyle::default()
                .with_sizing(Dimension::X, Sizing::Expand)
                .with_align(Dimension::Y, Align::Center),
            Size::new(4.0, 10.0),
        );

        tree.layout_in(column, Size::new(110.0, 70.0));

        let centered = tree.get(centered);
        assert_approx_eq!(f32, centered.position().x(), 45.0);
        assert_approx_eq!(f32, centered.position().y(), 25.0);

        let stretched = tree.get(stretched);
        assert_approx_eq!(f32, stretched.size().width(), 100.0);
        assert_approx_eq!(f32, stretched.position().x(), 5.0);
        assert_approx_eq!(f32, stretched.position().y(), 45.0);
    }

    #[test]
    fn test_pivot_mirrors_positions() {
        let mut tree = Tree::new();
        let row = tree.create(
            ElementKind::stripe(),
            LayoutStyle::row().with_pivot(Dimension::X, true),
        );
        let first = leaf(&mut tree, row, LayoutStyle::default(), Size::new(10.0, 10.0));
        let second = leaf(&mut tree, row, LayoutStyle::default(), Size::new(20.0, 10.0));

        tree.layout_in(row, Size::new(100.0, 10.0));

        assert_approx_eq!(f32, tree.get(first).position().x(), 90.0);
        assert_approx_eq!(f32, tree.get(second).position().x(), 70.0);
    }

    #[test]
    fn test_free_and_manual_children() {
        let mut tree = Tree::new();
        let row = tree.create(ElementKind::stripe(), LayoutStyle::row());
        leaf(&mut tree, row, LayoutStyle::default(), Size::new(100.0, 50.0));
        let badge = leaf(
            &mut tree,
            row,
            LayoutStyle::default()
                .with_flow(Flow::Free)
                .with_align(Dimension::X, Align::End)
                .with_align(Dimension::Y, Align::Center),
            Size::new(10.0, 10.0),
        );
        let pinned = leaf(
            &mut tree,
            row,
            LayoutStyle::default().with_flow(Flow::Manual),
            Size::new(7.0, 7.0),
        );
        tree.set_position(pinned, Point::new(33.0, 44.0));

        tree.layout(row);

        assert_eq!(tree.get(badge).position(), Point::new(90.0, 20.0));
        assert_eq!(tree.get(pinned).position(), Point::new(33.0, 44.0));
        assert_eq!(tree.get(pinned).size(), Size::new(7.0, 7.0));
    }

    #[test]
    fn test_overlay_stacks_children() {
        let mut tree = Tree::new();
        let overlay = tree.create(ElementKind::overlay(), LayoutStyle::default());
        let back = leaf(&mut tree, overlay, LayoutStyle::default(), Size::new(40.0, 30.0));
        let front = leaf(
            &mut tree,
            overlay,
            LayoutStyle::default()
                .with_align(Dimension::X, Align::Center)
                .with_align(Dimension::Y, Align::End),
            Size::new(10.0, 10.0),
        );

        assert_eq!(tree.layout(overlay), Size::new(40.0, 30.0));
        assert_eq!(tree.get(back).position(), Point::new(0.0, 0.0));
        assert_eq!(tree.get(front).position(), Point::new(15.0, 20.0));
    }

    #[test]
    fn test_nested_layout() {
        let mut tree = Tree::new();
        let column = tree.create(
            ElementKind::stripe(),
            LayoutStyle::column().with_spacing(Dimension::Y, 4.0),
        );
        let header = leaf(&mut tree, column, LayoutStyle::default(), Size::new(60.0, 12.0));
        let row = tree.create(ElementKind::stripe(), LayoutStyle::row());
        tree.append(column, row);
        leaf(&mut tree, row, LayoutStyle::default(), Size::new(30.0, 20.0));
        let right = leaf(&mut tree, row, LayoutStyle::default(), Size::new(30.0, 20.0));

        assert_eq!(tree.layout(column), Size::new(60.0, 36.0));
        assert_eq!(tree.get(header).position(), Point::new(0.0, 0.0));
        assert_eq!(tree.get(row).position(), Point::new(0.0, 16.0));
        assert_eq!(tree.get(right).position(), Point::new(30.0, 0.0));
    }

    #[test]
    fn test_normalize_span() {
        let mut tree = Tree::new();
        let row = tree.create(ElementKind::stripe(), LayoutStyle::row());
        let expand = LayoutStyle::default().with_sizing(Dimension::X, Sizing::Expand);
        let a = leaf(&mut tree, row, expand.clone().with_weight(1.0), Size::default());
        let b = leaf(&mut tree, row, expand.with_weight(3.0), Size::default());
        let rigid = leaf(&mut tree, row, LayoutStyle::default().with_weight(5.0), Size::default());

        tree.normalize_span(row);

        assert_approx_eq!(f32, tree.get(a).style().weight(), 0.25);
        assert_approx_eq!(f32, tree.get(b).style().weight(), 0.75);
        assert_approx_eq!(f32, tree.get(rigid).style().weight(), 5.0);
    }

    #[test]
    fn test_next_and_prev_offset() {
        let mut tree = Tree::new();
        let row = tree.create(
            ElementKind::stripe(),
            LayoutStyle::row().with_spacing(Dimension::X, 10.0),
        );
        for _ in 0..3 {
            leaf(&mut tree, row, LayoutStyle::default(), Size::new(20.0, 5.0));
        }
        tree.layout(row);

        assert_approx_eq!(f32, tree.next_offset(row, 5.0), 30.0);
        assert_approx_eq!(f32, tree.next_offset(row, 65.0), 80.0);
        assert_approx_eq!(f32, tree.prev_offset(row, 55.0), 50.0);
        assert_approx_eq!(f32, tree.prev_offset(row, 15.0), 0.0);
    }
}
