//! Flow containers and their structural operations.
//!
//! A [`Stripe`] owns the handles of its children inside a [`FlowSequence`].
//! Each child also records its `index`, its position among all of the
//! container's children in display order. The mutators in this module keep
//! both views consistent: indices stay contiguous from zero, and the active
//! prefix of the sequence always lists the flow-participating children in
//! ascending index order.

use log::trace;

use crate::{
    layout::FlowSequence,
    tree::{ElementId, Tree},
};

/// Child storage of a container element.
#[derive(Debug, Clone, Default)]
pub struct Stripe {
    sequence: FlowSequence<ElementId>,
}

impl Stripe {
    /// Every child handle, active prefix first.
    pub fn contents(&self) -> &[ElementId] {
        self.sequence.all()
    }

    pub fn sequence(&self) -> &FlowSequence<ElementId> {
        &self.sequence
    }
}

impl Tree {
    /// Runs `f` on the sequence of `parent` while still allowing reads of the
    /// children through the tree.
    fn with_sequence<R>(
        &mut self,
        parent: ElementId,
        f: impl FnOnce(&mut FlowSequence<ElementId>, &Tree) -> R,
    ) -> R {
        let mut sequence = std::mem::take(&mut self.stripe_mut(parent).sequence);
        let result = f(&mut sequence, self);
        self.stripe_mut(parent).sequence = sequence;
        result
    }

    /// Shifts the index of every child of `parent` at or after `from` by `delta`.
    fn reindex(&mut self, parent: ElementId, from: usize, delta: isize) {
        let children = self.stripe(parent).contents().to_vec();
        for child in children {
            let element = self.get_mut(child);
            if element.index >= from {
                element.index = element.index.saturating_add_signed(delta);
            }
        }
    }

    fn attach(&mut self, parent: ElementId, child: ElementId, index: usize) {
        let element = self.get(child);
        assert!(
            element.parent.is_none(),
            "element {child:?} already has a parent"
        );
        let wants_flow = element.wants_flow();

        self.reindex(parent, index, 1);
        let element = self.get_mut(child);
        element.parent = Some(parent);
        element.index = index;

        self.with_sequence(parent, |sequence, tree| {
            if wants_flow {
                let position = sequence
                    .active()
                    .partition_point(|sibling| tree.get(*sibling).index < index);
                sequence.insert_at(position, child);
            } else {
                sequence.push(child);
            }
        });
    }

    /// Appends `child` after the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `child` already has a parent or `parent` is not a container.
    pub fn append(&mut self, parent: ElementId, child: ElementId) {
        let index = self.stripe(parent).contents().len();
        self.attach(parent, child, index);
    }

    /// Inserts `child` so that it ends up at display position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the number of children.
    pub fn insert(&mut self, parent: ElementId, child: ElementId, index: usize) {
        let len = self.stripe(parent).contents().len();
        assert!(index <= len, "insert index {index} out of range 0..={len}");
        self.attach(parent, child, index);
    }

    /// Detaches `child` from its parent. The element stays alive.
    ///
    /// # Panics
    ///
    /// Panics if `child` has no parent.
    pub fn remove(&mut self, child: ElementId) {
        let element = self.get_mut(child);
        let parent = element
            .parent
            .take()
            .unwrap_or_else(|| panic!("element {child:?} has no parent"));
        let index = element.index;
        element.index = 0;

        self.with_sequence(parent, |sequence, _| {
            let position = sequence
                .position(&child)
                .expect("child is listed by its parent");
            sequence.remove_at(position);
        });
        self.reindex(parent, index + 1, -1);
    }

    /// Detaches every child of `parent`.
    pub fn clear(&mut self, parent: ElementId) {
        let children = self.stripe(parent).contents().to_vec();
        for child in children {
            let element = self.get_mut(child);
            element.parent = None;
            element.index = 0;
        }
        self.stripe_mut(parent).sequence.clear();
    }

    /// Moves the child at display position `from` to display position `to`,
    /// keeping the relative order of every other child.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of range.
    pub fn move_child(&mut self, parent: ElementId, from: usize, to: usize) {
        let len = self.stripe(parent).contents().len();
        assert!(
            from < len && to < len,
            "move {from} -> {to} out of range 0..{len}"
        );
        if from == to {
            return;
        }

        let moved = self
            .stripe(parent)
            .contents()
            .iter()
            .copied()
            .find(|child| self.get(*child).index == from)
            .expect("indices are contiguous");

        let children = self.stripe(parent).contents().to_vec();
        for child in children {
            let element = self.get_mut(child);
            let index = element.index;
            if child == moved {
                element.index = to;
            } else if from < to && index > from && index <= to {
                element.index -= 1;
            } else if to < from && index >= to && index < from {
                element.index += 1;
            }
        }

        self.with_sequence(parent, |sequence, tree| {
            sequence.sort_active(|child| tree.get(*child).index);
        });
        trace!(from, to; "Child moved");
    }

    /// Adds `element` to its parent's active sequence.
    ///
    /// Elements that are hidden, not flow-participating or already active
    /// are left alone.
    pub fn map(&mut self, element: ElementId) {
        let Some(parent) = self.get(element).parent else {
            return;
        };
        if !self.get(element).wants_flow() {
            return;
        }
        self.with_sequence(parent, |sequence, tree| {
            let position = sequence
                .position(&element)
                .expect("child is listed by its parent");
            if !sequence.is_active(position) {
                sequence.activate(position, |child| tree.get(*child).index);
            }
        });
    }

    /// Removes `element` from its parent's active sequence.
    pub fn unmap(&mut self, element: ElementId) {
        let Some(parent) = self.get(element).parent else {
            return;
        };
        self.with_sequence(parent, |sequence, _| {
            let position = sequence
                .position(&element)
                .expect("child is listed by its parent");
            if sequence.is_active(position) {
                sequence.deactivate(position);
            }
        });
    }

    /// Rebuilds the active sequence of `parent` from its children's roles
    /// and visibility.
    pub fn remap(&mut self, parent: ElementId) {
        self.with_sequence(parent, |sequence, tree| {
            sequence.repartition(
                |child| tree.get(*child).wants_flow(),
                |child| tree.get(*child).index,
            );
        });
    }

    /// Makes `element` visible and maps it.
    pub fn show(&mut self, element: ElementId) {
        self.get_mut(element).visible = true;
        self.map(element);
    }

    /// Hides `element` and unmaps it.
    pub fn hide(&mut self, element: ElementId) {
        self.get_mut(element).visible = false;
        self.unmap(element);
    }

    fn active_siblings(&self, element: ElementId) -> (&[ElementId], Option<usize>) {
        let parent = self
            .get(element)
            .parent
            .unwrap_or_else(|| panic!("element {element:?} has no parent"));
        let active = self.stripe(parent).sequence.active();
        let position = active.iter().position(|child| *child == element);
        (active, position)
    }

    /// The active sibling displayed right before `element`, if any.
    pub fn before(&self, element: ElementId) -> Option<ElementId> {
        match self.active_siblings(element) {
            (active, Some(position)) if position > 0 => Some(active[position - 1]),
            _ => None,
        }
    }

    /// The previous active sibling, wrapping around to the last one.
    ///
    /// Returns `element` itself when it is not active.
    pub fn prev(&self, element: ElementId) -> ElementId {
        match self.active_siblings(element) {
            (active, Some(position)) => active[(position + active.len() - 1) % active.len()],
            _ => element,
        }
    }

    /// The next active sibling, wrapping around to the first one.
    ///
    /// Returns `element` itself when it is not active.
    pub fn next(&self, element: ElementId) -> ElementId {
        match self.active_siblings(element) {
            (active, Some(position)) => active[(position + 1) % active.len()],
            _ => element,
        }
    }

    /// Whether `element` is the first active child of its parent.
    pub fn is_first(&self, element: ElementId) -> bool {
        matches!(self.active_siblings(element), (_, Some(0)))
    }

    /// Whether `element` is the last active child of its parent.
    pub fn is_last(&self, element: ElementId) -> bool {
        match self.active_siblings(element) {
            (active, Some(position)) => position + 1 == active.len(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::style::{Flow, LayoutStyle};

    use super::*;
    use crate::tree::ElementKind;

    fn row_with_leaves(tree: &mut Tree, count: usize) -> (ElementId, Vec<ElementId>) {
        let row = tree.create(ElementKind::stripe(), LayoutStyle::row());
        let leaves = (0..count)
            .map(|_| {
                let leaf = tree.create(ElementKind::Leaf, LayoutStyle::default());
                tree.append(row, leaf);
                leaf
            })
            .collect();
        (row, leaves)
    }

    fn indices(tree: &Tree, elements: &[ElementId]) -> Vec<usize> {
        elements.iter().map(|id| tree.get(*id).index()).collect()
    }

    #[test]
    fn test_append_activates_in_order() {
        let mut tree = Tree::new();
        let (row, leaves) = row_with_leaves(&mut tree, 3);

        assert_eq!(tree.stripe(row).sequence().active(), leaves.as_slice());
        assert_eq!(indices(&tree, &leaves), vec![0, 1, 2]);
        assert_eq!(tree.get(leaves[1]).parent(), Some(row));
    }

    #[test]
    fn test_insert_shifts_indices() {
        let mut tree = Tree::new();
        let (row, leaves) = row_with_leaves(&mut tree, 2);
        let inserted = tree.create(ElementKind::Leaf, LayoutStyle::default());

        tree.insert(row, inserted, 1);

        assert_eq!(indices(&tree, &[leaves[0], inserted, leaves[1]]), vec![0, 1, 2]);
        assert_eq!(
            tree.stripe(row).sequence().active(),
            &[leaves[0], inserted, leaves[1]]
        );
    }

    #[test]
    fn test_remove_compacts_indices() {
        let mut tree = Tree::new();
        let (row, leaves) = row_with_leaves(&mut tree, 3);

        tree.remove(leaves[0]);

        assert!(tree.get(leaves[0]).parent().is_none());
        assert_eq!(indices(&tree, &leaves[1..]), vec![0, 1]);
        assert_eq!(tree.stripe(row).sequence().active(), &leaves[1..]);
    }

    #[test]
    fn test_free_child_never_active() {
        let mut tree = Tree::new();
        let (row, _) = row_with_leaves(&mut tree, 1);
        let badge = tree.create(
            ElementKind::Leaf,
            LayoutStyle::default().with_flow(Flow::Free),
        );

        tree.append(row, badge);
        tree.map(badge);

        assert_eq!(tree.stripe(row).sequence().len_active(), 1);
        assert_eq!(tree.stripe(row).sequence().inactive(), &[badge]);
    }

    #[test]
    fn test_hide_and_show() {
        let mut tree = Tree::new();
        let (row, leaves) = row_with_leaves(&mut tree, 3);

        tree.hide(leaves[1]);
        assert_eq!(tree.stripe(row).sequence().active(), &[leaves[0], leaves[2]]);
        assert!(!tree.get(leaves[1]).visible());

        tree.show(leaves[1]);
        assert_eq!(tree.stripe(row).sequence().active(), leaves.as_slice());
    }

    #[test]
    fn test_move_child_forward_and_back() {
        let mut tree = Tree::new();
        let (row, leaves) = row_with_leaves(&mut tree, 4);

        tree.move_child(row, 0, 2);
        assert_eq!(tree.children(row), vec![leaves[1], leaves[2], leaves[0], leaves[3]]);
        assert_eq!(
            tree.stripe(row).sequence().active(),
            &[leaves[1], leaves[2], leaves[0], leaves[3]]
        );

        tree.move_child(row, 3, 0);
        assert_eq!(tree.children(row), vec![leaves[3], leaves[1], leaves[2], leaves[0]]);
    }

    #[test]
    fn test_remap_after_style_change() {
        let mut tree = Tree::new();
        let (row, leaves) = row_with_leaves(&mut tree, 2);

        tree.set_style(leaves[0], LayoutStyle::default().with_flow(Flow::Manual));
        assert_eq!(tree.stripe(row).sequence().active(), &[leaves[1]]);

        tree.set_style(leaves[0], LayoutStyle::default());
        assert_eq!(tree.stripe(row).sequence().active(), leaves.as_slice());
    }

    #[test]
    fn test_sibling_queries() {
        let mut tree = Tree::new();
        let (_, leaves) = row_with_leaves(&mut tree, 3);

        assert_eq!(tree.before(leaves[0]), None);
        assert_eq!(tree.before(leaves[2]), Some(leaves[1]));
        assert_eq!(tree.prev(leaves[0]), leaves[2]);
        assert_eq!(tree.next(leaves[2]), leaves[0]);
        assert_eq!(tree.next(leaves[0]), leaves[1]);
        assert!(tree.is_first(leaves[0]));
        assert!(tree.is_last(leaves[2]));
        assert!(!tree.is_last(leaves[1]));

        tree.hide(leaves[2]);
        assert!(tree.is_last(leaves[1]));
        assert_eq!(tree.next(leaves[2]), leaves[2]);
    }

    #[test]
    fn test_clear_detaches_children() {
        let mut tree = Tree::new();
        let (row, leaves) = row_with_leaves(&mut tree, 2);

        tree.clear(row);

        assert!(tree.stripe(row).contents().is_empty());
        assert!(leaves.iter().all(|leaf| tree.get(*leaf).parent().is_none()));
    }

    #[test]
    #[should_panic(expected = "already has a parent")]
    fn test_double_attach_panics() {
        let mut tree = Tree::new();
        let (row, leaves) = row_with_leaves(&mut tree, 1);
        tree.append(row, leaves[0]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_insert_out_of_range_panics() {
        let mut tree = Tree::new();
        let (row, _) = row_with_leaves(&mut tree, 1);
        let leaf = tree.create(ElementKind::Leaf, LayoutStyle::default());
        tree.insert(row, leaf, 5);
    }
}
