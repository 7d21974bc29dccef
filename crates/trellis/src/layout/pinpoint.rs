//! Hit-testing and absolute geometry.

use trellis_core::geometry::{Bounds, Point};

use crate::tree::{ElementId, Tree};

impl Tree {
    /// Finds the innermost, topmost element of the subtree at `root` that
    /// contains `point`, given in the coordinates of `root`'s parent.
    ///
    /// Free and manual children are tested before the flow sequence, and
    /// siblings later in display order before earlier ones. With `opaque`
    /// set, elements whose style is not opaque are never returned, though
    /// their children still are.
    pub fn pinpoint(&self, root: ElementId, point: Point, opaque: bool) -> Option<ElementId> {
        let element = self.get(root);
        if !element.visible() {
            return None;
        }
        let bounds = Bounds::new_from_top_left(element.position(), element.size());
        if !bounds.contains(point) {
            return None;
        }

        if element.kind().container().is_some() {
            let local = point.sub_point(element.position());
            let (sequenced, detached) = self.placed_children(root);
            let hit = detached
                .iter()
                .rev()
                .chain(sequenced.iter().rev())
                .find_map(|child| self.pinpoint(*child, local, opaque));
            if hit.is_some() {
                return hit;
            }
        }

        (!opaque || element.style().opaque()).then_some(root)
    }

    /// Position of `id` relative to the root of its tree.
    pub fn absolute_position(&self, id: ElementId) -> Point {
        let mut position = Point::default();
        let mut current = Some(id);
        while let Some(element) = current.map(|current| self.get(current)) {
            position = position.add_point(element.position());
            current = element.parent();
        }
        position
    }

    /// Bounding box of `id` relative to the root of its tree.
    pub fn bounds(&self, id: ElementId) -> Bounds {
        Bounds::new_from_top_left(self.absolute_position(id), self.get(id).size())
    }
}
