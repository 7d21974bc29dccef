//! Element arena.
//!
//! Every visual element lives in a [`Tree`] and is addressed by an
//! [`ElementId`]. Parents refer to children through their container's
//! [`Stripe`], children refer back to their parent by handle, so there are
//! no owning cycles. Handles carry a generation: using a handle after its
//! element was destroyed panics instead of silently aliasing a new element.

use log::trace;

use trellis_core::{
    geometry::{Point, Size},
    identifier::Id,
    style::LayoutStyle,
};

use crate::layout::Stripe;

/// Handle to an element stored in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    slot: u32,
    generation: u32,
}

/// What an element does with its children.
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// No children; sized from its content.
    Leaf,
    /// Lays its children out in sequence along its direction.
    Stripe(Stripe),
    /// Stacks its children on top of each other, each aligned against its box.
    Overlay(Stripe),
}

impl ElementKind {
    pub fn stripe() -> Self {
        Self::Stripe(Stripe::default())
    }

    pub fn overlay() -> Self {
        Self::Overlay(Stripe::default())
    }

    /// The child container, if this kind has one.
    pub fn container(&self) -> Option<&Stripe> {
        match self {
            ElementKind::Leaf => None,
            ElementKind::Stripe(stripe) | ElementKind::Overlay(stripe) => Some(stripe),
        }
    }

    pub(crate) fn container_mut(&mut self) -> Option<&mut Stripe> {
        match self {
            ElementKind::Leaf => None,
            ElementKind::Stripe(stripe) | ElementKind::Overlay(stripe) => Some(stripe),
        }
    }
}

/// A visual element and its computed geometry.
///
/// `size` and `position` are only meaningful after the owning container has
/// run a layout pass since the last structural change. `position` is
/// relative to the parent.
#[derive(Debug, Clone)]
pub struct Element {
    name: Option<Id>,
    style: LayoutStyle,
    kind: ElementKind,
    content: Size,
    pub(crate) natural: Size,
    pub(crate) size: Size,
    pub(crate) position: Point,
    pub(crate) parent: Option<ElementId>,
    pub(crate) index: usize,
    pub(crate) visible: bool,
}

impl Element {
    fn new(kind: ElementKind, style: LayoutStyle) -> Self {
        Self {
            name: None,
            style,
            kind,
            content: Size::default(),
            natural: Size::default(),
            size: Size::default(),
            position: Point::default(),
            parent: None,
            index: 0,
            visible: true,
        }
    }

    pub fn name(&self) -> Option<Id> {
        self.name
    }

    pub fn style(&self) -> &LayoutStyle {
        &self.style
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Intrinsic size reported by the widget owning this element.
    pub fn content(&self) -> Size {
        self.content
    }

    /// Size computed by the last measure pass.
    pub fn natural(&self) -> Size {
        self.natural
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Position among all children of the parent, in display order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Whether the element wants a slot in its parent's active sequence.
    pub(crate) fn wants_flow(&self) -> bool {
        self.visible && self.style.flow().is_sequenced()
    }

    pub(crate) fn style_mut(&mut self) -> &mut LayoutStyle {
        &mut self.style
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// Arena owning every element.
#[derive(Debug, Default)]
pub struct Tree {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached element.
    pub fn create(&mut self, kind: ElementKind, style: LayoutStyle) -> ElementId {
        let element = Element::new(kind, style);
        let id = match self.free.pop() {
            Some(slot) => {
                let entry = &mut self.slots[slot as usize];
                entry.element = Some(element);
                ElementId {
                    slot,
                    generation: entry.generation,
                }
            }
            None => {
                let slot = u32::try_from(self.slots.len()).expect("element arena exhausted");
                self.slots.push(Slot {
                    generation: 0,
                    element: Some(element),
                });
                ElementId {
                    slot,
                    generation: 0,
                }
            }
        };
        trace!(slot = id.slot, generation = id.generation; "Element created");
        id
    }

    /// Creates a detached leaf with a fixed intrinsic size.
    pub fn create_leaf(&mut self, style: LayoutStyle, content: Size) -> ElementId {
        let id = self.create(ElementKind::Leaf, style);
        self.set_content(id, content);
        id
    }

    /// Destroys `id` and its whole subtree, detaching it from its parent first.
    pub fn destroy(&mut self, id: ElementId) {
        if self.get(id).parent.is_some() {
            self.remove(id);
        }

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(stripe) = self.get(current).kind.container() {
                pending.extend_from_slice(stripe.contents());
            }
            let entry = &mut self.slots[current.slot as usize];
            entry.element = None;
            entry.generation = entry.generation.wrapping_add(1);
            self.free.push(current.slot);
        }
        trace!(slot = id.slot; "Element subtree destroyed");
    }

    /// Whether `id` still refers to a live element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.slots
            .get(id.slot as usize)
            .is_some_and(|entry| entry.generation == id.generation && entry.element.is_some())
    }

    /// Returns the element behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn get(&self, id: ElementId) -> &Element {
        self.slots
            .get(id.slot as usize)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.element.as_ref())
            .unwrap_or_else(|| panic!("stale element handle {id:?}"))
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> &mut Element {
        self.slots
            .get_mut(id.slot as usize)
            .filter(|entry| entry.generation == id.generation)
            .and_then(|entry| entry.element.as_mut())
            .unwrap_or_else(|| panic!("stale element handle {id:?}"))
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the container of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is a leaf.
    pub fn stripe(&self, id: ElementId) -> &Stripe {
        self.get(id)
            .kind
            .container()
            .unwrap_or_else(|| panic!("element {id:?} is not a container"))
    }

    pub(crate) fn stripe_mut(&mut self, id: ElementId) -> &mut Stripe {
        self.get_mut(id)
            .kind
            .container_mut()
            .unwrap_or_else(|| panic!("element {id:?} is not a container"))
    }

    /// Children of `id` in display order, whether active or not.
    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        let mut children = self.stripe(id).contents().to_vec();
        children.sort_by_key(|child| self.get(*child).index);
        children
    }

    pub fn set_name(&mut self, id: ElementId, name: impl Into<Id>) {
        self.get_mut(id).name = Some(name.into());
    }

    /// Sets the intrinsic content size used by the next measure pass.
    pub fn set_content(&mut self, id: ElementId, content: Size) {
        self.get_mut(id).content = content;
    }

    /// Places an element directly. Only meaningful for manual elements, as
    /// the next layout pass overwrites the position of every other role.
    pub fn set_position(&mut self, id: ElementId, position: Point) {
        self.get_mut(id).position = position;
    }

    /// Replaces the style of `id`, updating its membership in the parent's
    /// active sequence when its role changed.
    pub fn set_style(&mut self, id: ElementId, style: LayoutStyle) {
        let element = self.get_mut(id);
        let flow_changed = element.style.flow() != style.flow();
        element.style = style;

        let parent = element.parent;
        if let Some(parent) = parent.filter(|_| flow_changed) {
            self.remap(parent);
        }
    }
}
