//! Integration tests for flow containers
//!
//! These tests build small widget trees through the public API and check the
//! geometry a host would read back after layout.

use float_cmp::assert_approx_eq;
use trellis::{
    config::StripeDefaults,
    geometry::{Dimension, Insets, Point, Size},
    style::{Align, Flow, LayoutStyle, Sizing},
    tree::{ElementId, ElementKind, Tree},
};

/// A window: a title bar above a body row holding a sidebar and an
/// expanding content area, with a close button floating over the corner.
struct Window {
    tree: Tree,
    root: ElementId,
    title: ElementId,
    sidebar: ElementId,
    content: ElementId,
    close: ElementId,
}

fn window() -> Window {
    let mut tree = Tree::new();
    let defaults = StripeDefaults::new(4.0, Insets::uniform(2.0));

    let root = tree.create(ElementKind::stripe(), defaults.apply(LayoutStyle::column()));
    let title = tree.create_leaf(
        LayoutStyle::default().with_sizing(Dimension::X, Sizing::Expand),
        Size::new(50.0, 20.0),
    );
    tree.append(root, title);

    let body = tree.create(
        ElementKind::stripe(),
        LayoutStyle::row()
            .with_sizing(Dimension::X, Sizing::Expand)
            .with_sizing(Dimension::Y, Sizing::Expand),
    );
    tree.append(root, body);

    let sidebar = tree.create_leaf(
        LayoutStyle::default().with_sizing(Dimension::Y, Sizing::Expand),
        Size::new(60.0, 10.0),
    );
    let content = tree.create_leaf(
        LayoutStyle::default()
            .with_sizing(Dimension::X, Sizing::Expand)
            .with_sizing(Dimension::Y, Sizing::Expand),
        Size::new(10.0, 10.0),
    );
    tree.append(body, sidebar);
    tree.append(body, content);

    let close = tree.create_leaf(
        LayoutStyle::default()
            .with_flow(Flow::Free)
            .with_align(Dimension::X, Align::End),
        Size::new(8.0, 8.0),
    );
    tree.append(root, close);

    Window {
        tree,
        root,
        title,
        sidebar,
        content,
        close,
    }
}

#[test]
fn test_window_fills_assigned_size() {
    let mut w = window();

    w.tree.layout_in(w.root, Size::new(304.0, 204.0));

    let title = w.tree.get(w.title);
    assert_eq!(title.position(), Point::new(2.0, 2.0));
    assert_approx_eq!(f32, title.size().width(), 300.0);

    let content_bounds = w.tree.bounds(w.content);
    assert_approx_eq!(f32, content_bounds.min_x(), 62.0);
    assert_approx_eq!(f32, content_bounds.min_y(), 26.0);
    assert_approx_eq!(f32, content_bounds.width(), 240.0);

    let sidebar = w.tree.get(w.sidebar);
    assert_approx_eq!(f32, sidebar.size().height(), content_bounds.height());

    assert_eq!(w.tree.get(w.close).position(), Point::new(294.0, 2.0));
}

#[test]
fn test_hiding_sidebar_gives_space_to_content() {
    let mut w = window();
    w.tree.hide(w.sidebar);

    w.tree.layout_in(w.root, Size::new(304.0, 204.0));

    let content = w.tree.bounds(w.content);
    assert_approx_eq!(f32, content.min_x(), 2.0);
    assert_approx_eq!(f32, content.width(), 300.0);

    w.tree.show(w.sidebar);
    w.tree.layout_in(w.root, Size::new(304.0, 204.0));
    assert_approx_eq!(f32, w.tree.bounds(w.content).width(), 240.0);
}

#[test]
fn test_pinpoint_through_nested_containers() {
    let mut w = window();
    w.tree.layout_in(w.root, Size::new(304.0, 204.0));

    assert_eq!(w.tree.pinpoint(w.root, Point::new(100.0, 100.0), true), Some(w.content));
    assert_eq!(w.tree.pinpoint(w.root, Point::new(10.0, 100.0), true), Some(w.sidebar));
    assert_eq!(w.tree.pinpoint(w.root, Point::new(297.0, 5.0), true), Some(w.close));
    assert_eq!(w.tree.pinpoint(w.root, Point::new(1.0, 1.0), true), Some(w.root));
    assert_eq!(w.tree.pinpoint(w.root, Point::new(400.0, 1.0), true), None);
}

#[test]
fn test_reorder_children() {
    let mut w = window();
    let body = w.tree.get(w.content).parent().expect("content has a parent");

    w.tree.move_child(body, 1, 0);
    w.tree.layout_in(w.root, Size::new(304.0, 204.0));

    assert!(w.tree.is_first(w.content));
    assert!(w.tree.is_last(w.sidebar));
    assert_approx_eq!(f32, w.tree.bounds(w.sidebar).min_x(), 242.0);
}
