use std::cell::Cell;

use super::*;

fn named(node: Node, name: &str) -> Node {
    node.set_name(name);
    node
}

#[test]
fn add_child_links_both_directions() {
    let scene = named(Node::scene(Size::new(100.0, 50.0)), "scene");
    let child = named(Node::container(), "child");
    scene.add_child(&child).unwrap();

    assert_eq!(child.parent(), Some(scene.clone()));
    assert_eq!(scene.children(), vec![child.clone()]);
    assert_eq!(scene.child_named("child"), Some(child.clone()));
    assert!(scene.child_named("missing").is_none());
}

#[test]
fn add_child_moves_between_parents() {
    let a = Node::container();
    let b = Node::container();
    let child = Node::container();
    a.add_child(&child).unwrap();
    b.add_child(&child).unwrap();

    assert!(a.children().is_empty());
    assert_eq!(child.parent(), Some(b));
}

#[test]
fn add_child_rejects_cycles() {
    let root = Node::container();
    let child = Node::container();
    root.add_child(&child).unwrap();

    assert!(child.add_child(&root).is_err());
    assert!(root.add_child(&root).is_err());
    assert!(root.parent().is_none());
}

#[test]
fn remove_from_parent_is_idempotent() {
    let root = Node::container();
    let child = Node::container();
    root.add_child(&child).unwrap();

    child.remove_from_parent();
    child.remove_from_parent();
    assert!(!child.is_attached());
    assert!(root.children().is_empty());
}

#[test]
fn weak_node_does_not_keep_parent_alive() {
    let child = Node::container();
    let weak = {
        let parent = Node::container();
        parent.add_child(&child).unwrap();
        parent.downgrade()
    };
    assert!(!weak.is_alive());
    assert!(weak.upgrade().is_none());
    assert!(child.parent().is_none());
}

#[test]
fn sprite_frame_respects_anchor() {
    let sprite = Node::sprite(Rgba8::BLACK, Size::new(20.0, 10.0));
    sprite.set_position(Point::new(50.0, 50.0));
    assert_eq!(sprite.frame(), Rect::new(40.0, 45.0, 60.0, 55.0));

    sprite.set_anchor_point(Point::ZERO).unwrap();
    assert_eq!(sprite.frame(), Rect::new(50.0, 50.0, 70.0, 60.0));
}

#[test]
fn scene_frame_is_offset_by_anchor() {
    let scene = Node::scene(Size::new(200.0, 100.0));
    assert_eq!(scene.frame(), Rect::new(0.0, 0.0, 200.0, 100.0));
    scene.set_anchor_point(Point::new(0.5, 0.5)).unwrap();
    assert_eq!(scene.frame(), Rect::new(-100.0, -50.0, 100.0, 50.0));
}

#[test]
fn accumulated_frame_unions_descendants() {
    let root = Node::container();
    root.set_position(Point::new(10.0, 10.0));

    let a = Node::sprite(Rgba8::BLACK, Size::new(10.0, 10.0));
    a.set_position(Point::new(5.0, 5.0));
    let b = Node::sprite(Rgba8::BLACK, Size::new(4.0, 4.0));
    b.set_position(Point::new(30.0, 20.0));
    let empty = Node::sprite(Rgba8::BLACK, Size::ZERO);
    empty.set_position(Point::new(-500.0, -500.0));

    root.add_child(&a).unwrap();
    root.add_child(&b).unwrap();
    root.add_child(&empty).unwrap();

    assert_eq!(
        root.calculate_accumulated_frame(),
        Rect::new(10.0, 10.0, 42.0, 32.0)
    );
}

#[test]
fn accumulated_frame_of_empty_node_is_zero_at_position() {
    let node = Node::container();
    node.set_position(Point::new(3.0, 4.0));
    assert_eq!(
        node.calculate_accumulated_frame(),
        Rect::new(3.0, 4.0, 3.0, 4.0)
    );
}

#[test]
fn label_frame_is_estimated_from_text() {
    let font = Font {
        size: 10.0,
        ..Font::default()
    };
    let label = Node::label(Some("abcd".to_string()), font);
    assert_eq!(label.frame(), Rect::new(-10.0, -5.0, 10.0, 5.0));

    label.set_text(None).unwrap();
    assert_eq!(label.frame().size(), Size::ZERO);
}

#[test]
fn reference_bounds_by_kind() {
    let scene = Node::scene(Size::new(320.0, 480.0));
    assert_eq!(
        scene.reference_bounds(),
        ReferenceBounds::Scene {
            anchor: Point::ZERO,
            size: Size::new(320.0, 480.0)
        }
    );

    let sprite = Node::sprite(Rgba8::BLACK, Size::new(8.0, 6.0));
    assert_eq!(sprite.reference_bounds().anchor(), Point::new(0.5, 0.5));
    assert_eq!(sprite.reference_bounds().size(), Size::new(8.0, 6.0));

    let label = Node::label(
        Some("ab".to_string()),
        Font {
            size: 10.0,
            ..Font::default()
        },
    );
    assert_eq!(
        label.reference_bounds(),
        ReferenceBounds::Frame {
            size: Size::new(10.0, 10.0)
        }
    );
}

#[test]
fn kind_specific_setters_reject_other_kinds() {
    let container = Node::container();
    assert!(container.set_size(Size::new(1.0, 1.0)).is_err());
    assert!(container.set_text(Some("x".to_string())).is_err());
    assert!(container.set_color(Rgba8::BLACK).is_err());
    assert!(container.size().is_none());
    assert!(container.text().is_none());
}

#[test]
fn advance_actions_updates_alpha_and_fires_callbacks() {
    let node = Node::container();
    node.set_alpha(0.0);
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    node.run_action_with_key(
        Action::sequence([Action::fade_in(0.5), Action::run(move || h.set(h.get() + 1))]),
        "fade",
    );
    assert!(node.has_action("fade"));

    node.advance_actions(0.25);
    assert_eq!(node.alpha(), 0.5);
    node.advance_actions(0.25);
    assert_eq!(node.alpha(), 1.0);
    assert_eq!(hits.get(), 1);
    assert_eq!(node.action_count(), 0);
}

#[test]
fn callbacks_may_detach_their_node() {
    let parent = Node::container();
    let node = Node::container();
    parent.add_child(&node).unwrap();

    let weak = node.downgrade();
    node.run_action(Action::run(move || {
        if let Some(n) = weak.upgrade() {
            n.remove_from_parent();
            n.run_action_with_key(Action::wait(1.0), "again");
        }
    }));
    node.advance_actions(0.0);

    assert!(!node.is_attached());
    assert!(node.has_action("again"));
}

#[test]
fn descendants_are_depth_first() {
    let root = named(Node::container(), "root");
    let a = named(Node::container(), "a");
    let a1 = named(Node::container(), "a1");
    let b = named(Node::container(), "b");
    root.add_child(&a).unwrap();
    a.add_child(&a1).unwrap();
    root.add_child(&b).unwrap();

    let names: Vec<_> = root
        .descendants()
        .iter()
        .map(|n| n.name().unwrap())
        .collect();
    assert_eq!(names, ["root", "a", "a1", "b"]);
}

#[test]
fn snapshot_serializes_tree() {
    let scene = named(Node::scene(Size::new(10.0, 20.0)), "scene");
    let label = named(Node::label(Some("hi".to_string()), Font::default()), "label");
    scene.add_child(&label).unwrap();

    let json = serde_json::to_value(scene.snapshot()).unwrap();
    assert_eq!(json["kind"], "scene");
    assert_eq!(json["children"][0]["text"], "hi");
    assert!(json["children"][0].get("children").is_none());
}
