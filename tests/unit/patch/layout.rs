use super::*;
use crate::patch::node::TextBox;

const FP: Footprint = Footprint::new(68, 25);

fn obj_at(x: i32, y: i32, text: &str) -> Node {
    Node::Object(TextBox::new(Position::new(x, y), text))
}

#[test]
fn same_row_advances_by_anchor_width() {
    let p = next_position(ORIGIN, FP, 0.0, 0.0);
    assert_eq!(p, Position::new(93, 25));
}

#[test]
fn same_row_column_margin_is_offset_by_one() {
    assert_eq!(next_position(ORIGIN, FP, 0.0, 1.0), Position::new(93, 25));
    assert_eq!(next_position(ORIGIN, FP, 0.0, 2.0), Position::new(143, 25));
}

#[test]
fn new_row_advances_by_anchor_height_plus_margin() {
    assert_eq!(next_position(ORIGIN, FP, 1.0, 0.0), Position::new(25, 50));
    assert_eq!(next_position(ORIGIN, FP, 2.0, 0.0), Position::new(25, 75));
    assert_eq!(next_position(ORIGIN, FP, 3.0, 1.0), Position::new(75, 100));
}

#[test]
fn empty_patch_places_at_origin() {
    let flow = FlowState::default();
    let r = flow.resolve(&[], &Placement::default());
    assert_eq!(r.position, ORIGIN);
    assert!(!r.absolute);
}

#[test]
fn absolute_requires_both_coordinates_non_negative() {
    let flow = FlowState::default();
    let r = flow.resolve(&[], &Placement::at(300, 10));
    assert_eq!(r.position, Position::new(300, 10));
    assert!(r.absolute);

    let r = flow.resolve(&[], &Placement::at(-1, 10));
    assert_eq!(r.position, ORIGIN);
    assert!(!r.absolute);
}

#[test]
fn anchors_follow_row_and_column_directives() {
    let mut flow = FlowState::default();
    flow.commit(0, &Placement::default(), false);
    assert_eq!((flow.row_head(), flow.row_tail()), (Some(0), Some(0)));

    flow.commit(1, &Placement::same_row(), false);
    assert_eq!((flow.row_head(), flow.row_tail()), (Some(0), Some(1)));

    flow.commit(2, &Placement::same_row().with_new_col(1.0), false);
    assert_eq!((flow.row_head(), flow.row_tail()), (Some(2), Some(2)));

    flow.commit(3, &Placement::same_row(), true);
    assert_eq!((flow.row_head(), flow.row_tail()), (Some(3), Some(3)));
}

#[test]
fn new_row_anchors_on_row_head_not_tail() {
    let nodes = vec![obj_at(25, 25, "loadbang"), obj_at(93, 25, "f")];
    let mut flow = FlowState::default();
    flow.commit(0, &Placement::default(), false);
    flow.commit(1, &Placement::same_row(), false);

    let below = flow.resolve(&nodes, &Placement::default());
    assert_eq!(below.position, Position::new(25, 50));

    let beside = flow.resolve(&nodes, &Placement::same_row());
    assert_eq!(beside.position, Position::new(143, 25));
}

#[test]
fn huge_directives_saturate_instead_of_overflowing() {
    assert_eq!(
        next_position(ORIGIN, FP, 1e12, 0.0),
        Position::new(25, i32::MAX)
    );
    assert_eq!(
        next_position(ORIGIN, FP, 0.0, 1e12),
        Position::new(i32::MAX, 25)
    );

    let edge = Position::new(i32::MAX - 10, 0);
    assert_eq!(
        next_position(edge, FP, 0.0, 0.0),
        Position::new(i32::MAX, 0)
    );
}

#[test]
fn same_row_after_far_absolute_node_saturates() {
    let nodes = [obj_at(i32::MAX - 10, 0, "loadbang")];
    let flow = FlowState {
        row_head: Some(0),
        row_tail: Some(0),
    };
    let r = flow.resolve(&nodes, &Placement::same_row());
    assert_eq!(r.position, Position::new(i32::MAX, 0));
}
