use scribe_commands::EditContext;
use scribe_dom::{DomTree, NodeId, Range};

// <div>a<b>x</b>c<span></span></div>; the tests move the b into the span.
fn fixture() -> (DomTree, NodeId, NodeId, NodeId) {
    let mut tree = DomTree::new();
    let div = tree.create_element("div");
    tree.append(tree.root(), div);
    let a = tree.create_text("a");
    tree.append(div, a);
    let b = tree.create_element("b");
    tree.append(div, b);
    let x = tree.create_text("x");
    tree.append(b, x);
    let c = tree.create_text("c");
    tree.append(div, c);
    let span = tree.create_element("span");
    tree.append(div, span);
    (tree, div, b, span)
}

#[test]
fn boundaries_inside_the_moved_subtree_travel_with_it() {
    let (mut tree, div, b, span) = fixture();
    let mut ctx = EditContext::new(&mut tree, Range::new(b, 0, b, 1), false);

    ctx.move_preserving_ranges(b, span, 0);
    assert_eq!(ctx.range, Range::new(b, 0, b, 1));

    assert_eq!(tree.parent(b), Some(span));
    assert_eq!(tree.child_count(div), 3);
}

#[test]
fn boundaries_around_the_node_follow_into_the_new_parent() {
    let (mut tree, div, b, span) = fixture();
    let mut ctx = EditContext::new(&mut tree, Range::new(div, 1, div, 2), false);

    ctx.move_preserving_ranges(b, span, 0);
    assert_eq!(ctx.range, Range::new(span, 0, span, 1));
}

#[test]
fn boundaries_past_the_node_shift_left() {
    let (mut tree, div, b, span) = fixture();
    let mut ctx = EditContext::new(&mut tree, Range::new(div, 3, div, 4), false);

    ctx.move_preserving_ranges(b, span, 0);
    assert_eq!(ctx.range, Range::new(div, 2, div, 3));
}

#[test]
fn boundaries_in_the_new_parent_shift_right() {
    let (mut tree, _, b, span) = fixture();
    let s = tree.create_text("s");
    tree.append(span, s);
    let mut ctx = EditContext::new(&mut tree, Range::new(span, 0, span, 1), false);

    ctx.move_preserving_ranges(b, span, 0);
    assert_eq!(ctx.range, Range::new(span, 0, span, 2));
}
