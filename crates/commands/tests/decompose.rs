use scribe_commands::{
    block_extend_range, decompose_range, is_contained, is_effectively_contained, EditContext,
};
use scribe_dom::{DomTree, NodeId, Range};

fn paragraph_doc(text: &str) -> (DomTree, NodeId, NodeId) {
    let mut tree = DomTree::new();
    tree.set_design_mode(true);
    let p = tree.create_element("p");
    tree.append(tree.root(), p);
    let t = tree.create_text(text);
    tree.append(p, t);
    (tree, p, t)
}

#[test]
fn partially_covered_text_is_effectively_contained() {
    let (mut tree, p, t) = paragraph_doc("abcde");
    let z = tree.create_element("p");
    tree.append(tree.root(), z);
    let outside = tree.create_text("z");
    tree.append(z, outside);
    let range = Range::new(t, 1, t, 4);

    assert!(!is_contained(&tree, t, &range));
    assert!(is_effectively_contained(&tree, t, &range));
    assert!(is_effectively_contained(&tree, p, &range));
    assert!(!is_effectively_contained(&tree, outside, &range));
}

#[test]
fn decompose_splits_partially_covered_text() {
    let (mut tree, p, t) = paragraph_doc("abcde");
    let mut ctx = EditContext::new(&mut tree, Range::new(t, 1, t, 4), false);
    let members = decompose_range(&mut ctx);
    let tracked = ctx.range;

    assert_eq!(members.len(), 1);
    let member = members[0];
    assert_eq!(tracked, Range::new(member, 0, member, 3));
    assert_eq!(tree.data(member), Some("bcd"));

    let children: Vec<&str> = tree
        .children(p)
        .iter()
        .map(|&child| tree.data(child).unwrap_or(""))
        .collect();
    assert_eq!(children, ["a", "bcd", "e"]);
}

#[test]
fn decompose_returns_the_outermost_covered_node() {
    let mut tree = DomTree::new();
    tree.set_design_mode(true);
    let p = tree.create_element("p");
    tree.append(tree.root(), p);
    let hello = tree.create_text("hello ");
    tree.append(p, hello);
    let b = tree.create_element("b");
    tree.append(p, b);
    let world = tree.create_text("world");
    tree.append(b, world);
    let mut ctx = EditContext::new(&mut tree, Range::new(p, 0, p, 2), false);

    let members = decompose_range(&mut ctx);
    assert_eq!(members, vec![p]);
}

#[test]
fn decompose_of_a_collapsed_range_is_empty() {
    let (mut tree, _, t) = paragraph_doc("abc");
    let mut ctx = EditContext::new(&mut tree, Range::collapsed(t, 1), false);

    let members = decompose_range(&mut ctx);
    assert!(members.is_empty());
}

#[test]
fn block_extend_grows_to_block_edges() {
    let (tree, _, t) = paragraph_doc("foo");
    let root = tree.root();

    let extended = block_extend_range(&tree, &Range::new(t, 1, t, 2));
    assert_eq!(extended, Range::new(root, 0, root, 1));
}

#[test]
fn block_extend_stops_at_non_inline_content() {
    let mut tree = DomTree::new();
    tree.set_design_mode(true);
    let div = tree.create_element("div");
    tree.append(tree.root(), div);
    let hr = tree.create_element("hr");
    tree.append(div, hr);
    let b = tree.create_element("b");
    tree.append(div, b);
    let x = tree.create_text("x");
    tree.append(b, x);
    let y = tree.create_text("y");
    tree.append(div, y);
    let root = tree.root();

    let extended = block_extend_range(&tree, &Range::new(div, 1, div, 2));
    assert_eq!(extended, Range::new(div, 1, root, 1));
}
