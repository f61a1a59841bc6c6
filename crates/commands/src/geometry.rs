use std::cmp::Ordering;

use scribe_dom::{DomTree, NodeId, NodeKind, Range};

use crate::traverse::{furthest_ancestor, is_ancestor, node_index, node_length};

/// The position of one boundary point relative to another, as DOM Range
/// defines it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativePosition {
    Before,
    Equal,
    After,
}

fn path_from_root(tree: &DomTree, node: NodeId) -> Vec<NodeId> {
    let mut path = vec![node];
    let mut cursor = tree.parent(node);
    while let Some(n) = cursor {
        path.push(n);
        cursor = tree.parent(n);
    }
    path.reverse();
    path
}

/// Tree order of two nodes. Nodes under different roots get a stable but
/// arbitrary order so comparisons stay consistent.
pub fn compare_tree_order(tree: &DomTree, a: NodeId, b: NodeId) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let path_a = path_from_root(tree, a);
    let path_b = path_from_root(tree, b);
    if path_a[0] != path_b[0] {
        return path_a[0].cmp(&path_b[0]);
    }
    let mut depth = 1;
    while depth < path_a.len() && depth < path_b.len() && path_a[depth] == path_b[depth] {
        depth += 1;
    }
    match (path_a.get(depth), path_b.get(depth)) {
        (None, _) => Ordering::Less,
        (_, None) => Ordering::Greater,
        (Some(&child_a), Some(&child_b)) => {
            node_index(tree, child_a).cmp(&node_index(tree, child_b))
        }
    }
}

pub fn position(
    tree: &DomTree,
    node_a: NodeId,
    offset_a: usize,
    node_b: NodeId,
    offset_b: usize,
) -> RelativePosition {
    if node_a == node_b {
        return match offset_a.cmp(&offset_b) {
            Ordering::Equal => RelativePosition::Equal,
            Ordering::Less => RelativePosition::Before,
            Ordering::Greater => RelativePosition::After,
        };
    }
    match compare_tree_order(tree, node_a, node_b) {
        Ordering::Greater => match position(tree, node_b, offset_b, node_a, offset_a) {
            RelativePosition::Before => RelativePosition::After,
            RelativePosition::After => RelativePosition::Before,
            RelativePosition::Equal => RelativePosition::Equal,
        },
        _ => {
            if node_a != node_b && is_ancestor(tree, node_a, node_b) {
                let mut child = node_b;
                while tree.parent(child) != Some(node_a) {
                    let Some(parent) = tree.parent(child) else {
                        return RelativePosition::Before;
                    };
                    child = parent;
                }
                if node_index(tree, child) < offset_a {
                    return RelativePosition::After;
                }
            }
            RelativePosition::Before
        }
    }
}

/// "Contained" as DOM Range defines it: the node's furthest ancestor is the
/// range's root, (node, 0) is after the start, and (node, length) is before
/// the end.
pub fn is_contained(tree: &DomTree, node: NodeId, range: &Range) -> bool {
    let pos_start = position(tree, node, 0, range.start.node, range.start.offset);
    let pos_end = position(
        tree,
        node,
        node_length(tree, node),
        range.end.node,
        range.end.offset,
    );
    furthest_ancestor(tree, node) == furthest_ancestor(tree, range.start.node)
        && pos_start == RelativePosition::After
        && pos_end == RelativePosition::Before
}

/// A node is effectively contained if it is contained; or it is the start
/// node, a text node, with data past the start offset; or it is the end
/// node, a text node, with data before the end offset; or it has children
/// and all of them are effectively contained.
pub fn is_effectively_contained(tree: &DomTree, node: NodeId, range: &Range) -> bool {
    if is_contained(tree, node, range) {
        return true;
    }
    if node == range.start.node
        && tree.kind(node) == NodeKind::Text
        && node_length(tree, node) != range.start.offset
    {
        return true;
    }
    if node == range.end.node && tree.kind(node) == NodeKind::Text && range.end.offset != 0 {
        return true;
    }
    if tree.child_count(node) != 0 {
        return tree
            .children(node)
            .iter()
            .all(|&child| is_effectively_contained(tree, child, range));
    }
    false
}
