use scribe_dom::{DomTree, NodeId, NodeKind};

pub fn next_sibling(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    let parent = tree.parent(node)?;
    let index = tree.index_in_parent(node)?;
    tree.child(parent, index + 1)
}

pub fn previous_sibling(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    let parent = tree.parent(node)?;
    let index = tree.index_in_parent(node)?;
    tree.child(parent, index.checked_sub(1)?)
}

/// First node after `node` in tree order, descending into children.
pub fn next_node(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    if let Some(first) = tree.first_child(node) {
        return Some(first);
    }
    next_node_descendants(tree, node)
}

/// First node after `node` in tree order that is not in its subtree.
pub fn next_node_descendants(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    let mut cursor = Some(node);
    while let Some(n) = cursor {
        if let Some(sibling) = next_sibling(tree, n) {
            return Some(sibling);
        }
        cursor = tree.parent(n);
    }
    None
}

pub fn previous_node(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    if let Some(sibling) = previous_sibling(tree, node) {
        let mut cursor = sibling;
        while let Some(last) = tree.last_child(cursor) {
            cursor = last;
        }
        return Some(cursor);
    }
    let parent = tree.parent(node)?;
    if tree.kind(parent) == NodeKind::Element {
        return Some(parent);
    }
    None
}

/// Whether `ancestor` is `descendant` or an ancestor of it.
pub fn is_ancestor(tree: &DomTree, ancestor: NodeId, descendant: NodeId) -> bool {
    let mut cursor = Some(descendant);
    while let Some(n) = cursor {
        if n == ancestor {
            return true;
        }
        cursor = tree.parent(n);
    }
    false
}

pub fn furthest_ancestor(tree: &DomTree, node: NodeId) -> NodeId {
    let mut root = node;
    while let Some(parent) = tree.parent(root) {
        root = parent;
    }
    root
}

pub fn node_index(tree: &DomTree, node: NodeId) -> usize {
    tree.index_in_parent(node)
        .unwrap_or_else(|| panic!("detached node has no sibling index"))
}

/// Node length as DOM Range defines it: data length for character data,
/// child count for everything else.
pub fn node_length(tree: &DomTree, node: NodeId) -> usize {
    match tree.kind(node) {
        NodeKind::Text | NodeKind::Comment | NodeKind::ProcessingInstruction => {
            tree.data(node).map_or(0, str::len)
        }
        _ => tree.child_count(node),
    }
}

/// Ancestors of `node` from its parent up to the root.
pub fn ancestors(tree: &DomTree, node: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut cursor = tree.parent(node);
    while let Some(n) = cursor {
        out.push(n);
        cursor = tree.parent(n);
    }
    out
}
