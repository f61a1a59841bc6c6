use scribe_dom::{DomTree, NodeId, NodeKind, Range};

use crate::geometry::is_contained;
use crate::mutate::EditContext;
use crate::traverse::{next_node, next_node_descendants, node_index, node_length};

/// Split the tracked range's partially covered text boundaries, widen it to
/// whole nodes, and return the top-level nodes it covers: every contained
/// node whose parent is not itself contained, in tree order.
pub fn decompose_range(ctx: &mut EditContext) -> Vec<NodeId> {
    if ctx.range.is_collapsed() {
        return Vec::new();
    }

    let start = ctx.range.start;
    if ctx.tree.kind(start.node) == NodeKind::Text
        && start.offset != 0
        && start.offset != node_length(ctx.tree, start.node)
    {
        if ctx.range.end.node == start.node {
            let new_end_offset = ctx.range.end.offset - start.offset;
            let new_text = ctx.split_text(start.node, start.offset);
            ctx.range.set_start(new_text, 0);
            ctx.range.set_end(new_text, new_end_offset);
        } else {
            let new_text = ctx.split_text(start.node, start.offset);
            ctx.range.set_start(new_text, 0);
        }
    }

    let end = ctx.range.end;
    if ctx.tree.kind(end.node) == NodeKind::Text
        && end.offset != 0
        && end.offset != node_length(ctx.tree, end.node)
    {
        // The split must not move either boundary of the tracked range.
        let saved = ctx.range;
        ctx.split_text(end.node, end.offset);
        ctx.range = saved;
    }

    let mut cloned = ctx.range;
    loop {
        if cloned.start.offset != 0 {
            break;
        }
        let Some(parent) = ctx.tree.parent(cloned.start.node) else {
            break;
        };
        let index = node_index(ctx.tree, cloned.start.node);
        cloned.set_start(parent, index);
    }
    loop {
        if cloned.end.offset != node_length(ctx.tree, cloned.end.node) {
            break;
        }
        let Some(parent) = ctx.tree.parent(cloned.end.node) else {
            break;
        };
        let index = node_index(ctx.tree, cloned.end.node);
        cloned.set_end(parent, index + 1);
    }

    let stop = next_node_descendants(ctx.tree, cloned.end.node);
    let mut out = Vec::new();
    let mut cursor = Some(cloned.start.node);
    while let Some(node) = cursor {
        if stop == Some(node) {
            break;
        }
        if is_contained(ctx.tree, node, &cloned)
            && !ctx
                .tree
                .parent(node)
                .is_some_and(|parent| is_contained(ctx.tree, parent, &cloned))
        {
            out.push(node);
        }
        cursor = next_node(ctx.tree, node);
    }
    out
}

fn extends_block(tree: &DomTree, node: NodeId) -> bool {
    matches!(tree.kind(node), NodeKind::Text | NodeKind::Comment)
        || tree.is_html_element_with_tag(node, "b")
        || tree.is_html_element_with_tag(node, "i")
        || tree.is_html_element_with_tag(node, "span")
}

/// Grow a range outward until both boundaries sit at block edges, swallowing
/// any inline formatting wrappers and character data along the way.
pub fn block_extend_range(tree: &DomTree, range: &Range) -> Range {
    let mut start = range.start;
    loop {
        if matches!(tree.kind(start.node), NodeKind::Text | NodeKind::Comment)
            || start.offset == 0
        {
            let Some(parent) = tree.parent(start.node) else {
                break;
            };
            start.offset = node_index(tree, start.node);
            start.node = parent;
        } else if start.offset == node_length(tree, start.node) {
            let Some(parent) = tree.parent(start.node) else {
                break;
            };
            start.offset = node_index(tree, start.node) + 1;
            start.node = parent;
        } else {
            let Some(child) = tree.child(start.node, start.offset - 1) else {
                break;
            };
            if extends_block(tree, child) {
                start.offset -= 1;
            } else {
                break;
            }
        }
    }

    let mut end = range.end;
    loop {
        if end.offset == 0 {
            let Some(parent) = tree.parent(end.node) else {
                break;
            };
            end.offset = node_index(tree, end.node);
            end.node = parent;
        } else if matches!(tree.kind(end.node), NodeKind::Text | NodeKind::Comment)
            || end.offset == node_length(tree, end.node)
        {
            let Some(parent) = tree.parent(end.node) else {
                break;
            };
            end.offset = node_index(tree, end.node) + 1;
            end.node = parent;
        } else {
            let Some(child) = tree.child(end.node, end.offset) else {
                break;
            };
            if extends_block(tree, child) {
                end.offset += 1;
            } else {
                break;
            }
        }
    }

    Range::new(start.node, start.offset, end.node, end.offset)
}
