use scribe_dom::{DomTree, NodeId, NodeKind};

use crate::apply::remove_style_attr_if_empty;
use crate::classify::{
    is_editable, is_indentation_element, is_inline_node, is_potential_indentation_element,
};
use crate::mutate::EditContext;
use crate::traverse::{next_sibling, node_index, previous_sibling};

/// One level of indentation: reuse the previous sibling when it is already
/// an indentation container, otherwise wrap the node in a fresh one.
pub fn indent_node(ctx: &mut EditContext, node: NodeId) {
    if let Some(prev) = previous_sibling(ctx.tree, node) {
        if ctx.tree.is_html_element(prev)
            && ctx.tree.computed_style(prev, "display") == "block"
            && ctx.tree.computed_style(prev, "margin-left") == "40px"
            && ctx.tree.computed_style(prev, "margin-right") == "40px"
            && ctx.tree.computed_style(prev, "margin-top") == "0px"
            && ctx.tree.computed_style(prev, "margin-bottom") == "0px"
        {
            let end = ctx.tree.child_count(prev);
            ctx.move_preserving_ranges(node, prev, end);
            return;
        }
    }

    let tag = if ctx.css_styling { "div" } else { "blockquote" };
    let new_parent = ctx.tree.create_element(tag);
    let Some(parent) = ctx.tree.parent(node) else {
        return;
    };
    let index = node_index(ctx.tree, node);
    ctx.insert_node(parent, index, new_parent);
    ctx.tree.set_attr(new_parent, "style", "margin: 0 40px");
    ctx.move_preserving_ranges(node, new_parent, 0);
}

fn collect_until(
    tree: &DomTree,
    node: NodeId,
    target: fn(&DomTree, NodeId) -> bool,
) -> (Vec<NodeId>, Option<NodeId>) {
    let mut list = Vec::new();
    let mut current = tree.parent(node);
    while let Some(ancestor) = current {
        if !is_editable(tree, ancestor)
            || tree.kind(ancestor) != NodeKind::Element
            || target(tree, ancestor)
        {
            break;
        }
        list.push(ancestor);
        current = tree.parent(ancestor);
    }
    (list, current)
}

/// One level of outdentation. Indentation containers dissolve in place;
/// otherwise the nearest enclosing indentation ancestor is found, every
/// sibling subtree on the path down to `node` is re-indented to keep its
/// level, and the ancestor itself is outdented.
pub fn outdent_node(ctx: &mut EditContext, node: NodeId) {
    if !is_editable(ctx.tree, node) {
        return;
    }

    if is_indentation_element(ctx.tree, node) {
        let trailing_inline = ctx
            .tree
            .last_child(node)
            .is_some_and(|n| is_inline_node(ctx.tree, n))
            && next_sibling(ctx.tree, node).is_some_and(|n| is_inline_node(ctx.tree, n));
        let leading_inline = ctx
            .tree
            .first_child(node)
            .is_some_and(|n| is_inline_node(ctx.tree, n))
            && previous_sibling(ctx.tree, node).is_some_and(|n| is_inline_node(ctx.tree, n));
        if trailing_inline || leading_inline {
            for (name, _) in ctx.tree.attrs(node) {
                ctx.tree.remove_attr(node, &name);
            }
            ctx.set_tag_name(node, "div");
        } else {
            ctx.remove_preserving_descendants(node);
        }
        return;
    }

    if is_potential_indentation_element(ctx.tree, node) {
        let replacement = ctx.set_tag_name(node, "div");
        ctx.tree.remove_attr(replacement, "class");
        ctx.tree.remove_attr(replacement, "dir");
        ctx.tree.set_style_value(replacement, "margin", "");
        ctx.tree.set_style_value(replacement, "padding", "");
        ctx.tree.set_style_value(replacement, "border", "");
        remove_style_attr_if_empty(ctx.tree, replacement);
        return;
    }

    let (mut ancestor_list, mut target) = collect_until(ctx.tree, node, is_indentation_element);
    let found = target
        .is_some_and(|t| is_editable(ctx.tree, t) && is_indentation_element(ctx.tree, t));
    if !found {
        let (list, fallback) = collect_until(ctx.tree, node, is_potential_indentation_element);
        ancestor_list = list;
        target = fallback;
    }
    let Some(original_ancestor) = target
        .filter(|&t| is_editable(ctx.tree, t) && is_potential_indentation_element(ctx.tree, t))
    else {
        return;
    };
    ancestor_list.push(original_ancestor);

    while let Some(current) = ancestor_list.pop() {
        let children = ctx.tree.children(current).to_vec();
        for child in children {
            if child == node || ancestor_list.last() == Some(&child) {
                continue;
            }
            indent_node(ctx, child);
        }
    }
    outdent_node(ctx, original_ancestor);
}
